pub mod controller;
pub mod router;
pub mod service;

/// Student select joined with its faculty, ready for [`StudentRow`].
///
/// Appends the given literal (filters, ordering) after the join.
///
/// [`StudentRow`]: hogwarts_models::StudentRow
macro_rules! student_query {
    ($tail:literal) => {
        concat!(
            "SELECT s.id, s.name, s.age, ",
            "f.id AS faculty_id, f.name AS faculty_name, f.color AS faculty_color ",
            "FROM students s LEFT JOIN faculties f ON f.id = s.faculty_id ",
            $tail
        )
    };
}

pub(crate) use student_query;

pub use router::init_students_router;
