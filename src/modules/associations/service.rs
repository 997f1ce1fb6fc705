use sqlx::PgPool;
use tracing::{info, instrument, warn};

use hogwarts_core::{AppError, SchoolError};
use hogwarts_models::{FacultyId, Student, StudentId, StudentIdList, StudentRow};

use crate::metrics;
use crate::modules::students::service::StudentService;
use crate::modules::students::student_query;

pub struct AssociationService;

impl AssociationService {
    /// Moves one student into a faculty.
    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "students"))]
    pub async fn change_faculty(
        db: &PgPool,
        student_id: StudentId,
        faculty_id: FacultyId,
    ) -> Result<Student, AppError> {
        let mut tx = db.begin().await?;

        let student_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)",
        )
        .bind(student_id)
        .fetch_one(&mut *tx)
        .await?;
        if !student_exists {
            return Err(SchoolError::StudentNotFound.into());
        }

        let faculty_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM faculties WHERE id = $1)",
        )
        .bind(faculty_id)
        .fetch_one(&mut *tx)
        .await?;
        if !faculty_exists {
            return Err(SchoolError::FacultyNotFound.into());
        }

        sqlx::query("UPDATE students SET faculty_id = $1 WHERE id = $2")
            .bind(faculty_id)
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        metrics::track_students_transferred("single", 1);
        info!(student.id = %student_id, faculty.id = %faculty_id, "Student changed faculty");

        StudentService::get_student(db, student_id).await
    }

    /// Moves every listed student into a faculty, all or nothing.
    ///
    /// Returns the faculty's full roster afterwards.
    #[instrument(skip(db, ids), fields(students.count = ids.len(), db.operation = "UPDATE", db.table = "students"))]
    pub async fn change_students(
        db: &PgPool,
        faculty_id: FacultyId,
        ids: &StudentIdList,
    ) -> Result<Vec<Student>, AppError> {
        let mut tx = db.begin().await?;

        let faculty_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM faculties WHERE id = $1)",
        )
        .bind(faculty_id)
        .fetch_one(&mut *tx)
        .await?;
        if !faculty_exists {
            return Err(SchoolError::FacultyNotFound.into());
        }

        let moved = sqlx::query("UPDATE students SET faculty_id = $1 WHERE id = ANY($2)")
            .bind(faculty_id)
            .bind(ids.as_i64s())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if moved != ids.len() as u64 {
            warn!(
                faculty.id = %faculty_id,
                requested = ids.len(),
                found = moved,
                "Bulk faculty change references missing students"
            );
            return Err(SchoolError::StudentNotFound.into());
        }

        let rows = sqlx::query_as::<_, StudentRow>(student_query!(
            "WHERE s.faculty_id = $1 ORDER BY s.id"
        ))
        .bind(faculty_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        metrics::track_students_transferred("bulk", ids.len());
        info!(faculty.id = %faculty_id, moved, "Students changed faculty");

        Ok(rows.into_iter().map(Student::from).collect())
    }
}
