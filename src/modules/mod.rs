pub mod associations;
pub mod avatars;
pub mod faculties;
pub mod info;
pub mod performance;
pub mod students;
