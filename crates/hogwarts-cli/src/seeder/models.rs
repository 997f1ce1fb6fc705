//! Data models for database seeding configuration.

use hogwarts_models::FacultyId;

/// Seed data for creating a faculty.
#[derive(Debug, Clone)]
pub struct FacultySeed {
    pub name: String,
    pub color: String,
}

/// Seed data for enrolling a student.
#[derive(Debug, Clone)]
pub struct StudentSeed {
    pub name: String,
    pub age: i32,
    pub faculty_id: Option<FacultyId>,
}

/// Complete configuration for database seeding.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub num_faculties: usize,
    pub num_students: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_faculties: 4,
            num_students: 100,
        }
    }
}

impl SeedConfig {
    pub fn new(num_faculties: usize, num_students: usize) -> Self {
        Self {
            num_faculties,
            num_students,
        }
    }
}
