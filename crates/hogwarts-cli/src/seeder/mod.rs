//! Database seeding module for populating test data.
//!
//! This module provides functionality to seed the database with fake
//! faculties and students.
//!
//! # Module Structure
//!
//! - [`faculties`] - Faculty generation and insertion
//! - [`students`] - Student generation and insertion
//! - [`models`] - Data structures for seeding configuration
//!
//! # Performance
//!
//! - Parallel data generation using Rayon
//! - Batch inserts with multi-value INSERT statements inside one transaction

pub mod faculties;
pub mod models;
pub mod students;

pub use models::SeedConfig;

use hogwarts_models::avatars::storage_key_of;
use hogwarts_models::{FacultyId, StudentId};
use sqlx::PgPool;
use std::path::Path;
use std::time::Instant;

/// Seeds faculties, then students spread across them
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting full database seeding...");
    println!("   - Faculties: {}", config.num_faculties);
    println!("   - Students: {}", config.num_students);

    let faculty_ids = faculties::seed_faculties(db, config.num_faculties).await?;
    let student_ids = students::seed_students(db, config.num_students, &faculty_ids).await?;

    println!(
        "\n✅ Seeding complete! Created {} faculties, {} students in {:?}",
        faculty_ids.len(),
        student_ids.len(),
        start_time.elapsed()
    );

    Ok(())
}

/// Seeds only faculties
pub async fn seed_faculties_only(
    db: &PgPool,
    count: usize,
) -> Result<Vec<FacultyId>, Box<dyn std::error::Error>> {
    faculties::seed_faculties(db, count).await
}

/// Seeds students into the faculties already in the database
pub async fn seed_students_only(
    db: &PgPool,
    count: usize,
) -> Result<Vec<StudentId>, Box<dyn std::error::Error>> {
    let faculty_ids = faculties::existing_faculty_ids(db).await?;
    if faculty_ids.is_empty() {
        return Err("No faculties found. Run `seed-faculties` first.".into());
    }

    students::seed_students(db, count, &faculty_ids).await
}

/// Clears every student, avatar, and faculty, and removes avatar files
/// under `avatars_dir`
pub async fn clear_all(db: &PgPool, avatars_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing all data...");

    // Order matters due to foreign keys: avatars -> students -> faculties
    let avatar_paths = students::clear_students(db).await?;
    faculties::clear_faculties(db).await?;

    let mut removed = 0;
    for key in avatar_paths.iter().filter_map(|path| storage_key_of(path)) {
        match std::fs::remove_file(avatars_dir.join(key)) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => eprintln!("   ⚠️  Could not remove avatar {}: {}", key, e),
        }
    }

    println!(
        "✅ All data cleared ({} avatar files removed) in {:?}",
        removed,
        start_time.elapsed()
    );
    Ok(())
}
