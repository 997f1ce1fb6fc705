//! Student seeding functionality.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use hogwarts_models::students::{MAX_AGE, MIN_AGE};
use hogwarts_models::{FacultyId, StudentId};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::StudentSeed;

const BATCH_SIZE: usize = 500;

/// Generates student data in parallel using Rayon.
///
/// Students are spread across `faculty_ids` in turn; with no faculties they
/// are left unassigned.
pub fn generate_students(count: usize, faculty_ids: &[FacultyId]) -> Vec<StudentSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let first: String = FirstName().fake();
            let last: String = LastName().fake();

            StudentSeed {
                name: format!("{} {} {}", first, last, i + 1),
                age: (MIN_AGE..=MAX_AGE).fake::<i32>(),
                faculty_id: faculty_ids.get(i % faculty_ids.len().max(1)).copied(),
            }
        })
        .collect()
}

/// Seeds students into the given faculties
pub async fn seed_students(
    db: &PgPool,
    count: usize,
    faculty_ids: &[FacultyId],
) -> Result<Vec<StudentId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🎓 Seeding {} students across {} faculties...",
        count,
        faculty_ids.len()
    );

    let students = generate_students(count, faculty_ids);
    let ids = insert_students_batch(db, &students).await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts students in batches, skipping names that already exist
pub async fn insert_students_batch(
    db: &PgPool,
    students: &[StudentSeed],
) -> Result<Vec<StudentId>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;
    let mut all_ids = Vec::with_capacity(students.len());

    for chunk in students.chunks(BATCH_SIZE) {
        all_ids.extend(insert_students_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> Result<Vec<StudentId>, Box<dyn std::error::Error>> {
    if students.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO students (name, age, faculty_id) VALUES ");
    for i in 0..students.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let base = i * 3;
        query.push_str(&format!("(${}, ${}, ${})", base + 1, base + 2, base + 3));
    }
    query.push_str(" ON CONFLICT (name) DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar::<_, StudentId>(&query);
    for student in students {
        q = q
            .bind(&student.name)
            .bind(student.age)
            .bind(student.faculty_id);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

/// Clears all students from the database, returning the avatar files they
/// owned so the caller can remove them
pub async fn clear_students(db: &PgPool) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing students and avatars...");

    let mut tx = db.begin().await?;

    let avatar_paths = sqlx::query_scalar::<_, String>("DELETE FROM avatars RETURNING file_path")
        .fetch_all(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM students")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "   ✓ Deleted {} students and {} avatars in {:?}",
        result,
        avatar_paths.len(),
        start_time.elapsed()
    );

    Ok(avatar_paths)
}
