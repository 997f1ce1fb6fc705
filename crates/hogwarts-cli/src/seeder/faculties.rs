//! Faculty seeding functionality.

use fake::Fake;
use fake::faker::name::en::LastName;
use hogwarts_models::FacultyId;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::FacultySeed;

const COLORS: &[&str] = &[
    "red", "green", "blue", "yellow", "silver", "bronze", "black", "purple",
];

const BATCH_SIZE: usize = 500;

/// Generates faculty data in parallel using Rayon.
///
/// The index suffix keeps names unique within one run.
pub fn generate_faculties(count: usize) -> Vec<FacultySeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let founder: String = LastName().fake();
            let color = COLORS[(0..COLORS.len()).fake::<usize>()];

            FacultySeed {
                name: format!("{} House {}", founder, i + 1),
                color: color.to_string(),
            }
        })
        .collect()
}

/// Seeds faculties into the database
pub async fn seed_faculties(
    db: &PgPool,
    count: usize,
) -> Result<Vec<FacultyId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🏰 Seeding {} faculties...", count);

    let faculties = generate_faculties(count);
    let ids = insert_faculties_batch(db, &faculties).await?;

    println!(
        "   ✓ Inserted {} faculties in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts faculties in batches, skipping names that already exist
pub async fn insert_faculties_batch(
    db: &PgPool,
    faculties: &[FacultySeed],
) -> Result<Vec<FacultyId>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;
    let mut all_ids = Vec::with_capacity(faculties.len());

    for chunk in faculties.chunks(BATCH_SIZE) {
        all_ids.extend(insert_faculties_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_faculties_chunk(
    tx: &mut Transaction<'_, Postgres>,
    faculties: &[FacultySeed],
) -> Result<Vec<FacultyId>, Box<dyn std::error::Error>> {
    if faculties.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO faculties (name, color) VALUES ");
    for i in 0..faculties.len() {
        if i > 0 {
            query.push_str(", ");
        }
        query.push_str(&format!("(${}, ${})", i * 2 + 1, i * 2 + 2));
    }
    query.push_str(" ON CONFLICT (name) DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar::<_, FacultyId>(&query);
    for faculty in faculties {
        q = q.bind(&faculty.name).bind(&faculty.color);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

/// Ids of every faculty, oldest first
pub async fn existing_faculty_ids(db: &PgPool) -> Result<Vec<FacultyId>, sqlx::Error> {
    sqlx::query_scalar::<_, FacultyId>("SELECT id FROM faculties ORDER BY id")
        .fetch_all(db)
        .await
}

/// Clears all faculties from the database
pub async fn clear_faculties(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing faculties...");

    let result = sqlx::query("DELETE FROM faculties")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} faculties in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
