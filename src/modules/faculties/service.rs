use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use hogwarts_core::{AppError, SchoolError};
use hogwarts_models::{
    CreateFacultyDto, DomainValidate, Faculty, FacultyId, FacultySearchParams, Student,
    StudentRow, UpdateFacultyDto,
};

use crate::metrics;
use crate::modules::students::student_query;

pub struct FacultyService;

/// Maps a failed faculty write, turning a name clash into
/// [`SchoolError::FacultyAlreadyExists`].
fn map_write_error(e: sqlx::Error, name: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        warn!(faculty.name = %name, "Attempted to use an existing faculty name");
        return SchoolError::FacultyAlreadyExists.into();
    }
    error!(error = %e, faculty.name = %name, "Database error writing faculty");
    AppError::from(e)
}

impl FacultyService {
    #[instrument(skip(db, dto), fields(faculty.name = %dto.name, db.operation = "INSERT", db.table = "faculties"))]
    pub async fn create_faculty(db: &PgPool, dto: CreateFacultyDto) -> Result<Faculty, AppError> {
        debug!(faculty.color = %dto.color, "Creating new faculty");

        let faculty = sqlx::query_as::<_, Faculty>(
            "INSERT INTO faculties (name, color) VALUES ($1, $2) RETURNING id, name, color",
        )
        .bind(&dto.name)
        .bind(&dto.color)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, &dto.name))?;

        metrics::track_faculty_created();
        info!(faculty.id = %faculty.id, faculty.name = %faculty.name, "Faculty created successfully");

        Ok(faculty)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "faculties"))]
    pub async fn get_faculty(db: &PgPool, id: FacultyId) -> Result<Faculty, AppError> {
        let faculty = sqlx::query_as::<_, Faculty>(
            "SELECT id, name, color FROM faculties WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            debug!(faculty.id = %id, "Faculty not found");
            SchoolError::FacultyNotFound
        })?;

        Ok(faculty)
    }

    #[instrument(skip(db, dto), fields(faculty.id = %dto.id, db.operation = "UPDATE", db.table = "faculties"))]
    pub async fn update_faculty(db: &PgPool, dto: UpdateFacultyDto) -> Result<Faculty, AppError> {
        // A missing faculty wins over invalid properties
        Self::get_faculty(db, dto.id).await?;
        dto.check()?;

        let faculty = sqlx::query_as::<_, Faculty>(
            "UPDATE faculties SET name = $1, color = $2 WHERE id = $3 RETURNING id, name, color",
        )
        .bind(&dto.name)
        .bind(&dto.color)
        .bind(dto.id)
        .fetch_optional(db)
        .await
        .map_err(|e| map_write_error(e, &dto.name))?
        .ok_or(SchoolError::FacultyNotFound)?;

        info!(faculty.id = %faculty.id, "Faculty updated successfully");
        Ok(faculty)
    }

    /// Deletes a faculty, first detaching its students, in one transaction.
    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "faculties"))]
    pub async fn delete_faculty(db: &PgPool, id: FacultyId) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let detached = sqlx::query("UPDATE students SET faculty_id = NULL WHERE faculty_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM faculties WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            // Dropping the transaction rolls back the detach
            return Err(SchoolError::FacultyNotFound.into());
        }

        tx.commit().await?;

        info!(faculty.id = %id, students.detached = detached, "Faculty deleted successfully");
        Ok(())
    }

    /// Faculties whose color matches exactly, ignoring case.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "faculties"))]
    pub async fn find_by_color(db: &PgPool, color: Option<&str>) -> Result<Vec<Faculty>, AppError> {
        let color = color.ok_or(SchoolError::BadColor)?;

        let faculties = sqlx::query_as::<_, Faculty>(
            "SELECT id, name, color FROM faculties WHERE LOWER(color) = LOWER($1) ORDER BY id",
        )
        .bind(color)
        .fetch_all(db)
        .await?;

        if faculties.is_empty() {
            return Err(SchoolError::FacultyNotFound.into());
        }

        debug!(count = faculties.len(), "Faculties found by color");
        Ok(faculties)
    }

    /// Faculties matching the color or the name, ignoring case.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "faculties"))]
    pub async fn search(db: &PgPool, params: &FacultySearchParams) -> Result<Vec<Faculty>, AppError> {
        let faculties = sqlx::query_as::<_, Faculty>(
            "SELECT id, name, color FROM faculties
             WHERE ($1::TEXT IS NOT NULL AND LOWER(color) = LOWER($1))
                OR ($2::TEXT IS NOT NULL AND LOWER(name) = LOWER($2))
             ORDER BY id",
        )
        .bind(params.color.as_deref())
        .bind(params.name.as_deref())
        .fetch_all(db)
        .await?;

        if faculties.is_empty() {
            return Err(SchoolError::FacultyNotFound.into());
        }

        Ok(faculties)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn get_faculty_students(db: &PgPool, id: FacultyId) -> Result<Vec<Student>, AppError> {
        Self::get_faculty(db, id).await?;

        let rows = sqlx::query_as::<_, StudentRow>(student_query!(
            "WHERE s.faculty_id = $1 ORDER BY s.id"
        ))
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().map(Student::from).collect())
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "faculties"))]
    pub async fn get_all_faculties(db: &PgPool) -> Result<Vec<Faculty>, AppError> {
        let faculties =
            sqlx::query_as::<_, Faculty>("SELECT id, name, color FROM faculties ORDER BY id")
                .fetch_all(db)
                .await?;

        if faculties.is_empty() {
            return Err(SchoolError::FacultyNotFound.into());
        }

        Ok(faculties)
    }

    /// Longest faculty name; ties go to the lowest id.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "faculties"))]
    pub async fn longest_name(db: &PgPool) -> Result<String, AppError> {
        let name = sqlx::query_scalar::<_, String>(
            "SELECT name FROM faculties ORDER BY char_length(name) DESC, id ASC LIMIT 1",
        )
        .fetch_optional(db)
        .await?
        .ok_or(SchoolError::FacultyNotFound)?;

        Ok(name)
    }
}
