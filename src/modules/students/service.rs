use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use hogwarts_core::{AppError, FileStorage, SchoolError};
use hogwarts_models::avatars::storage_key_of;
use hogwarts_models::students::is_valid_age;
use hogwarts_models::{
    CreateStudentDto, DomainValidate, Faculty, FacultyId, Student, StudentId, StudentRow,
    UpdateStudentDto,
};

use crate::metrics;
use crate::modules::students::student_query;

pub struct StudentService;

fn map_write_error(e: sqlx::Error, name: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            warn!(student.name = %name, "Attempted to use an existing student name");
            return SchoolError::StudentAlreadyExists.into();
        }
        if db_err.is_foreign_key_violation() {
            return SchoolError::FacultyNotFound.into();
        }
    }
    error!(error = %e, student.name = %name, "Database error writing student");
    AppError::from(e)
}

fn non_empty(rows: Vec<StudentRow>) -> Result<Vec<Student>, AppError> {
    if rows.is_empty() {
        return Err(SchoolError::StudentNotFound.into());
    }
    Ok(rows.into_iter().map(Student::from).collect())
}

impl StudentService {
    #[instrument(skip(db, dto), fields(student.name = %dto.name, db.operation = "INSERT", db.table = "students"))]
    pub async fn enroll_student(
        db: &PgPool,
        faculty_id: FacultyId,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        let faculty_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM faculties WHERE id = $1)")
                .bind(faculty_id)
                .fetch_one(db)
                .await?;

        if !faculty_exists {
            return Err(SchoolError::FacultyNotFound.into());
        }

        let row = sqlx::query_as::<_, StudentRow>(
            "WITH s AS (
                INSERT INTO students (name, age, faculty_id) VALUES ($1, $2, $3)
                RETURNING id, name, age, faculty_id
             )
             SELECT s.id, s.name, s.age,
                    f.id AS faculty_id, f.name AS faculty_name, f.color AS faculty_color
             FROM s LEFT JOIN faculties f ON f.id = s.faculty_id",
        )
        .bind(&dto.name)
        .bind(dto.age)
        .bind(faculty_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, &dto.name))?;

        metrics::track_student_enrolled();
        info!(student.id = %row.id, faculty.id = %faculty_id, "Student enrolled successfully");

        Ok(row.into())
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn get_student(db: &PgPool, id: StudentId) -> Result<Student, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(student_query!("WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| {
                debug!(student.id = %id, "Student not found");
                SchoolError::StudentNotFound
            })?;

        Ok(row.into())
    }

    /// Replaces name and age, keeping the current faculty.
    ///
    /// Checks run in order: the student must exist, the request must not
    /// carry a faculty, then the properties must be valid.
    #[instrument(skip(db, dto), fields(student.id = %dto.id, db.operation = "UPDATE", db.table = "students"))]
    pub async fn update_student(db: &PgPool, dto: UpdateStudentDto) -> Result<Student, AppError> {
        let existing = Self::get_student(db, dto.id).await?;

        if dto.carries_faculty() {
            warn!(student.id = %dto.id, "Rejected faculty change through student update");
            return Err(SchoolError::EditPermission.into());
        }

        dto.check()?;

        let row = sqlx::query_as::<_, StudentRow>(
            "WITH s AS (
                UPDATE students SET name = $1, age = $2 WHERE id = $3
                RETURNING id, name, age, faculty_id
             )
             SELECT s.id, s.name, s.age,
                    f.id AS faculty_id, f.name AS faculty_name, f.color AS faculty_color
             FROM s LEFT JOIN faculties f ON f.id = s.faculty_id",
        )
        .bind(&dto.name)
        .bind(dto.age)
        .bind(existing.id)
        .fetch_optional(db)
        .await
        .map_err(|e| map_write_error(e, &dto.name))?
        .ok_or(SchoolError::StudentNotFound)?;

        info!(student.id = %row.id, "Student updated successfully");
        Ok(row.into())
    }

    /// Deletes a student together with its avatar row, then its avatar file.
    #[instrument(skip(db, storage), fields(db.operation = "DELETE", db.table = "students"))]
    pub async fn delete_student(
        db: &PgPool,
        storage: &dyn FileStorage,
        id: StudentId,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let avatar_path = sqlx::query_scalar::<_, String>(
            "DELETE FROM avatars WHERE student_id = $1 RETURNING file_path",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(SchoolError::StudentNotFound.into());
        }

        tx.commit().await?;

        // The file goes only once the rows are gone for good
        if let Some(key) = avatar_path.as_deref().and_then(storage_key_of)
            && let Err(e) = storage.delete(key).await
        {
            warn!(error = %e, student.id = %id, "Failed to remove avatar file");
        }

        info!(student.id = %id, "Student deleted successfully");
        Ok(())
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn find_by_age(db: &PgPool, age: i32) -> Result<Vec<Student>, AppError> {
        if !is_valid_age(age) {
            return Err(SchoolError::BadAge.into());
        }

        let rows = sqlx::query_as::<_, StudentRow>(student_query!(
            "WHERE s.age = $1 ORDER BY s.id"
        ))
        .bind(age)
        .fetch_all(db)
        .await?;

        non_empty(rows)
    }

    /// Students aged within `[from, to]`.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn find_by_age_between(
        db: &PgPool,
        from: i32,
        to: i32,
    ) -> Result<Vec<Student>, AppError> {
        if !is_valid_age(from) || !is_valid_age(to) {
            return Err(SchoolError::BadAge.into());
        }

        let rows = sqlx::query_as::<_, StudentRow>(student_query!(
            "WHERE s.age BETWEEN $1 AND $2 ORDER BY s.id"
        ))
        .bind(from)
        .bind(to)
        .fetch_all(db)
        .await?;

        non_empty(rows)
    }

    /// Faculty of a student; `None` once the student has been expelled.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn get_student_faculty(
        db: &PgPool,
        id: StudentId,
    ) -> Result<Option<Faculty>, AppError> {
        Ok(Self::get_student(db, id).await?.faculty)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn get_all_students(db: &PgPool) -> Result<Vec<Student>, AppError> {
        let rows = sqlx::query_as::<_, StudentRow>(student_query!("ORDER BY s.id"))
            .fetch_all(db)
            .await?;

        non_empty(rows)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn count_students(db: &PgPool) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    /// Average age rounded down; `0` when nobody is enrolled.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn average_age(db: &PgPool) -> Result<i64, AppError> {
        let average = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(FLOOR(AVG(age)), 0)::BIGINT FROM students",
        )
        .fetch_one(db)
        .await?;
        Ok(average)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn last_five_students(db: &PgPool) -> Result<Vec<Student>, AppError> {
        let rows = sqlx::query_as::<_, StudentRow>(student_query!("ORDER BY s.id DESC LIMIT 5"))
            .fetch_all(db)
            .await?;

        Ok(rows.into_iter().map(Student::from).collect())
    }
}
