//! Exercise repository

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Exercise, GeneratedExercise},
};

/// Repository for exercise database operations
pub struct ExerciseRepository;

impl ExerciseRepository {
    /// Create a new exercise
    pub async fn create(
        conn: &mut PgConnection,
        exercise: &GeneratedExercise,
    ) -> AppResult<Exercise> {
        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            INSERT INTO exercises (id, title, difficulty, language, prompt_markdown, starter_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&exercise.title)
        .bind(exercise.difficulty.as_str())
        .bind(&exercise.language)
        .bind(&exercise.prompt_markdown)
        .bind(&exercise.starter_code)
        .fetch_one(&mut *conn)
        .await?;

        Ok(exercise)
    }

    /// Find exercise by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: &Uuid) -> AppResult<Option<Exercise>> {
        let exercise = sqlx::query_as::<_, Exercise>(r#"SELECT * FROM exercises WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(exercise)
    }
}
