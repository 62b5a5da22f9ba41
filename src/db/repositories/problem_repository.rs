use sqlx::PgPool;
use uuid::Uuid;

use crate::db::error::DatabaseError;
use crate::db::models::{NewProblem, Problem, ProblemStatus};

const PROBLEM_COLUMNS: &str = "id, title, description, location, location_lat, location_lng, \
     danger_level, status, image_url, reporter_id, created_at, updated_at";

pub struct ProblemRepository;

impl ProblemRepository {
    /// Full problem collection, newest first. Problems are never filtered
    /// server-side; filtering happens over the in-memory snapshot.
    pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Problem>, DatabaseError> {
        let problems = sqlx::query_as::<_, Problem>(&format!(
            "SELECT {PROBLEM_COLUMNS} FROM problems ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }

    /// Insert a report for an authenticated reporter. Status always starts
    /// at `pending`.
    pub async fn insert(
        pool: &PgPool,
        reporter_id: Uuid,
        data: &NewProblem,
    ) -> Result<Problem, DatabaseError> {
        let problem = sqlx::query_as::<_, Problem>(&format!(
            "INSERT INTO problems \
                 (title, description, location, location_lat, location_lng, \
                  danger_level, status, image_url, reporter_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {PROBLEM_COLUMNS}"
        ))
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(data.location_lat)
        .bind(data.location_lng)
        .bind(data.danger_level.as_str())
        .bind(ProblemStatus::Pending.as_str())
        .bind(&data.image_url)
        .bind(reporter_id)
        .fetch_one(pool)
        .await?;

        Ok(problem)
    }
}
