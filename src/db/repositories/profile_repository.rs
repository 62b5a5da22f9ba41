use sqlx::PgPool;
use uuid::Uuid;

use crate::db::error::DatabaseError;
use crate::db::models::ReporterProfile;

const PROFILE_COLUMNS: &str =
    "user_id, interests, activities, onboarded_at, created_at, updated_at";

pub struct ProfileRepository;

impl ProfileRepository {
    /// Persist onboarding selections. Re-running onboarding overwrites the
    /// previous selection wholesale.
    pub async fn upsert_onboarding(
        pool: &PgPool,
        user_id: Uuid,
        interests: &[String],
        activities: &[String],
    ) -> Result<ReporterProfile, DatabaseError> {
        let profile = sqlx::query_as::<_, ReporterProfile>(&format!(
            "INSERT INTO reporter_profiles (user_id, interests, activities, onboarded_at) \
             VALUES ($1, $2, $3, now()) \
             ON CONFLICT (user_id) DO UPDATE \
                 SET interests = EXCLUDED.interests, \
                     activities = EXCLUDED.activities, \
                     onboarded_at = now(), \
                     updated_at = now() \
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(interests)
        .bind(activities)
        .fetch_one(pool)
        .await?;

        Ok(profile)
    }

    pub async fn fetch(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<ReporterProfile>, DatabaseError> {
        let profile = sqlx::query_as::<_, ReporterProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM reporter_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }
}
