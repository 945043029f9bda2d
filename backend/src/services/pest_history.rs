//! Pest detection history

use chrono::{DateTime, Utc};
use shared::{NewPestDetection, PestDetection};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Default and maximum number of history rows returned
pub const DEFAULT_HISTORY_LIMIT: i64 = 20;
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Pest history service
#[derive(Clone)]
pub struct PestHistoryService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct PestDetectionRow {
    id: Uuid,
    crop_type: String,
    pest_name: String,
    threat_level: String,
    description: String,
    damage: String,
    treatment: String,
    prevention: String,
    created_at: DateTime<Utc>,
}

impl From<PestDetectionRow> for PestDetection {
    fn from(r: PestDetectionRow) -> Self {
        PestDetection {
            id: r.id,
            crop_type: r.crop_type,
            pest_name: r.pest_name,
            threat_level: r.threat_level,
            description: r.description,
            damage: r.damage,
            treatment: r.treatment,
            prevention: r.prevention,
            created_at: r.created_at,
        }
    }
}

/// Clamp a requested page size to `1..=MAX_HISTORY_LIMIT`
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

impl PestHistoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Save an identification result
    pub async fn record(&self, detection: &NewPestDetection) -> AppResult<PestDetection> {
        let row = sqlx::query_as::<_, PestDetectionRow>(
            r#"
            INSERT INTO pest_detections (
                crop_type, pest_name, threat_level, description, damage, treatment, prevention
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, crop_type, pest_name, threat_level, description, damage,
                      treatment, prevention, created_at
            "#,
        )
        .bind(&detection.crop_type)
        .bind(&detection.pest_name)
        .bind(&detection.threat_level)
        .bind(&detection.description)
        .bind(&detection.damage)
        .bind(&detection.treatment)
        .bind(&detection.prevention)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(pest = %row.pest_name, crop = %row.crop_type, "Pest detection recorded");
        Ok(row.into())
    }

    /// Most recent detections first
    pub async fn list(&self, limit: Option<i64>) -> AppResult<Vec<PestDetection>> {
        let rows = sqlx::query_as::<_, PestDetectionRow>(
            r#"
            SELECT id, crop_type, pest_name, threat_level, description, damage,
                   treatment, prevention, created_at
            FROM pest_detections
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(clamp_limit(limit))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<PestDetection> {
        let row = sqlx::query_as::<_, PestDetectionRow>(
            r#"
            SELECT id, crop_type, pest_name, threat_level, description, damage,
                   treatment, prevention, created_at
            FROM pest_detections
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Pest detection".to_string()))?;

        Ok(row.into())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM pest_detections WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pest detection".to_string()));
        }
        Ok(())
    }
}
