//! PostgreSQL implementation of AssessmentRepository.
//!
//! Answers, analytics and recommendations are stored as JSONB; the headline
//! numbers get their own columns so trend queries stay cheap.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{column, count_to_u64, db_error, timestamp_column, user_id_column};
use crate::domain::assessment::{
    Answer, Assessment, AssessmentAnalytics, AssessmentScore, Insight, InsightSource, TrendPoint,
};
use crate::domain::foundation::{AssessmentId, DomainError, UserId};
use crate::ports::AssessmentRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, answers, total_score, max_score, percentage, average_score,
           analytics, summary, recommendations, insight_source, created_at
    FROM assessments
"#;

/// PostgreSQL implementation of AssessmentRepository.
#[derive(Clone)]
pub struct PostgresAssessmentRepository {
    pool: PgPool,
}

impl PostgresAssessmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssessmentRepository for PostgresAssessmentRepository {
    async fn save(&self, assessment: &Assessment) -> Result<(), DomainError> {
        let score = assessment.score();
        let insight = assessment.insight();

        sqlx::query(
            r#"
            INSERT INTO assessments (
                id, user_id, answers, total_score, max_score, percentage, average_score,
                analytics, summary, recommendations, insight_source, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(assessment.id().as_uuid())
        .bind(assessment.user_id().as_str())
        .bind(Json(assessment.answers()))
        .bind(score.total as i32)
        .bind(score.max as i32)
        .bind(i16::from(score.percentage))
        .bind(score.average)
        .bind(Json(assessment.analytics()))
        .bind(&insight.summary)
        .bind(Json(&insight.recommendations))
        .bind(insight.source.as_str())
        .bind(assessment.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert assessment"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &AssessmentId) -> Result<Option<Assessment>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch assessment"))?;

        row.map(|r| row_to_assessment(&r)).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Assessment>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list assessments"))?;

        rows.iter().map(row_to_assessment).collect()
    }

    async fn latest_by_user(&self, user_id: &UserId) -> Result<Option<Assessment>, DomainError> {
        let row = sqlx::query(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch latest assessment"))?;

        row.map(|r| row_to_assessment(&r)).transpose()
    }

    async fn trend_points(&self, user_id: &UserId) -> Result<Vec<TrendPoint>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT created_at, percentage FROM assessments
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch assessment trend"))?;

        rows.iter()
            .map(|row| {
                Ok(TrendPoint {
                    taken_at: timestamp_column(row, "created_at")?,
                    percentage: percentage_column(row)?,
                })
            })
            .collect()
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assessments WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count assessments"))?;

        Ok(count_to_u64(result.0))
    }

    async fn delete(&self, id: &AssessmentId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM assessments WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete assessment"))?;

        Ok(())
    }
}

fn percentage_column(row: &PgRow) -> Result<u8, DomainError> {
    let value: i16 = column(row, "percentage")?;
    u8::try_from(value)
        .map_err(|_| DomainError::database(format!("Invalid percentage: {}", value)))
}

fn row_to_assessment(row: &PgRow) -> Result<Assessment, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let Json(answers): Json<Vec<Answer>> = column(row, "answers")?;
    let Json(analytics): Json<AssessmentAnalytics> = column(row, "analytics")?;
    let Json(recommendations): Json<Vec<String>> = column(row, "recommendations")?;
    let total: i32 = column(row, "total_score")?;
    let max: i32 = column(row, "max_score")?;

    let source_str: String = column(row, "insight_source")?;
    let source = InsightSource::parse(&source_str).ok_or_else(|| {
        DomainError::database(format!("Invalid insight source: {}", source_str))
    })?;

    let score = AssessmentScore {
        total: u32::try_from(total).unwrap_or(0),
        max: u32::try_from(max).unwrap_or(0),
        percentage: percentage_column(row)?,
        average: column(row, "average_score")?,
    };

    Ok(Assessment::reconstitute(
        AssessmentId::from_uuid(id),
        user_id_column(row, "user_id")?,
        answers,
        score,
        analytics,
        Insight {
            summary: column(row, "summary")?,
            recommendations,
            source,
        },
        timestamp_column(row, "created_at")?,
    ))
}
