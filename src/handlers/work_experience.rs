//! Work experience CRUD, current-role, and statistics handlers.

use crate::error::AppError;
use crate::models::{CreateWorkExperience, UpdateWorkExperience, WorkExperience};
use crate::response::{Deleted, Many, One};
use crate::sql::{self, Filter, SqlValue};
use crate::state::AppState;
use crate::store;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

const DEFAULT_LIMIT: i64 = 50;
const ORDER: &str = "start_date DESC, is_current DESC";

#[derive(Debug, Deserialize)]
pub struct ListWorkExperienceQuery {
    pub employment_type: Option<String>,
    pub is_current: Option<bool>,
    pub company_name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListWorkExperienceQuery>,
) -> Result<Json<Many<WorkExperience>>, AppError> {
    let mut filters = Vec::new();
    if let Some(employment_type) = query.employment_type {
        filters.push(Filter::Eq("employment_type", SqlValue::text(employment_type)));
    }
    if let Some(is_current) = query.is_current {
        filters.push(Filter::Eq("is_current", SqlValue::flag(is_current)));
    }
    if let Some(company_name) = query.company_name {
        filters.push(Filter::ILike("company_name", format!("%{company_name}%")));
    }
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = query.offset.unwrap_or(0);
    let q = sql::select_list("work_experience", filters, ORDER, limit, offset);
    let rows = store::fetch_all::<WorkExperience>(&state.pool, &q).await?;
    Ok(Json(Many::new(rows, limit, offset)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<One<WorkExperience>>, AppError> {
    let row = sqlx::query_as::<_, WorkExperience>("SELECT * FROM work_experience WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound("Work experience"))?;
    Ok(Json(One::new(row)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateWorkExperience>,
) -> Result<(StatusCode, Json<One<WorkExperience>>), AppError> {
    let row = sqlx::query_as::<_, WorkExperience>(
        "INSERT INTO work_experience (
            company_name, position_title, employment_type, location,
            start_date, end_date, is_current, job_description,
            key_achievements, technologies_used, company_url, company_logo_url
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12
        ) RETURNING *",
    )
    .bind(&input.company_name)
    .bind(&input.position_title)
    .bind(&input.employment_type)
    .bind(&input.location)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(input.is_current.unwrap_or(false))
    .bind(&input.job_description)
    .bind(&input.key_achievements)
    .bind(&input.technologies_used)
    .bind(&input.company_url)
    .bind(&input.company_logo_url)
    .fetch_one(&state.pool)
    .await?;
    Ok((StatusCode::CREATED, Json(One::new(row))))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateWorkExperience>,
) -> Result<Json<One<WorkExperience>>, AppError> {
    let q = sql::update("work_experience", id, input.changes())?;
    let row = store::fetch_optional::<WorkExperience>(&state.pool, &q)
        .await?
        .ok_or(AppError::NotFound("Work experience"))?;
    Ok(Json(One::new(row)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted<WorkExperience>>, AppError> {
    let row =
        sqlx::query_as::<_, WorkExperience>("DELETE FROM work_experience WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&state.pool)
            .await?
            .ok_or(AppError::NotFound("Work experience"))?;
    Ok(Json(Deleted::new("Work experience deleted successfully", row)))
}

/// Roles still held today, most recent first.
pub async fn current(
    State(state): State<AppState>,
) -> Result<Json<One<Vec<WorkExperience>>>, AppError> {
    let rows = sqlx::query_as::<_, WorkExperience>(
        "SELECT * FROM work_experience WHERE is_current = TRUE ORDER BY start_date DESC",
    )
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(One::new(rows)))
}

#[derive(Debug, Serialize, FromRow)]
pub struct WorkExperienceStatsRow {
    pub employment_type: Option<String>,
    pub count: i64,
    pub current_count: i64,
}

#[derive(Debug, Serialize)]
pub struct WorkExperienceStats {
    pub total: i64,
    pub current_total: i64,
    pub breakdown: Vec<WorkExperienceStatsRow>,
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<WorkExperienceStats>, AppError> {
    let breakdown_query = sqlx::query_as::<_, WorkExperienceStatsRow>(
        "SELECT employment_type, COUNT(*) AS count,
                COUNT(CASE WHEN is_current THEN 1 END) AS current_count
         FROM work_experience
         GROUP BY employment_type
         ORDER BY employment_type",
    )
    .fetch_all(&state.pool);
    let total_query =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM work_experience").fetch_one(&state.pool);
    let current_query = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM work_experience WHERE is_current = TRUE",
    )
    .fetch_one(&state.pool);
    let (breakdown, total, current_total) =
        tokio::try_join!(breakdown_query, total_query, current_query)?;
    Ok(Json(WorkExperienceStats { total, current_total, breakdown }))
}
