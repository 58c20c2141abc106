//! Career goal CRUD and statistics handlers.

use crate::error::AppError;
use crate::models::{Career, CreateCareer, UpdateCareer};
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

#[derive(Debug, Deserialize)]
pub struct ListCareersQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority_level: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListCareersQuery>,
) -> Result<Json<Many<Career>>, AppError> {
    let mut filters = Vec::new();
    if let Some(status) = query.status {
        filters.push(Filter::Eq("status", SqlValue::text(status)));
    }
    if let Some(category) = query.category {
        filters.push(Filter::Eq("category", SqlValue::text(category)));
    }
    if let Some(priority_level) = query.priority_level {
        filters.push(Filter::Eq("priority_level", SqlValue::text(priority_level)));
    }
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = query.offset.unwrap_or(0);
    let q = sql::select_list("careers", filters, "created_at DESC", limit, offset);
    let rows = store::fetch_all::<Career>(&state.pool, &q).await?;
    Ok(Json(Many::new(rows, limit, offset)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<One<Career>>, AppError> {
    let row = sqlx::query_as::<_, Career>("SELECT * FROM careers WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound("Career"))?;
    Ok(Json(One::new(row)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCareer>,
) -> Result<(StatusCode, Json<One<Career>>), AppError> {
    let row = sqlx::query_as::<_, Career>(
        "INSERT INTO careers (
            title, description, career_type, category, status, priority_level,
            target_date, achieved_date, skills_required, skills_gained,
            steps_to_achieve, resources_needed, progress_percentage,
            challenges, lessons_learned, related_experiences, tags, is_public
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18
        ) RETURNING *",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.career_type)
    .bind(&input.category)
    .bind(input.status.as_deref().unwrap_or("planned"))
    .bind(input.priority_level.as_deref().unwrap_or("medium"))
    .bind(input.target_date)
    .bind(input.achieved_date)
    .bind(&input.skills_required)
    .bind(&input.skills_gained)
    .bind(&input.steps_to_achieve)
    .bind(&input.resources_needed)
    .bind(input.progress_percentage.unwrap_or(0))
    .bind(&input.challenges)
    .bind(&input.lessons_learned)
    .bind(&input.related_experiences)
    .bind(&input.tags)
    .bind(input.is_public.unwrap_or(true))
    .fetch_one(&state.pool)
    .await?;
    Ok((StatusCode::CREATED, Json(One::new(row))))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateCareer>,
) -> Result<Json<One<Career>>, AppError> {
    let q = sql::update("careers", id, input.changes())?;
    let row = store::fetch_optional::<Career>(&state.pool, &q)
        .await?
        .ok_or(AppError::NotFound("Career"))?;
    Ok(Json(One::new(row)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted<Career>>, AppError> {
    let row = sqlx::query_as::<_, Career>("DELETE FROM careers WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound("Career"))?;
    Ok(Json(Deleted::new("Career deleted successfully", row)))
}

#[derive(Debug, Serialize, FromRow)]
pub struct CareerStatsRow {
    pub status: String,
    pub category: Option<String>,
    pub priority_level: String,
    pub count: i64,
    pub avg_progress: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CareerStats {
    pub total: i64,
    pub breakdown: Vec<CareerStatsRow>,
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<CareerStats>, AppError> {
    let breakdown_query = sqlx::query_as::<_, CareerStatsRow>(
        "SELECT status, category, priority_level, COUNT(*) AS count,
                AVG(progress_percentage)::float8 AS avg_progress
         FROM careers
         GROUP BY status, category, priority_level
         ORDER BY status, category, priority_level",
    )
    .fetch_all(&state.pool);
    let total_query = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM careers").fetch_one(&state.pool);
    let (breakdown, total) = tokio::try_join!(breakdown_query, total_query)?;
    Ok(Json(CareerStats { total, breakdown }))
}
