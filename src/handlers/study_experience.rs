//! Study experience CRUD, statistics, and degree-grouping handlers.

use crate::error::AppError;
use crate::models::{CreateStudyExperience, StudyExperience, UpdateStudyExperience};
use crate::response::{Deleted, Many, One};
use crate::sql::{self, Filter, SqlValue};
use crate::state::AppState;
use crate::store;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;

const DEFAULT_LIMIT: i64 = 50;
const ORDER: &str = "start_date DESC, is_current DESC";

#[derive(Debug, Deserialize)]
pub struct ListStudyExperienceQuery {
    pub degree_type: Option<String>,
    pub is_current: Option<bool>,
    pub institution_name: Option<String>,
    pub field_of_study: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListStudyExperienceQuery>,
) -> Result<Json<Many<StudyExperience>>, AppError> {
    let mut filters = Vec::new();
    if let Some(degree_type) = query.degree_type {
        filters.push(Filter::Eq("degree_type", SqlValue::text(degree_type)));
    }
    if let Some(is_current) = query.is_current {
        filters.push(Filter::Eq("is_current", SqlValue::flag(is_current)));
    }
    if let Some(institution_name) = query.institution_name {
        filters.push(Filter::ILike("institution_name", format!("%{institution_name}%")));
    }
    if let Some(field_of_study) = query.field_of_study {
        filters.push(Filter::ILike("field_of_study", format!("%{field_of_study}%")));
    }
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = query.offset.unwrap_or(0);
    let q = sql::select_list("study_experience", filters, ORDER, limit, offset);
    let rows = store::fetch_all::<StudyExperience>(&state.pool, &q).await?;
    Ok(Json(Many::new(rows, limit, offset)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<One<StudyExperience>>, AppError> {
    let row = sqlx::query_as::<_, StudyExperience>("SELECT * FROM study_experience WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound("Study experience"))?;
    Ok(Json(One::new(row)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateStudyExperience>,
) -> Result<(StatusCode, Json<One<StudyExperience>>), AppError> {
    let row = sqlx::query_as::<_, StudyExperience>(
        "INSERT INTO study_experience (
            institution_name, degree_type, field_of_study, specialization,
            start_date, end_date, is_current, gpa, grade_scale, location,
            institution_url, institution_logo_url, major_courses, achievements,
            thesis_title, thesis_description
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16
        ) RETURNING *",
    )
    .bind(&input.institution_name)
    .bind(&input.degree_type)
    .bind(&input.field_of_study)
    .bind(&input.specialization)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(input.is_current.unwrap_or(false))
    .bind(input.gpa)
    .bind(&input.grade_scale)
    .bind(&input.location)
    .bind(&input.institution_url)
    .bind(&input.institution_logo_url)
    .bind(&input.major_courses)
    .bind(&input.achievements)
    .bind(&input.thesis_title)
    .bind(&input.thesis_description)
    .fetch_one(&state.pool)
    .await?;
    Ok((StatusCode::CREATED, Json(One::new(row))))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateStudyExperience>,
) -> Result<Json<One<StudyExperience>>, AppError> {
    let q = sql::update("study_experience", id, input.changes())?;
    let row = store::fetch_optional::<StudyExperience>(&state.pool, &q)
        .await?
        .ok_or(AppError::NotFound("Study experience"))?;
    Ok(Json(One::new(row)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted<StudyExperience>>, AppError> {
    let row = sqlx::query_as::<_, StudyExperience>(
        "DELETE FROM study_experience WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("Study experience"))?;
    Ok(Json(Deleted::new("Study experience deleted successfully", row)))
}

/// Programs still in progress, most recent first.
pub async fn current(
    State(state): State<AppState>,
) -> Result<Json<One<Vec<StudyExperience>>>, AppError> {
    let rows = sqlx::query_as::<_, StudyExperience>(
        "SELECT * FROM study_experience WHERE is_current = TRUE ORDER BY start_date DESC",
    )
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(One::new(rows)))
}

#[derive(Debug, Serialize, FromRow)]
pub struct StudyExperienceStatsRow {
    pub degree_type: Option<String>,
    pub count: i64,
    pub current_count: i64,
    pub avg_gpa: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StudyExperienceStats {
    pub total: i64,
    pub current_total: i64,
    pub breakdown: Vec<StudyExperienceStatsRow>,
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<StudyExperienceStats>, AppError> {
    let breakdown_query = sqlx::query_as::<_, StudyExperienceStatsRow>(
        "SELECT degree_type, COUNT(*) AS count,
                COUNT(CASE WHEN is_current THEN 1 END) AS current_count,
                AVG(gpa)::float8 AS avg_gpa
         FROM study_experience
         WHERE degree_type IS NOT NULL
         GROUP BY degree_type
         ORDER BY degree_type",
    )
    .fetch_all(&state.pool);
    let total_query =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM study_experience").fetch_one(&state.pool);
    let current_query = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM study_experience WHERE is_current = TRUE",
    )
    .fetch_one(&state.pool);
    let (breakdown, total, current_total) =
        tokio::try_join!(breakdown_query, total_query, current_query)?;
    Ok(Json(StudyExperienceStats { total, current_total, breakdown }))
}

#[derive(Debug, Serialize, FromRow)]
pub struct DegreeRow {
    pub degree_type: Option<String>,
    pub field_of_study: String,
    pub institution_name: String,
    pub gpa: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
}

/// Degrees grouped by type; rows without a degree type land in `unspecified`.
pub async fn degrees(
    State(state): State<AppState>,
) -> Result<Json<One<BTreeMap<String, Vec<DegreeRow>>>>, AppError> {
    let rows = sqlx::query_as::<_, DegreeRow>(
        "SELECT degree_type, field_of_study, institution_name, gpa,
                start_date, end_date, is_current
         FROM study_experience
         ORDER BY degree_type, start_date DESC",
    )
    .fetch_all(&state.pool)
    .await?;
    let mut grouped: BTreeMap<String, Vec<DegreeRow>> = BTreeMap::new();
    for row in rows {
        let key = row
            .degree_type
            .clone()
            .unwrap_or_else(|| "unspecified".to_string());
        grouped.entry(key).or_default().push(row);
    }
    Ok(Json(One::new(grouped)))
}
