//! Row models and request payloads for the three portfolio resources.
//!
//! Each resource has a row struct decoded straight from the database, a
//! `Create*` payload with the original defaulting rules, and an `Update*`
//! payload made entirely of [`Patch`] fields. The `changes` methods are the
//! update allow-lists: only the column literals written there can ever reach
//! a statement.

use crate::sql::{ChangeSet, Patch};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// `careers` row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Career {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub career_type: Option<String>,
    pub category: Option<String>,
    pub status: String,
    pub priority_level: String,
    pub target_date: Option<NaiveDate>,
    pub achieved_date: Option<NaiveDate>,
    pub skills_required: Vec<String>,
    pub skills_gained: Vec<String>,
    pub steps_to_achieve: Vec<String>,
    pub resources_needed: Vec<String>,
    pub progress_percentage: i32,
    pub challenges: Vec<String>,
    pub lessons_learned: Vec<String>,
    pub related_experiences: Vec<String>,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCareer {
    pub title: String,
    pub description: Option<String>,
    pub career_type: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub priority_level: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub achieved_date: Option<NaiveDate>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub skills_gained: Vec<String>,
    #[serde(default)]
    pub steps_to_achieve: Vec<String>,
    #[serde(default)]
    pub resources_needed: Vec<String>,
    pub progress_percentage: Option<i32>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub lessons_learned: Vec<String>,
    #[serde(default)]
    pub related_experiences: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_public: Option<bool>,
}

/// Partial update for a career; absent fields are left untouched and unknown
/// fields are rejected at deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateCareer {
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub career_type: Patch<String>,
    pub category: Patch<String>,
    pub status: Patch<String>,
    pub priority_level: Patch<String>,
    pub target_date: Patch<NaiveDate>,
    pub achieved_date: Patch<NaiveDate>,
    pub skills_required: Patch<Vec<String>>,
    pub skills_gained: Patch<Vec<String>>,
    pub steps_to_achieve: Patch<Vec<String>>,
    pub resources_needed: Patch<Vec<String>>,
    pub progress_percentage: Patch<i32>,
    pub challenges: Patch<Vec<String>>,
    pub lessons_learned: Patch<Vec<String>>,
    pub related_experiences: Patch<Vec<String>>,
    pub tags: Patch<Vec<String>>,
    pub is_public: Patch<bool>,
}

impl UpdateCareer {
    pub fn changes(&self) -> ChangeSet {
        let mut set = ChangeSet::new();
        set.text("title", &self.title);
        set.text("description", &self.description);
        set.text("career_type", &self.career_type);
        set.text("category", &self.category);
        set.text("status", &self.status);
        set.text("priority_level", &self.priority_level);
        set.date("target_date", &self.target_date);
        set.date("achieved_date", &self.achieved_date);
        set.text_array("skills_required", &self.skills_required);
        set.text_array("skills_gained", &self.skills_gained);
        set.text_array("steps_to_achieve", &self.steps_to_achieve);
        set.text_array("resources_needed", &self.resources_needed);
        set.int("progress_percentage", &self.progress_percentage);
        set.text_array("challenges", &self.challenges);
        set.text_array("lessons_learned", &self.lessons_learned);
        set.text_array("related_experiences", &self.related_experiences);
        set.text_array("tags", &self.tags);
        set.flag("is_public", &self.is_public);
        set
    }
}

/// `work_experience` row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WorkExperience {
    pub id: i32,
    pub company_name: String,
    pub position_title: String,
    pub employment_type: Option<String>,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub job_description: Option<String>,
    pub key_achievements: Vec<String>,
    pub technologies_used: Vec<String>,
    pub company_url: Option<String>,
    pub company_logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkExperience {
    pub company_name: String,
    pub position_title: String,
    pub employment_type: Option<String>,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: Option<bool>,
    pub job_description: Option<String>,
    #[serde(default)]
    pub key_achievements: Vec<String>,
    #[serde(default)]
    pub technologies_used: Vec<String>,
    pub company_url: Option<String>,
    pub company_logo_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateWorkExperience {
    pub company_name: Patch<String>,
    pub position_title: Patch<String>,
    pub employment_type: Patch<String>,
    pub location: Patch<String>,
    pub start_date: Patch<NaiveDate>,
    pub end_date: Patch<NaiveDate>,
    pub is_current: Patch<bool>,
    pub job_description: Patch<String>,
    pub key_achievements: Patch<Vec<String>>,
    pub technologies_used: Patch<Vec<String>>,
    pub company_url: Patch<String>,
    pub company_logo_url: Patch<String>,
}

impl UpdateWorkExperience {
    pub fn changes(&self) -> ChangeSet {
        let mut set = ChangeSet::new();
        set.text("company_name", &self.company_name);
        set.text("position_title", &self.position_title);
        set.text("employment_type", &self.employment_type);
        set.text("location", &self.location);
        set.date("start_date", &self.start_date);
        set.date("end_date", &self.end_date);
        set.flag("is_current", &self.is_current);
        set.text("job_description", &self.job_description);
        set.text_array("key_achievements", &self.key_achievements);
        set.text_array("technologies_used", &self.technologies_used);
        set.text("company_url", &self.company_url);
        set.text("company_logo_url", &self.company_logo_url);
        set
    }
}

/// `study_experience` row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StudyExperience {
    pub id: i32,
    pub institution_name: String,
    pub degree_type: Option<String>,
    pub field_of_study: String,
    pub specialization: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub gpa: Option<f64>,
    pub grade_scale: Option<String>,
    pub location: Option<String>,
    pub institution_url: Option<String>,
    pub institution_logo_url: Option<String>,
    pub major_courses: Vec<String>,
    pub achievements: Vec<String>,
    pub thesis_title: Option<String>,
    pub thesis_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudyExperience {
    pub institution_name: String,
    pub degree_type: Option<String>,
    pub field_of_study: String,
    pub specialization: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: Option<bool>,
    pub gpa: Option<f64>,
    pub grade_scale: Option<String>,
    pub location: Option<String>,
    pub institution_url: Option<String>,
    pub institution_logo_url: Option<String>,
    #[serde(default)]
    pub major_courses: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub thesis_title: Option<String>,
    pub thesis_description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateStudyExperience {
    pub institution_name: Patch<String>,
    pub degree_type: Patch<String>,
    pub field_of_study: Patch<String>,
    pub specialization: Patch<String>,
    pub start_date: Patch<NaiveDate>,
    pub end_date: Patch<NaiveDate>,
    pub is_current: Patch<bool>,
    pub gpa: Patch<f64>,
    pub grade_scale: Patch<String>,
    pub location: Patch<String>,
    pub institution_url: Patch<String>,
    pub institution_logo_url: Patch<String>,
    pub major_courses: Patch<Vec<String>>,
    pub achievements: Patch<Vec<String>>,
    pub thesis_title: Patch<String>,
    pub thesis_description: Patch<String>,
}

impl UpdateStudyExperience {
    pub fn changes(&self) -> ChangeSet {
        let mut set = ChangeSet::new();
        set.text("institution_name", &self.institution_name);
        set.text("degree_type", &self.degree_type);
        set.text("field_of_study", &self.field_of_study);
        set.text("specialization", &self.specialization);
        set.date("start_date", &self.start_date);
        set.date("end_date", &self.end_date);
        set.flag("is_current", &self.is_current);
        set.float("gpa", &self.gpa);
        set.text("grade_scale", &self.grade_scale);
        set.text("location", &self.location);
        set.text("institution_url", &self.institution_url);
        set.text("institution_logo_url", &self.institution_logo_url);
        set.text_array("major_courses", &self.major_courses);
        set.text_array("achievements", &self.achievements);
        set.text("thesis_title", &self.thesis_title);
        set.text("thesis_description", &self.thesis_description);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql;

    #[test]
    fn sparse_payload_produces_only_supplied_changes() {
        let update: UpdateCareer =
            serde_json::from_str(r#"{"status": "achieved", "progress_percentage": 100}"#).unwrap();
        let q = sql::update("careers", 7, update.changes()).unwrap();
        assert_eq!(
            q.sql,
            "UPDATE careers SET status = $1, progress_percentage = $2, \
             updated_at = CURRENT_TIMESTAMP WHERE id = $3 RETURNING *"
        );
    }

    #[test]
    fn null_clears_while_missing_is_untouched() {
        let update: UpdateCareer = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(update.description, Patch::Null);
        assert!(update.title.is_absent());
        assert_eq!(update.changes().len(), 1);
    }

    #[test]
    fn unknown_update_fields_are_rejected() {
        let result = serde_json::from_str::<UpdateCareer>(r#"{"not_a_column": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_defaults_apply_to_arrays_only() {
        let input: CreateCareer = serde_json::from_str(r#"{"title": "Learn Rust"}"#).unwrap();
        assert!(input.skills_required.is_empty());
        assert!(input.status.is_none());
        assert!(input.is_public.is_none());
    }
}
