//! Builds parameterized UPDATE and SELECT statements for the CRUD surface.
//!
//! The partial-update builder turns an ordered set of changed columns into one
//! UPDATE with positional parameters, the row identity always bound last.
//! Column names are compile-time literals supplied by the model layer, never
//! request input, so identifiers need no quoting or escaping.

use crate::error::AppError;
use crate::sql::params::SqlValue;
use crate::sql::patch::Patch;
use chrono::NaiveDate;

/// A statement plus its positional parameters, in binding order.
#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Ordered set of column changes for one UPDATE. Populated through the typed
/// setters; a [`Patch::Absent`] field is skipped entirely while an explicit
/// [`Patch::Null`] binds a typed SQL NULL.
#[derive(Debug, Default)]
pub struct ChangeSet {
    entries: Vec<(&'static str, SqlValue)>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn push(&mut self, column: &'static str, value: SqlValue) {
        self.entries.push((column, value));
    }

    pub fn text(&mut self, column: &'static str, patch: &Patch<String>) {
        match patch {
            Patch::Absent => {}
            Patch::Null => self.push(column, SqlValue::Text(None)),
            Patch::Value(v) => self.push(column, SqlValue::Text(Some(v.clone()))),
        }
    }

    pub fn int(&mut self, column: &'static str, patch: &Patch<i32>) {
        match patch {
            Patch::Absent => {}
            Patch::Null => self.push(column, SqlValue::Int(None)),
            Patch::Value(v) => self.push(column, SqlValue::Int(Some(*v))),
        }
    }

    pub fn float(&mut self, column: &'static str, patch: &Patch<f64>) {
        match patch {
            Patch::Absent => {}
            Patch::Null => self.push(column, SqlValue::Float(None)),
            Patch::Value(v) => self.push(column, SqlValue::Float(Some(*v))),
        }
    }

    pub fn flag(&mut self, column: &'static str, patch: &Patch<bool>) {
        match patch {
            Patch::Absent => {}
            Patch::Null => self.push(column, SqlValue::Bool(None)),
            Patch::Value(v) => self.push(column, SqlValue::Bool(Some(*v))),
        }
    }

    pub fn date(&mut self, column: &'static str, patch: &Patch<NaiveDate>) {
        match patch {
            Patch::Absent => {}
            Patch::Null => self.push(column, SqlValue::Date(None)),
            Patch::Value(v) => self.push(column, SqlValue::Date(Some(*v))),
        }
    }

    pub fn text_array(&mut self, column: &'static str, patch: &Patch<Vec<String>>) {
        match patch {
            Patch::Absent => {}
            Patch::Null => self.push(column, SqlValue::TextArray(None)),
            Patch::Value(v) => self.push(column, SqlValue::TextArray(Some(v.clone()))),
        }
    }
}

/// Build a partial UPDATE for `table`: one `column = $n` assignment per
/// changed column in insertion order, a server-side `updated_at` refresh, and
/// the row id bound as the final parameter. The full updated row is returned.
///
/// Fails with [`AppError::EmptyUpdate`] before touching storage when nothing
/// changed.
pub fn update(table: &str, id: i32, changes: ChangeSet) -> Result<QueryBuf, AppError> {
    if changes.is_empty() {
        return Err(AppError::EmptyUpdate);
    }
    let mut assignments = Vec::with_capacity(changes.entries.len());
    let mut params = Vec::with_capacity(changes.entries.len() + 1);
    for (column, value) in changes.entries {
        params.push(value);
        assignments.push(format!("{} = ${}", column, params.len()));
    }
    params.push(SqlValue::int(id));
    let sql = format!(
        "UPDATE {} SET {}, updated_at = CURRENT_TIMESTAMP WHERE id = ${} RETURNING *",
        table,
        assignments.join(", "),
        params.len()
    );
    Ok(QueryBuf { sql, params })
}

/// One WHERE predicate for a list query.
#[derive(Debug)]
pub enum Filter {
    /// `column = $n`
    Eq(&'static str, SqlValue),
    /// `column ILIKE $n`; the caller wraps the needle in wildcards.
    ILike(&'static str, String),
}

/// Build a filtered list SELECT with a fixed ordering and parameterized
/// LIMIT/OFFSET. Predicates are ANDed in the order given.
pub fn select_list(
    table: &str,
    filters: Vec<Filter>,
    order_by: &str,
    limit: i64,
    offset: i64,
) -> QueryBuf {
    let mut params = Vec::with_capacity(filters.len() + 2);
    let mut predicates = Vec::with_capacity(filters.len());
    for filter in filters {
        match filter {
            Filter::Eq(column, value) => {
                params.push(value);
                predicates.push(format!("{} = ${}", column, params.len()));
            }
            Filter::ILike(column, needle) => {
                params.push(SqlValue::text(needle));
                predicates.push(format!("{} ILIKE ${}", column, params.len()));
            }
        }
    }
    let where_clause = if predicates.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", predicates.join(" AND "))
    };
    params.push(SqlValue::big_int(limit));
    let limit_index = params.len();
    params.push(SqlValue::big_int(offset));
    let offset_index = params.len();
    let sql = format!(
        "SELECT * FROM {}{} ORDER BY {} LIMIT ${} OFFSET ${}",
        table, where_clause, order_by, limit_index, offset_index
    );
    QueryBuf { sql, params }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder_indices(sql: &str) -> Vec<u32> {
        let mut out = Vec::new();
        let bytes = sql.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end > start {
                    out.push(sql[start..end].parse().unwrap());
                }
                i = end;
            } else {
                i += 1;
            }
        }
        out
    }

    #[test]
    fn update_orders_parameters_and_binds_identity_last() {
        let mut changes = ChangeSet::new();
        changes.text("status", &Patch::Value("achieved".to_string()));
        changes.int("progress_percentage", &Patch::Value(100));
        let q = update("careers", 7, changes).unwrap();
        assert_eq!(
            q.sql,
            "UPDATE careers SET status = $1, progress_percentage = $2, \
             updated_at = CURRENT_TIMESTAMP WHERE id = $3 RETURNING *"
        );
        assert_eq!(
            q.params,
            vec![
                SqlValue::text("achieved"),
                SqlValue::int(100),
                SqlValue::int(7),
            ]
        );
    }

    #[test]
    fn update_with_no_fields_is_rejected() {
        let err = update("work_experience", 3, ChangeSet::new()).unwrap_err();
        assert!(matches!(err, AppError::EmptyUpdate));
    }

    #[test]
    fn explicit_null_is_included_and_absent_fields_are_skipped() {
        let mut changes = ChangeSet::new();
        changes.text("description", &Patch::Null);
        changes.text("category", &Patch::Absent);
        changes.int("progress_percentage", &Patch::Value(40));
        let q = update("careers", 1, changes).unwrap();
        assert_eq!(
            q.sql,
            "UPDATE careers SET description = $1, progress_percentage = $2, \
             updated_at = CURRENT_TIMESTAMP WHERE id = $3 RETURNING *"
        );
        assert_eq!(q.params[0], SqlValue::Text(None));
    }

    #[test]
    fn placeholder_count_is_field_count_plus_identity() {
        let mut changes = ChangeSet::new();
        changes.text("title", &Patch::Value("engineer".to_string()));
        changes.flag("is_public", &Patch::Value(false));
        changes.text_array("tags", &Patch::Value(vec!["rust".to_string()]));
        let field_count = changes.len();
        let q = update("careers", 9, changes).unwrap();
        let indices = placeholder_indices(&q.sql);
        assert_eq!(indices.len(), field_count + 1);
        assert_eq!(indices, (1..=field_count as u32 + 1).collect::<Vec<_>>());
        assert_eq!(q.params.len(), indices.len());
        assert_eq!(*q.params.last().unwrap(), SqlValue::int(9));
    }

    #[test]
    fn select_list_without_filters_pages_only() {
        let q = select_list("careers", Vec::new(), "created_at DESC", 50, 0);
        assert_eq!(
            q.sql,
            "SELECT * FROM careers ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        assert_eq!(q.params, vec![SqlValue::big_int(50), SqlValue::big_int(0)]);
    }

    #[test]
    fn select_list_numbers_filters_before_paging() {
        let filters = vec![
            Filter::Eq("employment_type", SqlValue::text("full_time")),
            Filter::ILike("company_name", "%acme%".to_string()),
        ];
        let q = select_list(
            "work_experience",
            filters,
            "start_date DESC, is_current DESC",
            10,
            20,
        );
        assert_eq!(
            q.sql,
            "SELECT * FROM work_experience WHERE employment_type = $1 AND company_name ILIKE $2 \
             ORDER BY start_date DESC, is_current DESC LIMIT $3 OFFSET $4"
        );
        assert_eq!(q.params.len(), 4);
    }
}
