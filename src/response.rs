//! Response envelopes shared by the REST handlers.

use serde::Serialize;

/// Single-record envelope: `{"data": ...}`.
#[derive(Serialize)]
pub struct One<T> {
    pub data: T,
}

impl<T> One<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paged list envelope: `{"data": [...], "meta": {...}}`.
#[derive(Serialize)]
pub struct Many<T> {
    pub data: Vec<T>,
    pub meta: ListMeta,
}

#[derive(Serialize)]
pub struct ListMeta {
    pub total: usize,
    pub limit: i64,
    pub offset: i64,
}

impl<T> Many<T> {
    pub fn new(data: Vec<T>, limit: i64, offset: i64) -> Self {
        let total = data.len();
        Self {
            data,
            meta: ListMeta { total, limit, offset },
        }
    }
}

/// Deletion acknowledgement carrying the removed row.
#[derive(Serialize)]
pub struct Deleted<T> {
    pub message: &'static str,
    pub data: T,
}

impl<T> Deleted<T> {
    pub fn new(message: &'static str, data: T) -> Self {
        Self { message, data }
    }
}
