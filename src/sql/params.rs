//! Typed parameter values for statements built at runtime.

use chrono::NaiveDate;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

/// A positional parameter for a dynamically built statement. Each variant
/// carries its PostgreSQL type, so an explicit NULL still binds with the
/// type of the column it targets.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i32>),
    BigInt(Option<i64>),
    Float(Option<f64>),
    Bool(Option<bool>),
    Date(Option<NaiveDate>),
    TextArray(Option<Vec<String>>),
}

impl SqlValue {
    pub fn text(s: impl Into<String>) -> Self {
        SqlValue::Text(Some(s.into()))
    }

    pub fn int(n: i32) -> Self {
        SqlValue::Int(Some(n))
    }

    pub fn big_int(n: i64) -> Self {
        SqlValue::BigInt(Some(n))
    }

    pub fn flag(b: bool) -> Self {
        SqlValue::Bool(Some(b))
    }
}

impl<'q> Encode<'q, Postgres> for SqlValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            SqlValue::Text(v) => <Option<String> as Encode<Postgres>>::encode_by_ref(v, buf)?,
            SqlValue::Int(v) => <Option<i32> as Encode<Postgres>>::encode_by_ref(v, buf)?,
            SqlValue::BigInt(v) => <Option<i64> as Encode<Postgres>>::encode_by_ref(v, buf)?,
            SqlValue::Float(v) => <Option<f64> as Encode<Postgres>>::encode_by_ref(v, buf)?,
            SqlValue::Bool(v) => <Option<bool> as Encode<Postgres>>::encode_by_ref(v, buf)?,
            SqlValue::Date(v) => <Option<NaiveDate> as Encode<Postgres>>::encode_by_ref(v, buf)?,
            SqlValue::TextArray(v) => {
                <Option<Vec<String>> as Encode<Postgres>>::encode_by_ref(v, buf)?
            }
        })
    }

    fn produces(&self) -> Option<<Postgres as Database>::TypeInfo> {
        Some(match self {
            SqlValue::Text(_) => <String as sqlx::Type<Postgres>>::type_info(),
            SqlValue::Int(_) => <i32 as sqlx::Type<Postgres>>::type_info(),
            SqlValue::BigInt(_) => <i64 as sqlx::Type<Postgres>>::type_info(),
            SqlValue::Float(_) => <f64 as sqlx::Type<Postgres>>::type_info(),
            SqlValue::Bool(_) => <bool as sqlx::Type<Postgres>>::type_info(),
            SqlValue::Date(_) => <NaiveDate as sqlx::Type<Postgres>>::type_info(),
            SqlValue::TextArray(_) => <Vec<String> as sqlx::Type<Postgres>>::type_info(),
        })
    }
}

impl sqlx::Type<Postgres> for SqlValue {
    fn type_info() -> PgTypeInfo {
        // Fallback only; `produces` always reports the variant's real type.
        <String as sqlx::Type<Postgres>>::type_info()
    }
}
