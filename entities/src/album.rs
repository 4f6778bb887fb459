use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// An album row. Always owned by exactly one band through band_id.
#[derive(Clone, Debug, PartialEq, Eq, FromRow, Serialize)]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub band_id: i64,
}
