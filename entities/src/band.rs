use serde::Serialize;
use sqlx::FromRow;

use crate::genre::Genre;

/// A band row. The id is assigned by storage on insert and never changes.
#[derive(Clone, Debug, PartialEq, Eq, FromRow, Serialize)]
pub struct Band {
    pub id: i64,
    pub name: String,
    pub genre: Genre,
}
