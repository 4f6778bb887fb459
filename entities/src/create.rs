use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::genre::Genre;

/// Untyped album payload as it arrives over the wire. The release date stays
/// a string until [`AlbumCreate::validate`] coerces it.
#[derive(Clone, Debug, Deserialize)]
pub struct AlbumCreate {
    pub title: String,
    pub release_date: String,
}

/// Untyped band payload. Genre is free text here; validation normalizes the
/// casing and resolves it against the closed enumeration.
#[derive(Clone, Debug, Deserialize)]
pub struct BandCreate {
    pub name: String,
    pub genre: String,
    #[serde(default)]
    pub albums: Option<Vec<AlbumCreate>>,
}

/// Validated album input, ready for storage. No id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAlbum {
    pub title: String,
    pub release_date: NaiveDate,
}

/// Validated band input with its nested albums.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBand {
    pub name: String,
    pub genre: Genre,
    pub albums: Vec<NewAlbum>,
}

impl AlbumCreate {
    pub fn validate(&self) -> Result<NewAlbum, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        let release_date = NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d")
            .map_err(|_| ValidationError::BadDate(self.release_date.clone()))?;
        Ok(NewAlbum {
            title: self.title.clone(),
            release_date,
        })
    }
}

impl BandCreate {
    /// Normalizes and coerces the payload into a [`NewBand`], or fails on the
    /// first field that cannot be coerced. Runs before anything is persisted.
    pub fn validate(&self) -> Result<NewBand, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        let genre = Genre::parse(&self.genre)?;
        let albums = self
            .albums
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(AlbumCreate::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NewBand {
            name: self.name.clone(),
            genre,
            albums,
        })
    }
}
