use std::collections::HashMap;

use entities::{Album, Band, Genre};
use serde::Serialize;

/// A band with its albums nested, as every endpoint returns it.
#[derive(Clone, Debug, Serialize)]
pub struct BandResponse {
    pub id: i64,
    pub name: String,
    pub genre: Genre,
    pub albums: Vec<Album>,
}

impl BandResponse {
    pub fn from_band(band: Band, albums: Vec<Album>) -> Self {
        Self {
            id: band.id,
            name: band.name,
            genre: band.genre,
            albums,
        }
    }

    /// Groups a flat album list by band_id and attaches each group to its
    /// band, preserving band order.
    pub fn from_band_list(bands: Vec<Band>, albums: Vec<Album>) -> Vec<Self> {
        let mut by_band: HashMap<i64, Vec<Album>> = HashMap::new();
        for album in albums {
            by_band.entry(album.band_id).or_default().push(album);
        }
        bands
            .into_iter()
            .map(|band| {
                let albums = by_band.remove(&band.id).unwrap_or_default();
                Self::from_band(band, albums)
            })
            .collect()
    }
}
