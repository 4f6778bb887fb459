use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The closed set of genres a band can carry. Stored and serialized in the
/// canonical title-case form ("Rock", "Hip-Hop").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum Genre {
    Rock,
    Electronic,
    Metal,
    #[serde(rename = "Hip-Hop")]
    #[sqlx(rename = "Hip-Hop")]
    HipHop,
}

impl Genre {
    pub const ALL: [Genre; 4] = [Genre::Rock, Genre::Electronic, Genre::Metal, Genre::HipHop];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Rock => "Rock",
            Genre::Electronic => "Electronic",
            Genre::Metal => "Metal",
            Genre::HipHop => "Hip-Hop",
        }
    }

    /// Parses a free-text token. Runs title-casing first so any casing of a
    /// valid token ("rock", "ROCK", "hip-hop") lands on the same variant.
    pub fn parse(token: &str) -> Result<Genre, ValidationError> {
        match title_case(token).as_str() {
            "Rock" => Ok(Genre::Rock),
            "Electronic" => Ok(Genre::Electronic),
            "Metal" => Ok(Genre::Metal),
            "Hip-Hop" => Ok(Genre::HipHop),
            _ => Err(ValidationError::UnknownGenre(token.to_string())),
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uppercases the first letter of every word and lowercases the rest.
/// Any non-letter counts as a word boundary, so "hip-hop" becomes "Hip-Hop".
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut boundary = true;
    for c in input.chars() {
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }
    out
}
