use thiserror::Error;

/// Rejection raised while normalizing a creation payload, before anything
/// touches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("genre '{0}' is not one of Rock, Electronic, Metal, Hip-Hop")]
    UnknownGenre(String),
    #[error("'{0}' is not a valid date, expected YYYY-MM-DD")]
    BadDate(String),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}
