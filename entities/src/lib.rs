pub mod album;
pub mod band;
pub mod create;
pub mod error;
pub mod genre;

pub use album::Album;
pub use band::Band;
pub use create::{AlbumCreate, BandCreate, NewAlbum, NewBand};
pub use error::ValidationError;
pub use genre::Genre;
