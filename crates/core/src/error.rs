/// Errors produced by the pure transformations in this crate.
///
/// Conversion itself is total; the only failure paths are JSON encoding and
/// decoding at the edges.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("ADF JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
