use discovery_core::{ItemId, MediaKind};

use crate::{FetchError, Provider};

/// Everything the details/watch view shows about one title.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    pub id: ItemId,
    pub kind: MediaKind,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub genres: Vec<String>,
    /// Movie runtime, or the first listed episode length for series.
    pub runtime_minutes: Option<u32>,
    pub rating: Option<f64>,
    pub status: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// Resolve an id whose kind is unknown: try it as a movie, then as a series.
///
/// Movie and series ids live in separate namespaces, so a bare id from a
/// link may be either. The series error is returned when both fail.
pub async fn details_any(provider: &dyn Provider, id: ItemId) -> Result<DetailRecord, FetchError> {
    match provider.details(MediaKind::Movie, id).await {
        Ok(record) => Ok(record),
        Err(err) if err.is_cancelled() => Err(err),
        Err(_) => provider.details(MediaKind::Series, id).await,
    }
}
