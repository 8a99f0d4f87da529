//! TMDB JSON payloads and their conversion into canonical records.
//!
//! Movies and series name the same things differently (`title` vs `name`,
//! `release_date` vs `first_air_date`); both are folded here so nothing
//! downstream has to branch on them.

use discovery_core::{ItemId, MediaKind, ProviderItem, ProviderKind, ProviderPage};
use serde::Deserialize;

use crate::DetailRecord;

#[derive(Debug, Deserialize)]
pub(crate) struct WirePage {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    results: Vec<WireItem>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u64,
}

#[derive(Debug, Deserialize)]
struct WireItem {
    id: ItemId,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f64>,
    media_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireGenre {
    name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireDetails {
    id: ItemId,
    title: Option<String>,
    name: Option<String>,
    overview: Option<String>,
    tagline: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    episode_run_time: Vec<u32>,
    vote_average: Option<f64>,
    status: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    #[serde(default)]
    genres: Vec<WireGenre>,
}

impl From<WirePage> for ProviderPage {
    fn from(wire: WirePage) -> Self {
        ProviderPage {
            page: wire.page,
            results: wire.results.into_iter().map(ProviderItem::from).collect(),
            total_pages: wire.total_pages,
            total_results: wire.total_results,
        }
    }
}

impl From<WireItem> for ProviderItem {
    fn from(wire: WireItem) -> Self {
        ProviderItem {
            id: wire.id,
            title: first_present(wire.title, wire.name),
            release_date: first_present(wire.release_date, wire.first_air_date),
            poster_path: present(wire.poster_path),
            vote_average: wire.vote_average,
            kind: parse_kind(wire.media_type.as_deref()),
        }
    }
}

impl WireDetails {
    pub(crate) fn into_record(self, kind: MediaKind) -> DetailRecord {
        let release_date = first_present(self.release_date, self.first_air_date);
        DetailRecord {
            id: self.id,
            kind,
            title: first_present(self.title, self.name),
            year: release_date
                .as_deref()
                .and_then(|date| date.get(..4))
                .and_then(|year| year.parse().ok()),
            overview: present(self.overview),
            tagline: present(self.tagline),
            genres: self.genres.into_iter().map(|genre| genre.name).collect(),
            runtime_minutes: self
                .runtime
                .filter(|minutes| *minutes > 0)
                .or_else(|| self.episode_run_time.first().copied()),
            rating: self.vote_average,
            status: present(self.status),
            poster_path: present(self.poster_path),
            backdrop_path: present(self.backdrop_path),
        }
    }
}

fn parse_kind(media_type: Option<&str>) -> ProviderKind {
    match media_type {
        None => ProviderKind::Unspecified,
        Some("movie") => ProviderKind::Movie,
        Some("tv") => ProviderKind::Tv,
        Some("person") => ProviderKind::Person,
        Some(_) => ProviderKind::Other,
    }
}

/// TMDB sends empty strings for unknown values.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn first_present(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    present(primary).or_else(|| present(fallback))
}
