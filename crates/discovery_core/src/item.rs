use crate::Catalog;

pub type ItemId = u64;

/// Kind of title the coordinator is willing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Movie => "Movie",
            MediaKind::Series => "TV Show",
        }
    }
}

/// Media type as reported by the provider, before filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    Movie,
    Tv,
    Person,
    Other,
    /// Single-type endpoints omit the field entirely.
    #[default]
    Unspecified,
}

/// One provider record with `title`/`name` and the two date fields already
/// folded into single canonical fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderItem {
    pub id: ItemId,
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
    pub kind: ProviderKind,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderPage {
    pub page: u32,
    pub results: Vec<ProviderItem>,
    pub total_pages: u32,
    pub total_results: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub id: ItemId,
    pub title: String,
    pub year: Option<i32>,
    pub poster_path: String,
    pub rating: Option<f64>,
    pub kind: MediaKind,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultPage {
    pub items: Vec<ResultItem>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

/// Map a provider record to a displayable item, or drop it.
///
/// Items without a title or poster are dropped. Multi-type catalogs only keep
/// movies and series; single-type catalogs stamp their own kind on records
/// that carry no media type.
pub fn normalize_item(raw: ProviderItem, catalog: Catalog) -> Option<ResultItem> {
    let kind = match (raw.kind, catalog.single_kind()) {
        (ProviderKind::Movie, _) => MediaKind::Movie,
        (ProviderKind::Tv, _) => MediaKind::Series,
        (ProviderKind::Unspecified, Some(kind)) => kind,
        _ => return None,
    };
    let title = raw.title.filter(|title| !title.trim().is_empty())?;
    let poster_path = raw.poster_path.filter(|path| !path.trim().is_empty())?;

    Some(ResultItem {
        id: raw.id,
        year: raw.release_date.as_deref().and_then(parse_year),
        title,
        poster_path,
        rating: raw.vote_average,
        kind,
    })
}

/// Normalize a whole page, clamping `total_pages` to `page_ceiling`.
pub fn normalize_page(raw: ProviderPage, catalog: Catalog, page_ceiling: u32) -> ResultPage {
    ResultPage {
        items: raw
            .results
            .into_iter()
            .filter_map(|item| normalize_item(item, catalog))
            .collect(),
        page: raw.page.max(1),
        total_pages: raw.total_pages.min(page_ceiling),
        total_results: raw.total_results,
    }
}

fn parse_year(date: &str) -> Option<i32> {
    date.get(..4).and_then(|year| year.parse().ok())
}
