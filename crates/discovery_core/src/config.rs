use std::time::Duration;

use crate::MediaKind;

/// Provider hard limit on addressable result pages.
pub const PAGE_CEILING: u32 = 500;

/// Which slice of the provider catalog search and browse run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Catalog {
    /// Multi-type search plus the trending feed.
    #[default]
    All,
    Movies,
    Series,
}

impl Catalog {
    /// The kind every result has when the endpoints only return one type.
    pub fn single_kind(self) -> Option<MediaKind> {
        match self {
            Catalog::All => None,
            Catalog::Movies => Some(MediaKind::Movie),
            Catalog::Series => Some(MediaKind::Series),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    pub debounce: Duration,
    pub suggestion_debounce: Duration,
    pub suggestion_limit: usize,
    pub suggestion_min_chars: usize,
    pub page_ceiling: u32,
    pub catalog: Catalog,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            suggestion_debounce: Duration::from_millis(300),
            suggestion_limit: 8,
            suggestion_min_chars: 2,
            page_ceiling: PAGE_CEILING,
            catalog: Catalog::default(),
        }
    }
}
