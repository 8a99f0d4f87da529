use crate::{Mode, PageSlot, Phase, ResultItem};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuggestionsView {
    pub items: Vec<ResultItem>,
    pub loading: bool,
    pub visible: bool,
}

/// Everything a presentation layer reads from the coordinator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub raw_text: String,
    pub committed_query: String,
    pub mode: Mode,
    pub phase: Phase,
    pub items: Vec<ResultItem>,
    pub loading: bool,
    pub error: Option<String>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub pages: Vec<PageSlot>,
    pub suggestions: SuggestionsView,
    pub dirty: bool,
}
