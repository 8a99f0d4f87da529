use crate::item::{normalize_item, normalize_page};
use crate::pagination::visible_pages;
use crate::slot::{DebounceSlot, RequestSlot};
use crate::view_model::{AppViewModel, SuggestionsView};
use crate::{
    CoordinatorConfig, Effect, FetchFailure, FetchRequest, Lane, ProviderPage, RequestToken,
    ResultItem,
};

/// User-visible message for any provider failure on the results lane.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load results";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browse,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Debouncing,
    Loading,
    Loaded,
    Errored,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Suggestions {
    items: Vec<ResultItem>,
    visible: bool,
    debounce: DebounceSlot,
    requests: RequestSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    config: CoordinatorConfig,
    raw_text: String,
    committed_query: String,
    page: u32,
    mode: Mode,
    total_pages: u32,
    total_results: u64,
    items: Vec<ResultItem>,
    loaded: bool,
    error: Option<String>,
    debounce: DebounceSlot,
    requests: RequestSlot,
    suggestions: Suggestions,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(CoordinatorConfig::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CoordinatorConfig) -> Self {
        Self {
            config,
            raw_text: String::new(),
            committed_query: String::new(),
            page: 1,
            mode: Mode::Browse,
            total_pages: 0,
            total_results: 0,
            items: Vec::new(),
            loaded: false,
            error: None,
            debounce: DebounceSlot::default(),
            requests: RequestSlot::default(),
            suggestions: Suggestions::default(),
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            raw_text: self.raw_text.clone(),
            committed_query: self.committed_query.clone(),
            mode: self.mode,
            phase: self.phase(),
            items: self.items.clone(),
            loading: self.loading(),
            error: self.error.clone(),
            page: self.page,
            total_pages: self.total_pages,
            total_results: self.total_results,
            pages: visible_pages(self.page, self.total_pages),
            suggestions: SuggestionsView {
                items: self.suggestions.items.clone(),
                loading: self.suggestions.requests.in_flight(),
                visible: self.suggestions.visible,
            },
            dirty: self.dirty,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn loading(&self) -> bool {
        self.requests.in_flight()
    }

    pub fn phase(&self) -> Phase {
        if self.requests.in_flight() {
            Phase::Loading
        } else if self.debounce.is_pending() {
            Phase::Debouncing
        } else if self.error.is_some() {
            Phase::Errored
        } else if self.loaded {
            Phase::Loaded
        } else {
            Phase::Idle
        }
    }

    /// Returns and clears the dirty flag (used to throttle rendering).
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mount(&mut self) -> Vec<Effect> {
        self.start_fetch()
    }

    pub(crate) fn set_query_text(&mut self, text: String) -> Vec<Effect> {
        if text == self.raw_text {
            return Vec::new();
        }
        self.raw_text = text.clone();
        self.dirty = true;

        let generation = self.debounce.restart(text.clone());
        let suggestion_generation = self.suggestions.debounce.restart(text);
        vec![
            Effect::ScheduleDebounce {
                lane: Lane::Results,
                generation,
                delay: self.config.debounce,
            },
            Effect::ScheduleDebounce {
                lane: Lane::Suggestions,
                generation: suggestion_generation,
                delay: self.config.suggestion_debounce,
            },
        ]
    }

    pub(crate) fn submit(&mut self, text: String) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.debounce.cancel() {
            effects.push(Effect::CancelDebounce {
                lane: Lane::Results,
            });
        }
        effects.extend(self.reset_suggestions());
        self.raw_text = text.clone();
        effects.extend(self.commit(&text));
        effects
    }

    pub(crate) fn debounce_elapsed(&mut self, lane: Lane, generation: u64) -> Vec<Effect> {
        match lane {
            Lane::Results => match self.debounce.take(generation) {
                Some(text) => self.commit(&text),
                None => Vec::new(),
            },
            Lane::Suggestions => match self.suggestions.debounce.take(generation) {
                Some(text) => self.request_suggestions(&text),
                None => Vec::new(),
            },
        }
    }

    /// Set the committed query and derive the mode from it.
    fn commit(&mut self, text: &str) -> Vec<Effect> {
        let query = text.trim();
        self.mode = if query.is_empty() {
            Mode::Browse
        } else {
            Mode::Search
        };
        self.committed_query = query.to_owned();
        self.page = 1;
        self.start_fetch()
    }

    pub(crate) fn load_page(&mut self, requested: u32) -> Vec<Effect> {
        let target = self.clamp_page(requested);
        if target == self.page || self.loading() {
            return Vec::new();
        }
        self.page = target;
        self.start_fetch()
    }

    pub(crate) fn next_page(&mut self) -> Vec<Effect> {
        self.load_page(self.page.saturating_add(1))
    }

    pub(crate) fn previous_page(&mut self) -> Vec<Effect> {
        self.load_page(self.page.saturating_sub(1))
    }

    fn clamp_page(&self, requested: u32) -> u32 {
        let last = self.total_pages.min(self.config.page_ceiling).max(1);
        requested.clamp(1, last)
    }

    pub(crate) fn clear(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.debounce.cancel() {
            effects.push(Effect::CancelDebounce {
                lane: Lane::Results,
            });
        }
        effects.extend(self.reset_suggestions());
        self.raw_text.clear();
        self.committed_query.clear();
        self.page = 1;
        self.mode = Mode::Browse;
        effects.extend(self.start_fetch());
        effects
    }

    pub(crate) fn unmount(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.debounce.cancel() {
            effects.push(Effect::CancelDebounce {
                lane: Lane::Results,
            });
        }
        if let Some(token) = self.requests.cancel() {
            effects.push(Effect::CancelFetch {
                lane: Lane::Results,
                token,
            });
        }
        effects.extend(self.reset_suggestions());
        self.dirty = true;
        effects
    }

    /// Supersede whatever is in flight on the results lane and fetch the
    /// current page for the current mode.
    fn start_fetch(&mut self) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        let (superseded, token) = self.requests.begin();
        if let Some(old) = superseded {
            effects.push(Effect::CancelFetch {
                lane: Lane::Results,
                token: old,
            });
        }
        self.error = None;
        self.dirty = true;

        let catalog = self.config.catalog;
        let request = match self.mode {
            Mode::Search => FetchRequest::Search {
                catalog,
                query: self.committed_query.clone(),
                page: self.page,
            },
            Mode::Browse => FetchRequest::Browse {
                catalog,
                page: self.page,
            },
        };
        effects.push(Effect::Fetch {
            lane: Lane::Results,
            token,
            request,
        });
        effects
    }

    pub(crate) fn apply_fetch(
        &mut self,
        lane: Lane,
        token: RequestToken,
        result: Result<ProviderPage, FetchFailure>,
    ) {
        // Cancelled requests never touch state, current or not.
        if matches!(result, Err(FetchFailure::Cancelled)) {
            return;
        }
        match lane {
            Lane::Results => self.apply_results(token, result),
            Lane::Suggestions => self.apply_suggestions(token, result),
        }
    }

    fn apply_results(&mut self, token: RequestToken, result: Result<ProviderPage, FetchFailure>) {
        if !self.requests.accept(token) {
            return;
        }
        match result {
            Ok(raw) => {
                let page = normalize_page(raw, self.config.catalog, self.config.page_ceiling);
                self.items = page.items;
                self.page = page.page;
                self.total_pages = page.total_pages;
                self.total_results = page.total_results;
                self.loaded = true;
            }
            Err(_) => {
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        self.dirty = true;
    }

    fn request_suggestions(&mut self, text: &str) -> Vec<Effect> {
        let query = text.trim();
        if query.chars().count() < self.config.suggestion_min_chars {
            let mut effects = Vec::new();
            if let Some(token) = self.suggestions.requests.cancel() {
                effects.push(Effect::CancelFetch {
                    lane: Lane::Suggestions,
                    token,
                });
            }
            self.suggestions.items.clear();
            self.suggestions.visible = false;
            self.dirty = true;
            return effects;
        }

        let mut effects = Vec::with_capacity(2);
        let (superseded, token) = self.suggestions.requests.begin();
        if let Some(old) = superseded {
            effects.push(Effect::CancelFetch {
                lane: Lane::Suggestions,
                token: old,
            });
        }
        effects.push(Effect::Fetch {
            lane: Lane::Suggestions,
            token,
            request: FetchRequest::Search {
                catalog: self.config.catalog,
                query: query.to_owned(),
                page: 1,
            },
        });
        self.dirty = true;
        effects
    }

    fn apply_suggestions(
        &mut self,
        token: RequestToken,
        result: Result<ProviderPage, FetchFailure>,
    ) {
        if !self.suggestions.requests.accept(token) {
            return;
        }
        if let Ok(raw) = result {
            let catalog = self.config.catalog;
            self.suggestions.items = raw
                .results
                .into_iter()
                .filter_map(|item| normalize_item(item, catalog))
                .take(self.config.suggestion_limit)
                .collect();
            self.suggestions.visible = !self.suggestions.items.is_empty();
        }
        self.dirty = true;
    }

    pub(crate) fn dismiss_suggestions(&mut self) {
        if self.suggestions.visible {
            self.suggestions.visible = false;
            self.dirty = true;
        }
    }

    /// Cancel the suggestion lane and hide the dropdown.
    fn reset_suggestions(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.suggestions.debounce.cancel() {
            effects.push(Effect::CancelDebounce {
                lane: Lane::Suggestions,
            });
        }
        if let Some(token) = self.suggestions.requests.cancel() {
            effects.push(Effect::CancelFetch {
                lane: Lane::Suggestions,
                token,
            });
        }
        self.suggestions.items.clear();
        self.suggestions.visible = false;
        effects
    }
}
