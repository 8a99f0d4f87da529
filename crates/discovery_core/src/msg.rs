use crate::{Lane, ProviderPage, RequestToken};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The view came up; load the default browse listing.
    Mounted,
    /// User edited the search box (every keystroke).
    QueryTextChanged(String),
    /// User pressed enter: commit immediately, bypassing the debounce.
    QuerySubmitted(String),
    /// A debounce timer scheduled by `Effect::ScheduleDebounce` fired.
    DebounceElapsed {
        lane: Lane,
        generation: u64,
    },
    /// User picked a page from the pagination bar.
    PageRequested(u32),
    NextPage,
    PreviousPage,
    /// User clicked the clear button.
    ClearClicked,
    /// User dismissed the suggestion dropdown.
    SuggestionsDismissed,
    /// A fetch issued through `Effect::Fetch` finished.
    FetchCompleted {
        lane: Lane,
        token: RequestToken,
        result: Result<ProviderPage, FetchFailure>,
    },
    /// The view is going away; drop timers and requests.
    Unmounted,
    /// UI/render tick to coalesce rendering.
    Tick,
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The request was superseded or aborted. Never reported.
    Cancelled,
    Provider(String),
}
