use std::time::Duration;

use crate::{Catalog, Lane, RequestToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start (or restart) the lane's debounce timer. The driver answers with
    /// `Msg::DebounceElapsed` carrying the same generation.
    ScheduleDebounce {
        lane: Lane,
        generation: u64,
        delay: Duration,
    },
    CancelDebounce {
        lane: Lane,
    },
    Fetch {
        lane: Lane,
        token: RequestToken,
        request: FetchRequest,
    },
    CancelFetch {
        lane: Lane,
        token: RequestToken,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Search {
        catalog: Catalog,
        query: String,
        page: u32,
    },
    Browse {
        catalog: Catalog,
        page: u32,
    },
}

impl FetchRequest {
    pub fn page(&self) -> u32 {
        match self {
            FetchRequest::Search { page, .. } | FetchRequest::Browse { page, .. } => *page,
        }
    }
}
