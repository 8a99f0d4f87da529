use std::fmt;
use std::time::Duration;

use discovery_core::{FetchRequest, ItemId, Lane, ProviderPage, RequestToken};

use crate::DetailRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
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
    /// Look up a title for the details view, movie first then series.
    FetchDetails {
        id: ItemId,
    },
    /// Stop the engine. Cancels every in-flight fetch; not resumable.
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    DebounceElapsed {
        lane: Lane,
        generation: u64,
    },
    FetchCompleted {
        lane: Lane,
        token: RequestToken,
        result: Result<ProviderPage, FetchError>,
    },
    DetailsCompleted {
        id: ItemId,
        result: Result<DetailRecord, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn cancelled() -> Self {
        Self::new(FailureKind::Cancelled, "request superseded")
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == FailureKind::Cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    NotFound,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Cancelled,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed payload"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
