//! Debounce and request bookkeeping shared by both lanes.

/// An independent debounce timer plus request slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Results,
    Suggestions,
}

/// Identifies one fetch attempt within a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Rebuild a token a driver echoed back through the engine.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Mints tokens and remembers which one is current.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestSlot {
    minted: u64,
    current: Option<RequestToken>,
}

impl RequestSlot {
    /// Start a new request. Returns the superseded token, if any, and the new one.
    pub fn begin(&mut self) -> (Option<RequestToken>, RequestToken) {
        self.minted += 1;
        let token = RequestToken(self.minted);
        (self.current.replace(token), token)
    }

    /// Invalidate the current request without starting another.
    pub fn cancel(&mut self) -> Option<RequestToken> {
        self.current.take()
    }

    /// Consume a completion. `false` means the token is stale and the
    /// response must be discarded.
    pub fn accept(&mut self, token: RequestToken) -> bool {
        if self.current == Some(token) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn in_flight(&self) -> bool {
        self.current.is_some()
    }
}

/// Holds the text waiting for a debounce timer to fire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DebounceSlot {
    generation: u64,
    pending: Option<String>,
}

impl DebounceSlot {
    /// Replace the pending text and return the generation the timer must echo.
    pub fn restart(&mut self, text: String) -> u64 {
        self.generation += 1;
        self.pending = Some(text);
        self.generation
    }

    /// Take the pending text if `generation` is the latest one.
    pub fn take(&mut self, generation: u64) -> Option<String> {
        if generation == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drop the pending text. Returns whether anything was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
