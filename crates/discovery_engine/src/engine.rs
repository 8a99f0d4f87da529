use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use discovery_core::{Lane, RequestToken};
use engine_logging::{engine_debug, engine_info, engine_warn};
use tokio::sync::mpsc as async_mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::details::details_any;
use crate::provider::run_request;
use crate::{EngineCommand, EngineEvent, FetchError, Provider};

/// Owns the engine thread and its tokio runtime.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(provider: Arc<dyn Provider>, events: mpsc::Sender<EngineEvent>) -> io::Result<Self> {
        let (cmd_tx, mut cmd_rx) = async_mpsc::unbounded_channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("discovery-engine".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    let mut dispatcher = Dispatcher::new(provider, events);
                    while let Some(command) = cmd_rx.recv().await {
                        if matches!(command, EngineCommand::Shutdown) {
                            break;
                        }
                        dispatcher.handle(command);
                    }
                    dispatcher.shutdown();
                    engine_info!("engine stopped");
                });
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("engine thread is gone; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }
}

struct InFlight {
    token: RequestToken,
    cancel: CancellationToken,
}

/// Executes engine commands on the current tokio runtime.
///
/// Each lane has at most one debounce timer and one in-flight fetch. A new
/// timer replaces the old one; a new fetch cancels the old one, whose task
/// then reports `FailureKind::Cancelled`.
pub struct Dispatcher {
    provider: Arc<dyn Provider>,
    events: mpsc::Sender<EngineEvent>,
    timers: HashMap<Lane, JoinHandle<()>>,
    in_flight: HashMap<Lane, InFlight>,
}

impl Dispatcher {
    pub fn new(provider: Arc<dyn Provider>, events: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            provider,
            events,
            timers: HashMap::new(),
            in_flight: HashMap::new(),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::ScheduleDebounce {
                lane,
                generation,
                delay,
            } => {
                self.cancel_timer(lane);
                let events = self.events.clone();
                let timer = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = events.send(EngineEvent::DebounceElapsed { lane, generation });
                });
                self.timers.insert(lane, timer);
            }
            EngineCommand::CancelDebounce { lane } => self.cancel_timer(lane),
            EngineCommand::Fetch {
                lane,
                token,
                request,
            } => {
                if let Some(previous) = self.in_flight.remove(&lane) {
                    previous.cancel.cancel();
                }
                let cancel = CancellationToken::new();
                let guard = cancel.clone();
                let provider = self.provider.clone();
                let events = self.events.clone();
                engine_debug!(
                    "fetch lane={:?} token={} request={:?}",
                    lane,
                    token.raw(),
                    request
                );
                tokio::spawn(async move {
                    let result = tokio::select! {
                        biased;
                        _ = guard.cancelled() => Err(FetchError::cancelled()),
                        result = run_request(provider.as_ref(), &request) => result,
                    };
                    match &result {
                        Err(err) if err.is_cancelled() => {
                            engine_debug!("fetch cancelled lane={:?} token={}", lane, token.raw());
                        }
                        Err(err) => {
                            engine_warn!(
                                "fetch failed lane={:?} token={}: {}",
                                lane,
                                token.raw(),
                                err
                            );
                        }
                        Ok(_) => {}
                    }
                    let _ = events.send(EngineEvent::FetchCompleted {
                        lane,
                        token,
                        result,
                    });
                });
                self.in_flight.insert(lane, InFlight { token, cancel });
            }
            EngineCommand::CancelFetch { lane, token } => {
                if self
                    .in_flight
                    .get(&lane)
                    .is_some_and(|in_flight| in_flight.token == token)
                {
                    if let Some(in_flight) = self.in_flight.remove(&lane) {
                        in_flight.cancel.cancel();
                    }
                }
            }
            EngineCommand::FetchDetails { id } => {
                let provider = self.provider.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let result = details_any(provider.as_ref(), id).await;
                    if let Err(err) = &result {
                        engine_warn!("details lookup failed id={}: {}", id, err);
                    }
                    let _ = events.send(EngineEvent::DetailsCompleted { id, result });
                });
            }
            EngineCommand::Shutdown => self.shutdown(),
        }
    }

    /// Drop every timer and cancel every in-flight fetch.
    ///
    /// Terminal: the coordinator ignores `Cancelled` completions, so a lane
    /// whose current fetch is cancelled here stays loading. Only use this when
    /// the coordinator is going away with it.
    pub fn shutdown(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
        for (_, in_flight) in self.in_flight.drain() {
            in_flight.cancel.cancel();
        }
    }

    fn cancel_timer(&mut self, lane: Lane) {
        if let Some(timer) = self.timers.remove(&lane) {
            timer.abort();
        }
    }
}
