use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use discovery_core::{Effect, FetchFailure, ItemId, Msg};
use discovery_engine::{EngineCommand, EngineEvent, EngineHandle, FetchError, Provider};
use engine_logging::engine_debug;

use super::app::AppEvent;

/// Executes coordinator effects on the engine and feeds its events back.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(provider: Arc<dyn Provider>, app_tx: mpsc::Sender<AppEvent>) -> io::Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::new(provider, event_tx)?;
        spawn_event_loop(event_rx, app_tx)?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.engine.send(command_for(effect));
        }
    }

    pub fn request_details(&self, id: ItemId) {
        self.engine.send(EngineCommand::FetchDetails { id });
    }
}

fn command_for(effect: Effect) -> EngineCommand {
    match effect {
        Effect::ScheduleDebounce {
            lane,
            generation,
            delay,
        } => EngineCommand::ScheduleDebounce {
            lane,
            generation,
            delay,
        },
        Effect::CancelDebounce { lane } => EngineCommand::CancelDebounce { lane },
        Effect::Fetch {
            lane,
            token,
            request,
        } => EngineCommand::Fetch {
            lane,
            token,
            request,
        },
        Effect::CancelFetch { lane, token } => EngineCommand::CancelFetch { lane, token },
    }
}

fn spawn_event_loop(
    event_rx: mpsc::Receiver<EngineEvent>,
    app_tx: mpsc::Sender<AppEvent>,
) -> io::Result<()> {
    thread::Builder::new()
        .name("discovery-events".to_string())
        .spawn(move || {
            for event in event_rx {
                if app_tx.send(app_event_for(event)).is_err() {
                    break;
                }
            }
            engine_debug!("engine event loop finished");
        })?;
    Ok(())
}

fn app_event_for(event: EngineEvent) -> AppEvent {
    match event {
        EngineEvent::DebounceElapsed { lane, generation } => {
            AppEvent::Core(Msg::DebounceElapsed { lane, generation })
        }
        EngineEvent::FetchCompleted {
            lane,
            token,
            result,
        } => AppEvent::Core(Msg::FetchCompleted {
            lane,
            token,
            result: result.map_err(fetch_failure),
        }),
        EngineEvent::DetailsCompleted { id, result } => AppEvent::Details { id, result },
    }
}

fn fetch_failure(err: FetchError) -> FetchFailure {
    if err.is_cancelled() {
        FetchFailure::Cancelled
    } else {
        FetchFailure::Provider(err.to_string())
    }
}
