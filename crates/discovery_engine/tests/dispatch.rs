use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use discovery_core::{
    update, AppState, Catalog, Effect, FetchFailure, FetchRequest, ItemId, Lane, MediaKind, Msg,
    ProviderItem, ProviderKind, ProviderPage, RequestToken,
};
use discovery_engine::{
    DetailRecord, Dispatcher, EngineCommand, EngineEvent, FailureKind, FetchError, Provider,
};

/// Answers searches after a per-query delay: queries starting with "slow"
/// take a second, everything else is immediate.
#[derive(Default)]
struct ScriptedProvider {
    searches: AtomicUsize,
}

fn page_titled(title: &str) -> ProviderPage {
    ProviderPage {
        page: 1,
        results: vec![ProviderItem {
            id: 1,
            title: Some(title.to_string()),
            release_date: None,
            poster_path: Some("/p.jpg".to_string()),
            vote_average: None,
            kind: ProviderKind::Movie,
        }],
        total_pages: 1,
        total_results: 1,
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    async fn search(
        &self,
        _catalog: Catalog,
        query: &str,
        _page: u32,
    ) -> Result<ProviderPage, FetchError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if query.starts_with("slow") {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        if query == "broken" {
            return Err(FetchError::new(FailureKind::HttpStatus(500), "boom"));
        }
        Ok(page_titled(query))
    }

    async fn browse(&self, _catalog: Catalog, _page: u32) -> Result<ProviderPage, FetchError> {
        Ok(page_titled("trending"))
    }

    async fn details(&self, kind: MediaKind, id: ItemId) -> Result<DetailRecord, FetchError> {
        Err(FetchError::new(FailureKind::NotFound, format!("{kind:?} {id} unknown")))
    }
}

fn dispatcher() -> (Dispatcher, Arc<ScriptedProvider>, mpsc::Receiver<EngineEvent>) {
    let provider = Arc::new(ScriptedProvider::default());
    let (tx, rx) = mpsc::channel();
    (Dispatcher::new(provider.clone(), tx), provider, rx)
}

fn search(query: &str) -> FetchRequest {
    FetchRequest::Search {
        catalog: Catalog::All,
        query: query.to_string(),
        page: 1,
    }
}

fn drain(rx: &mpsc::Receiver<EngineEvent>) -> Vec<EngineEvent> {
    rx.try_iter().collect()
}

#[tokio::test(start_paused = true)]
async fn rescheduled_debounce_fires_once() {
    let (mut dispatcher, _, rx) = dispatcher();

    for generation in 1..=5 {
        dispatcher.handle(EngineCommand::ScheduleDebounce {
            lane: Lane::Results,
            generation,
            delay: Duration::from_millis(300),
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(drain(&rx).is_empty());

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(
        drain(&rx),
        vec![EngineEvent::DebounceElapsed {
            lane: Lane::Results,
            generation: 5,
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn lanes_have_independent_timers() {
    let (mut dispatcher, _, rx) = dispatcher();

    dispatcher.handle(EngineCommand::ScheduleDebounce {
        lane: Lane::Results,
        generation: 1,
        delay: Duration::from_millis(300),
    });
    dispatcher.handle(EngineCommand::ScheduleDebounce {
        lane: Lane::Suggestions,
        generation: 1,
        delay: Duration::from_millis(300),
    });
    dispatcher.handle(EngineCommand::CancelDebounce {
        lane: Lane::Results,
    });

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(
        drain(&rx),
        vec![EngineEvent::DebounceElapsed {
            lane: Lane::Suggestions,
            generation: 1,
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn new_fetch_cancels_the_previous_one() {
    let (mut dispatcher, _, rx) = dispatcher();
    let first = RequestToken::from_raw(1);
    let second = RequestToken::from_raw(2);

    dispatcher.handle(EngineCommand::Fetch {
        lane: Lane::Results,
        token: first,
        request: search("slow alien"),
    });
    tokio::task::yield_now().await;
    dispatcher.handle(EngineCommand::Fetch {
        lane: Lane::Results,
        token: second,
        request: search("aliens"),
    });

    tokio::time::sleep(Duration::from_secs(2)).await;
    let events = drain(&rx);
    assert_eq!(events.len(), 2);
    for event in events {
        match event {
            EngineEvent::FetchCompleted { token, result, .. } if token == first => {
                assert_eq!(result.unwrap_err().kind, FailureKind::Cancelled);
            }
            EngineEvent::FetchCompleted { token, result, .. } if token == second => {
                assert_eq!(result.unwrap().results[0].title.as_deref(), Some("aliens"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn stale_cancel_leaves_current_fetch_alone() {
    let (mut dispatcher, _, rx) = dispatcher();

    dispatcher.handle(EngineCommand::Fetch {
        lane: Lane::Suggestions,
        token: RequestToken::from_raw(2),
        request: search("slow bre"),
    });
    dispatcher.handle(EngineCommand::CancelFetch {
        lane: Lane::Suggestions,
        token: RequestToken::from_raw(1),
    });
    // A fetch on the other lane must not cancel this one either.
    dispatcher.handle(EngineCommand::Fetch {
        lane: Lane::Results,
        token: RequestToken::from_raw(2),
        request: search("bre"),
    });

    tokio::time::sleep(Duration::from_secs(2)).await;
    let events = drain(&rx);
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|event| matches!(
        event,
        EngineEvent::FetchCompleted { result: Ok(_), .. }
    )));
}

#[tokio::test(start_paused = true)]
async fn details_failure_is_reported() {
    let (mut dispatcher, _, rx) = dispatcher();

    dispatcher.handle(EngineCommand::FetchDetails { id: 7 });
    tokio::time::sleep(Duration::from_millis(10)).await;

    match drain(&rx).as_slice() {
        [EngineEvent::DetailsCompleted {
            id: 7,
            result: Err(err),
        }] => {
            assert_eq!(err.kind, FailureKind::NotFound);
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_everything_in_flight() {
    let (mut dispatcher, _, rx) = dispatcher();

    dispatcher.handle(EngineCommand::ScheduleDebounce {
        lane: Lane::Results,
        generation: 1,
        delay: Duration::from_millis(300),
    });
    dispatcher.handle(EngineCommand::Fetch {
        lane: Lane::Results,
        token: RequestToken::from_raw(1),
        request: search("slow heat"),
    });
    dispatcher.handle(EngineCommand::Shutdown);

    tokio::time::sleep(Duration::from_secs(2)).await;
    match drain(&rx).as_slice() {
        [EngineEvent::FetchCompleted {
            result: Err(err),
            ..
        }] => assert!(err.is_cancelled()),
        other => panic!("unexpected events {other:?}"),
    }
}

/// Feed engine events back into the coordinator the way the app does.
fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DebounceElapsed { lane, generation } => {
            Msg::DebounceElapsed { lane, generation }
        }
        EngineEvent::FetchCompleted {
            lane,
            token,
            result,
        } => Msg::FetchCompleted {
            lane,
            token,
            result: result.map_err(|err| {
                if err.is_cancelled() {
                    FetchFailure::Cancelled
                } else {
                    FetchFailure::Provider(err.to_string())
                }
            }),
        },
        EngineEvent::DetailsCompleted { .. } => Msg::NoOp,
    }
}

fn to_command(effect: Effect) -> EngineCommand {
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

async fn settle(
    mut state: AppState,
    dispatcher: &mut Dispatcher,
    rx: &mpsc::Receiver<EngineEvent>,
    wait: Duration,
) -> AppState {
    tokio::time::sleep(wait).await;
    for event in drain(rx) {
        let (next, effects) = update(state, to_msg(event));
        for effect in effects {
            dispatcher.handle(to_command(effect));
        }
        state = next;
    }
    state
}

#[tokio::test(start_paused = true)]
async fn typing_burst_issues_a_single_search() {
    let (mut dispatcher, provider, rx) = dispatcher();
    let mut state = AppState::new();

    for text in ["m", "ma", "mat", "matr", "matrix"] {
        let (next, effects) = update(state, Msg::QueryTextChanged(text.to_string()));
        for effect in effects {
            dispatcher.handle(to_command(effect));
        }
        state = next;
        tokio::time::sleep(Duration::from_millis(60)).await;
    }

    // Debounce fires, both lanes fetch, responses land.
    let state = settle(state, &mut dispatcher, &rx, Duration::from_millis(400)).await;
    let state = settle(state, &mut dispatcher, &rx, Duration::from_millis(10)).await;

    // One committed search plus one suggestion lookup.
    assert_eq!(provider.searches.load(Ordering::SeqCst), 2);
    let view = state.view();
    assert_eq!(view.committed_query, "matrix");
    assert_eq!(view.items[0].title, "matrix");
    assert_eq!(view.suggestions.items.len(), 1);
    assert!(!view.loading);
}

#[tokio::test(start_paused = true)]
async fn superseded_slow_search_never_lands() {
    let (mut dispatcher, _, rx) = dispatcher();

    let (state, effects) = update(
        AppState::new(),
        Msg::QuerySubmitted("slow heat".to_string()),
    );
    effects
        .into_iter()
        .for_each(|effect| dispatcher.handle(to_command(effect)));
    let (state, effects) = update(state, Msg::QuerySubmitted("ronin".to_string()));
    effects
        .into_iter()
        .for_each(|effect| dispatcher.handle(to_command(effect)));

    let state = settle(state, &mut dispatcher, &rx, Duration::from_secs(2)).await;

    let view = state.view();
    assert_eq!(view.items[0].title, "ronin");
    assert_eq!(view.error, None);
}

#[tokio::test(start_paused = true)]
async fn provider_error_surfaces_generic_message() {
    let (mut dispatcher, _, rx) = dispatcher();

    let (state, effects) = update(AppState::new(), Msg::QuerySubmitted("broken".to_string()));
    effects
        .into_iter()
        .for_each(|effect| dispatcher.handle(to_command(effect)));
    let state = settle(state, &mut dispatcher, &rx, Duration::from_millis(10)).await;

    assert_eq!(
        state.view().error.as_deref(),
        Some(discovery_core::LOAD_ERROR_MESSAGE)
    );
}
