use discovery_core::{
    update, AppState, Catalog, Effect, FetchFailure, FetchRequest, Lane, Msg, ProviderItem,
    ProviderKind, ProviderPage, RequestToken,
};
use pretty_assertions::assert_eq;

fn suggestion_generation(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ScheduleDebounce {
                lane: Lane::Suggestions,
                generation,
                ..
            } => Some(*generation),
            _ => None,
        })
        .expect("suggestion debounce")
}

fn suggestion_fetch(effects: &[Effect]) -> Option<(RequestToken, FetchRequest)> {
    effects.iter().find_map(|effect| match effect {
        Effect::Fetch {
            lane: Lane::Suggestions,
            token,
            request,
        } => Some((*token, request.clone())),
        _ => None,
    })
}

fn results_token(effects: &[Effect]) -> RequestToken {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Fetch {
                lane: Lane::Results,
                token,
                ..
            } => Some(*token),
            _ => None,
        })
        .expect("results fetch")
}

/// Type `text` and let the suggestion timer fire.
fn type_and_settle(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    let (state, effects) = update(state, Msg::QueryTextChanged(text.to_string()));
    let generation = suggestion_generation(&effects);
    update(
        state,
        Msg::DebounceElapsed {
            lane: Lane::Suggestions,
            generation,
        },
    )
}

fn many_items(count: u64) -> ProviderPage {
    ProviderPage {
        page: 1,
        results: (1..=count)
            .map(|id| ProviderItem {
                id,
                title: Some(format!("Title {id}")),
                release_date: None,
                poster_path: Some(format!("/{id}.jpg")),
                vote_average: None,
                kind: ProviderKind::Tv,
            })
            .collect(),
        total_pages: 1,
        total_results: count,
    }
}

#[test]
fn suggestions_fetch_first_search_page() {
    let (state, effects) = type_and_settle(AppState::new(), " bre ");

    let (token, request) = suggestion_fetch(&effects).expect("suggestion fetch");
    assert_eq!(
        request,
        FetchRequest::Search {
            catalog: Catalog::All,
            query: "bre".to_string(),
            page: 1,
        }
    );
    assert!(state.view().suggestions.loading);
    // The results lane is untouched by the suggestion timer.
    assert!(!state.loading());

    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            lane: Lane::Suggestions,
            token,
            result: Ok(many_items(12)),
        },
    );
    let suggestions = state.view().suggestions;
    assert_eq!(suggestions.items.len(), 8);
    assert!(suggestions.visible);
    assert!(!suggestions.loading);
}

#[test]
fn short_input_hides_suggestions_without_fetching() {
    let (state, effects) = type_and_settle(AppState::new(), "b");

    assert_eq!(suggestion_fetch(&effects), None);
    assert!(!state.view().suggestions.visible);
}

#[test]
fn suggestion_failure_never_sets_main_error() {
    let (state, effects) = type_and_settle(AppState::new(), "bre");
    let (token, _) = suggestion_fetch(&effects).expect("suggestion fetch");

    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            lane: Lane::Suggestions,
            token,
            result: Err(FetchFailure::Provider("http status 500".to_string())),
        },
    );

    let view = state.view();
    assert_eq!(view.error, None);
    assert!(!view.suggestions.loading);
    assert!(!view.suggestions.visible);
}

#[test]
fn lanes_do_not_share_tokens() {
    // Results fetch in flight with token 1.
    let (state, effects) = update(AppState::new(), Msg::Mounted);
    let results = results_token(&effects);

    // Suggestion fetch also gets token 1 in its own slot.
    let (state, effects) = type_and_settle(state, "bre");
    let (suggestion, _) = suggestion_fetch(&effects).expect("suggestion fetch");
    assert_eq!(suggestion.raw(), results.raw());
    assert!(!effects.iter().any(|effect| matches!(
        effect,
        Effect::CancelFetch {
            lane: Lane::Results,
            ..
        }
    )));

    // Completing the suggestion does not resolve the results request.
    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            lane: Lane::Suggestions,
            token: suggestion,
            result: Ok(many_items(2)),
        },
    );
    assert!(state.loading());
    assert!(state.view().items.is_empty());

    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            lane: Lane::Results,
            token: results,
            result: Ok(many_items(3)),
        },
    );
    assert_eq!(state.view().items.len(), 3);
    assert_eq!(state.view().suggestions.items.len(), 2);
}

#[test]
fn newer_suggestion_request_supersedes_older() {
    let (state, effects) = type_and_settle(AppState::new(), "bre");
    let (first, _) = suggestion_fetch(&effects).expect("first fetch");
    let (state, effects) = type_and_settle(state, "breaking");
    let (second, _) = suggestion_fetch(&effects).expect("second fetch");
    assert!(effects.contains(&Effect::CancelFetch {
        lane: Lane::Suggestions,
        token: first,
    }));

    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            lane: Lane::Suggestions,
            token: first,
            result: Ok(many_items(5)),
        },
    );
    assert!(state.view().suggestions.items.is_empty());

    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            lane: Lane::Suggestions,
            token: second,
            result: Ok(many_items(1)),
        },
    );
    assert_eq!(state.view().suggestions.items.len(), 1);
}

#[test]
fn submit_and_dismiss_hide_dropdown() {
    let (state, effects) = type_and_settle(AppState::new(), "bre");
    let (token, _) = suggestion_fetch(&effects).expect("suggestion fetch");
    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            lane: Lane::Suggestions,
            token,
            result: Ok(many_items(3)),
        },
    );
    assert!(state.view().suggestions.visible);

    let (dismissed, effects) = update(state.clone(), Msg::SuggestionsDismissed);
    assert!(effects.is_empty());
    assert!(!dismissed.view().suggestions.visible);

    let (submitted, _) = update(state, Msg::QuerySubmitted("bre".to_string()));
    assert!(!submitted.view().suggestions.visible);
    assert!(submitted.view().suggestions.items.is_empty());
}
