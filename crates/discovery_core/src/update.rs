use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => state.mount(),
        Msg::QueryTextChanged(text) => state.set_query_text(text),
        Msg::QuerySubmitted(text) => state.submit(text),
        Msg::DebounceElapsed { lane, generation } => state.debounce_elapsed(lane, generation),
        Msg::PageRequested(page) => state.load_page(page),
        Msg::NextPage => state.next_page(),
        Msg::PreviousPage => state.previous_page(),
        Msg::ClearClicked => state.clear(),
        Msg::SuggestionsDismissed => {
            state.dismiss_suggestions();
            Vec::new()
        }
        Msg::FetchCompleted {
            lane,
            token,
            result,
        } => {
            state.apply_fetch(lane, token, result);
            Vec::new()
        }
        Msg::Unmounted => state.unmount(),
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
