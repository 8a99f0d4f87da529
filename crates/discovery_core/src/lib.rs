//! Discovery core: the query coordinator as a pure state machine.
//!
//! `update` takes the state and a message and returns the new state plus the
//! effects (timers, fetches, cancellations) a driver must run. Responses come
//! back as messages tagged with the request token that produced them; only the
//! lane's current token is accepted.
mod config;
mod effect;
mod item;
mod msg;
mod pagination;
mod slot;
mod state;
mod update;
mod view_model;

pub use config::{Catalog, CoordinatorConfig, PAGE_CEILING};
pub use effect::{Effect, FetchRequest};
pub use item::{
    normalize_item, normalize_page, ItemId, MediaKind, ProviderItem, ProviderKind, ProviderPage,
    ResultItem, ResultPage,
};
pub use msg::{FetchFailure, Msg};
pub use pagination::{has_next, has_previous, visible_pages, PageSlot};
pub use slot::{Lane, RequestToken};
pub use state::{AppState, Mode, Phase, LOAD_ERROR_MESSAGE};
pub use update::update;
pub use view_model::{AppViewModel, SuggestionsView};
