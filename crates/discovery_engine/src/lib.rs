//! Discovery engine: provider client, asset URLs and effect execution.
mod assets;
mod details;
mod engine;
mod provider;
mod types;
mod wire;

pub use assets::{AssetResolver, BACKDROP_SIZE, POSTER_SIZE, THUMBNAIL_SIZE};
pub use details::{details_any, DetailRecord};
pub use engine::{Dispatcher, EngineHandle};
pub use provider::{run_request, Provider, ProviderSettings, TmdbProvider, TrendingWindow};
pub use types::{EngineCommand, EngineEvent, FailureKind, FetchError};
