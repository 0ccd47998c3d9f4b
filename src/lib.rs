//! tvbrowse - Browse a remote TV catalog from the terminal
//!
//! This library provides the full browsing core: a catalog client for a
//! TVMaze-shaped JSON API, an in-memory show/episode store with an
//! explicit absent/pending/resolved episode cache, a pure search filter, a
//! pure projection from catalog data to display cards, and the selection
//! state machine tying them together.
//!
//! The accompanying binary is a thin terminal adapter: it draws the views
//! the state machine produces and feeds user input back in as events. Any
//! other presentation layer can do the same.
//!
//! ```no_run
//! use tvbrowse::{Browser, BrowserEvent, CatalogProvider, Effect, TvMazeCatalog};
//!
//! let catalog = TvMazeCatalog::new();
//! let mut browser = Browser::new();
//!
//! let shows = catalog.list_shows().expect("catalog unreachable");
//! for effect in browser.seed(shows) {
//!     if let Effect::Draw(view) = effect {
//!         println!("{} cards, {}", view.cards.len(), view.readout);
//!     }
//! }
//!
//! // A show selection may ask for a fetch; feed the result back in as
//! // an EpisodesLoaded or EpisodesFailed event.
//! for effect in browser.handle(BrowserEvent::ShowSelected(1)) {
//!     if let Effect::FetchEpisodes { show_id } = effect {
//!         match catalog.list_episodes(show_id) {
//!             Ok(episodes) => browser.handle(BrowserEvent::EpisodesLoaded { show_id, episodes }),
//!             Err(error) => browser.handle(BrowserEvent::EpisodesFailed { show_id, error }),
//!         };
//!     }
//! }
//! ```

mod catalog;
mod controller;
mod filter;
mod render;
mod store;

pub use catalog::{CatalogError, CatalogProvider, Episode, Show, TvMazeCatalog};
pub use controller::{Browser, BrowserEvent, Effect, Scope};
pub use filter::{Searchable, filter_matches};
pub use render::{
    ATTRIBUTION, Card, View, episode_code, episode_option_label, episode_title, episodes_view,
    notice_view, shows_view,
};
pub use store::{EpisodeLookup, ShowStore};
