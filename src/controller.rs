//! Selection control for the browsing session.
//!
//! The [`Browser`] is the state machine that keeps the search box, the two
//! selection controls and the store consistent. Events from the
//! presentation layer come in through [`Browser::handle`]; the controller
//! mutates the store and answers with effects: fetches to start and views
//! to draw. It is also the crate's sole error recovery point: a failed
//! episode fetch becomes an error notice and a rollback to show browsing,
//! never a poisoned cache entry.

use crate::catalog::{CatalogError, Episode, Show};
use crate::filter::filter_matches;
use crate::render::{self, View};
use crate::store::{EpisodeLookup, ShowStore};

/// Where the browsing session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Browsing the show list
    #[default]
    BrowsingShows,
    /// Waiting for a show's episodes to arrive
    LoadingEpisodes { show_id: usize },
    /// Browsing the episode list of one selected show
    BrowsingEpisodes { show_id: usize },
    /// Exactly one episode picked from the episode selector
    SingleEpisode { show_id: usize, episode_id: usize },
}

/// User and network events driving the session.
#[derive(Debug, Clone)]
pub enum BrowserEvent {
    /// A show was picked from the show selector
    ShowSelected(usize),
    /// "All shows" was picked from the show selector
    AllShowsSelected,
    /// One episode was picked from the episode selector
    EpisodeSelected(usize),
    /// "All episodes" was picked from the episode selector
    AllEpisodesSelected,
    /// The search term changed
    SearchChanged(String),
    /// An episode fetch resolved
    EpisodesLoaded {
        show_id: usize,
        episodes: Vec<Episode>,
    },
    /// An episode fetch failed
    EpisodesFailed {
        show_id: usize,
        error: CatalogError,
    },
}

/// Work the presentation layer must carry out after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Replace the display with this view
    Draw(View),
    /// Start fetching episodes for the show, reporting the outcome back
    /// as EpisodesLoaded or EpisodesFailed
    FetchEpisodes { show_id: usize },
}

/// The show/episode browsing state machine.
///
/// Runs for the whole session; there is no terminal state. No failure is
/// fatal: after any single request failure the session stays interactive.
#[derive(Debug, Default)]
pub struct Browser {
    store: ShowStore,
    scope: Scope,
}

impl Browser {
    /// Creates a browser with an empty store, browsing shows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the show list and draws the initial show view.
    pub fn seed(&mut self, shows: Vec<Show>) -> Vec<Effect> {
        self.store.seed_shows(shows);
        self.scope = Scope::BrowsingShows;
        vec![Effect::Draw(self.current_view())]
    }

    /// Current scope of the session.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Read access to the session state, for presentation layers that
    /// build their controls from show names and episode labels.
    pub fn store(&self) -> &ShowStore {
        &self.store
    }

    /// Applies one event and returns the effects to carry out.
    pub fn handle(&mut self, event: BrowserEvent) -> Vec<Effect> {
        match event {
            BrowserEvent::ShowSelected(show_id) => self.select_show(show_id),
            BrowserEvent::AllShowsSelected => self.select_all_shows(),
            BrowserEvent::EpisodeSelected(episode_id) => self.select_episode(episode_id),
            BrowserEvent::AllEpisodesSelected => self.select_all_episodes(),
            BrowserEvent::SearchChanged(term) => self.search_changed(term),
            BrowserEvent::EpisodesLoaded { show_id, episodes } => {
                self.episodes_loaded(show_id, episodes)
            }
            BrowserEvent::EpisodesFailed { show_id, error } => {
                self.episodes_failed(show_id, error)
            }
        }
    }

    fn select_show(&mut self, show_id: usize) -> Vec<Effect> {
        let Some(lookup) = self.store.get_or_mark_pending(show_id) else {
            // Not a catalog show; nothing to do.
            return Vec::new();
        };

        self.store.set_selection(Some(show_id));

        match lookup {
            EpisodeLookup::Cached(_) => {
                self.scope = Scope::BrowsingEpisodes { show_id };
                vec![Effect::Draw(self.current_view())]
            }
            EpisodeLookup::Pending => {
                // A fetch is already in flight for this show; draw the
                // placeholder again instead of starting a second request.
                self.scope = Scope::LoadingEpisodes { show_id };
                vec![Effect::Draw(self.current_view())]
            }
            EpisodeLookup::Absent => {
                self.scope = Scope::LoadingEpisodes { show_id };
                vec![
                    Effect::Draw(self.current_view()),
                    Effect::FetchEpisodes { show_id },
                ]
            }
        }
    }

    fn select_all_shows(&mut self) -> Vec<Effect> {
        self.store.set_selection(None);
        self.scope = Scope::BrowsingShows;
        vec![Effect::Draw(self.current_view())]
    }

    fn select_episode(&mut self, episode_id: usize) -> Vec<Effect> {
        let Scope::BrowsingEpisodes { show_id } = self.scope else {
            return Vec::new();
        };

        let known = self
            .store
            .episodes(show_id)
            .is_some_and(|episodes| episodes.iter().any(|e| e.id == episode_id));
        if !known {
            return Vec::new();
        }

        // Picking a concrete episode clears the search box.
        self.store.set_search_term("");
        self.scope = Scope::SingleEpisode {
            show_id,
            episode_id,
        };
        vec![Effect::Draw(self.current_view())]
    }

    fn select_all_episodes(&mut self) -> Vec<Effect> {
        let Scope::SingleEpisode { show_id, .. } = self.scope else {
            return Vec::new();
        };

        self.scope = Scope::BrowsingEpisodes { show_id };
        vec![Effect::Draw(self.current_view())]
    }

    fn search_changed(&mut self, term: String) -> Vec<Effect> {
        // Typing while a single episode is selected resets the episode
        // selection back to the full list before filtering.
        if let Scope::SingleEpisode { show_id, .. } = self.scope {
            self.scope = Scope::BrowsingEpisodes { show_id };
        }

        if matches!(self.scope, Scope::LoadingEpisodes { .. }) {
            return Vec::new();
        }

        self.store.set_search_term(term);
        vec![Effect::Draw(self.current_view())]
    }

    fn episodes_loaded(&mut self, show_id: usize, episodes: Vec<Episode>) -> Vec<Effect> {
        // Cache the result regardless of what is selected now; a stale
        // response is still a valid catalog read.
        self.store.set_episodes(show_id, episodes);

        // Only draw when the arriving episodes belong to the show the
        // session is still waiting on; a response for a deselected show
        // must not render over the current scope.
        if matches!(self.scope, Scope::LoadingEpisodes { show_id: s } if s == show_id) {
            self.scope = Scope::BrowsingEpisodes { show_id };
            vec![Effect::Draw(self.current_view())]
        } else {
            Vec::new()
        }
    }

    fn episodes_failed(&mut self, show_id: usize, error: CatalogError) -> Vec<Effect> {
        // Roll the entry back so the show stays eligible for a retry.
        self.store.clear_pending(show_id);

        if !matches!(self.scope, Scope::LoadingEpisodes { show_id: s } if s == show_id) {
            return Vec::new();
        }

        self.store.set_selection(None);
        self.scope = Scope::BrowsingShows;
        vec![Effect::Draw(render::notice_view(format!(
            "Failed to load episodes: {}",
            error
        )))]
    }

    /// The last-computed filtered view of the current scope.
    fn current_view(&self) -> View {
        match self.scope {
            Scope::BrowsingShows => {
                let matches = filter_matches(self.store.shows(), self.store.search_term());
                render::shows_view(&matches, self.store.show_count())
            }
            Scope::LoadingEpisodes { show_id } => {
                let name = self
                    .store
                    .show(show_id)
                    .map(|show| show.name.as_str())
                    .unwrap_or("show");
                render::notice_view(format!("Loading episodes of {}...", name))
            }
            Scope::BrowsingEpisodes { show_id } => {
                let episodes = self.store.episodes(show_id).unwrap_or(&[]);
                let matches = filter_matches(episodes, self.store.search_term());
                render::episodes_view(&matches, episodes.len())
            }
            Scope::SingleEpisode {
                show_id,
                episode_id,
            } => {
                let episodes = self.store.episodes(show_id).unwrap_or(&[]);
                let selected: Vec<&Episode> =
                    episodes.iter().filter(|e| e.id == episode_id).collect();
                render::episodes_view(&selected, episodes.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(id: usize, name: &str) -> Show {
        Show {
            id,
            name: name.to_string(),
            image: None,
            summary: String::new(),
        }
    }

    fn episode(id: usize, name: &str, season: usize, number: usize) -> Episode {
        Episode {
            id,
            name: name.to_string(),
            season,
            number,
            image: None,
            summary: String::new(),
        }
    }

    fn seeded_browser() -> Browser {
        let mut browser = Browser::new();
        browser.seed(vec![show(2, "Beta"), show(1, "Alpha")]);
        browser
    }

    fn drawn_views(effects: &[Effect]) -> Vec<&View> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Draw(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    fn fetch_count(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|effect| matches!(effect, Effect::FetchEpisodes { .. }))
            .count()
    }

    #[test]
    fn test_seed_draws_sorted_show_list() {
        let mut browser = Browser::new();
        let effects = browser.seed(vec![show(2, "Beta"), show(1, "Alpha")]);

        let views = drawn_views(&effects);
        assert_eq!(views.len(), 1);
        let titles: Vec<&str> = views[0].cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Beta"]);
        assert_eq!(views[0].readout, "2 / 2");
    }

    #[test]
    fn test_selecting_uncached_show_fetches_once() {
        let mut browser = seeded_browser();

        let effects = browser.handle(BrowserEvent::ShowSelected(1));
        assert_eq!(fetch_count(&effects), 1);
        assert_eq!(browser.scope(), Scope::LoadingEpisodes { show_id: 1 });
        let views = drawn_views(&effects);
        assert!(views[0].notice.as_deref().unwrap().contains("Alpha"));

        // Reselecting while the fetch is in flight must not fetch again.
        let effects = browser.handle(BrowserEvent::ShowSelected(1));
        assert_eq!(fetch_count(&effects), 0);
        assert_eq!(browser.scope(), Scope::LoadingEpisodes { show_id: 1 });
    }

    #[test]
    fn test_loaded_episodes_render_as_cards() {
        let mut browser = seeded_browser();
        browser.handle(BrowserEvent::ShowSelected(1));

        let effects = browser.handle(BrowserEvent::EpisodesLoaded {
            show_id: 1,
            episodes: vec![episode(10, "Pilot", 1, 1)],
        });

        assert_eq!(browser.scope(), Scope::BrowsingEpisodes { show_id: 1 });
        let views = drawn_views(&effects);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].cards[0].title, "Pilot - S01E01");
        assert_eq!(views[0].readout, "1 / 1");
    }

    #[test]
    fn test_cached_show_skips_loading_state() {
        let mut browser = seeded_browser();
        browser.handle(BrowserEvent::ShowSelected(1));
        browser.handle(BrowserEvent::EpisodesLoaded {
            show_id: 1,
            episodes: vec![episode(10, "Pilot", 1, 1)],
        });
        browser.handle(BrowserEvent::AllShowsSelected);

        let effects = browser.handle(BrowserEvent::ShowSelected(1));
        assert_eq!(fetch_count(&effects), 0);
        assert_eq!(browser.scope(), Scope::BrowsingEpisodes { show_id: 1 });
        let views = drawn_views(&effects);
        assert_eq!(views[0].cards.len(), 1);
    }

    #[test]
    fn test_fetch_failure_recovers_to_show_browsing() {
        let mut browser = seeded_browser();
        browser.handle(BrowserEvent::ShowSelected(1));

        let effects = browser.handle(BrowserEvent::EpisodesFailed {
            show_id: 1,
            error: CatalogError::Network("HTTP 500 Internal Server Error".to_string()),
        });

        assert_eq!(browser.scope(), Scope::BrowsingShows);
        let views = drawn_views(&effects);
        let notice = views[0].notice.as_deref().unwrap();
        assert!(notice.contains("Failed to load episodes"));
        assert!(notice.contains("HTTP 500"));

        // The entry was not poisoned: the next selection retries the fetch.
        let effects = browser.handle(BrowserEvent::ShowSelected(1));
        assert_eq!(fetch_count(&effects), 1);
    }

    #[test]
    fn test_stale_response_is_cached_but_not_drawn() {
        let mut browser = seeded_browser();
        browser.handle(BrowserEvent::ShowSelected(1));
        browser.handle(BrowserEvent::AllShowsSelected);

        let effects = browser.handle(BrowserEvent::EpisodesLoaded {
            show_id: 1,
            episodes: vec![episode(10, "Pilot", 1, 1)],
        });

        // Nothing is drawn over the show list...
        assert!(drawn_views(&effects).is_empty());
        assert_eq!(browser.scope(), Scope::BrowsingShows);
        // ...but the episodes are kept for the next visit.
        assert!(browser.store().episodes(1).is_some());

        let effects = browser.handle(BrowserEvent::ShowSelected(1));
        assert_eq!(fetch_count(&effects), 0);
        assert_eq!(browser.scope(), Scope::BrowsingEpisodes { show_id: 1 });
    }

    #[test]
    fn test_search_filters_shows_in_place() {
        let mut browser = seeded_browser();

        let effects = browser.handle(BrowserEvent::SearchChanged("alp".to_string()));
        assert_eq!(browser.scope(), Scope::BrowsingShows);
        let views = drawn_views(&effects);
        assert_eq!(views[0].cards.len(), 1);
        assert_eq!(views[0].cards[0].title, "Alpha");
        assert_eq!(views[0].readout, "1 / 2");
    }

    #[test]
    fn test_returning_to_shows_resets_search() {
        let mut browser = seeded_browser();
        browser.handle(BrowserEvent::ShowSelected(1));
        browser.handle(BrowserEvent::EpisodesLoaded {
            show_id: 1,
            episodes: vec![episode(10, "Pilot", 1, 1), episode(11, "The Fire", 1, 2)],
        });
        browser.handle(BrowserEvent::SearchChanged("fire".to_string()));

        let effects = browser.handle(BrowserEvent::AllShowsSelected);
        assert_eq!(browser.store().search_term(), "");
        let views = drawn_views(&effects);
        // The full show list is back, unfiltered.
        assert_eq!(views[0].cards.len(), 2);
        assert_eq!(views[0].readout, "2 / 2");
    }

    #[test]
    fn test_single_episode_selection_clears_search() {
        let mut browser = seeded_browser();
        browser.handle(BrowserEvent::ShowSelected(1));
        browser.handle(BrowserEvent::EpisodesLoaded {
            show_id: 1,
            episodes: vec![episode(10, "Pilot", 1, 1), episode(11, "The Fire", 1, 2)],
        });
        browser.handle(BrowserEvent::SearchChanged("pilot".to_string()));

        let effects = browser.handle(BrowserEvent::EpisodeSelected(11));
        assert_eq!(
            browser.scope(),
            Scope::SingleEpisode {
                show_id: 1,
                episode_id: 11
            }
        );
        assert_eq!(browser.store().search_term(), "");
        let views = drawn_views(&effects);
        assert_eq!(views[0].cards.len(), 1);
        assert_eq!(views[0].cards[0].title, "The Fire - S01E02");
        assert_eq!(views[0].readout, "1 / 2");
    }

    #[test]
    fn test_all_episodes_returns_to_full_list() {
        let mut browser = seeded_browser();
        browser.handle(BrowserEvent::ShowSelected(1));
        browser.handle(BrowserEvent::EpisodesLoaded {
            show_id: 1,
            episodes: vec![episode(10, "Pilot", 1, 1), episode(11, "The Fire", 1, 2)],
        });
        browser.handle(BrowserEvent::EpisodeSelected(10));

        let effects = browser.handle(BrowserEvent::AllEpisodesSelected);
        assert_eq!(browser.scope(), Scope::BrowsingEpisodes { show_id: 1 });
        let views = drawn_views(&effects);
        assert_eq!(views[0].cards.len(), 2);
    }

    #[test]
    fn test_search_resets_single_episode_selection() {
        let mut browser = seeded_browser();
        browser.handle(BrowserEvent::ShowSelected(1));
        browser.handle(BrowserEvent::EpisodesLoaded {
            show_id: 1,
            episodes: vec![episode(10, "Pilot", 1, 1), episode(11, "The Fire", 1, 2)],
        });
        browser.handle(BrowserEvent::EpisodeSelected(10));

        let effects = browser.handle(BrowserEvent::SearchChanged("fire".to_string()));
        assert_eq!(browser.scope(), Scope::BrowsingEpisodes { show_id: 1 });
        let views = drawn_views(&effects);
        assert_eq!(views[0].cards[0].title, "The Fire - S01E02");
    }

    #[test]
    fn test_unknown_show_selection_is_inert() {
        let mut browser = seeded_browser();

        let effects = browser.handle(BrowserEvent::ShowSelected(99));
        assert!(effects.is_empty());
        assert_eq!(browser.scope(), Scope::BrowsingShows);
    }
}
