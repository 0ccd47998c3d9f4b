//! In-memory session state for the browsing loop.
//!
//! This module is the single source of truth during a session: the seeded
//! show list, the per-show episode cache, the current selection and the
//! current search term. All mutation goes through the methods here, and no
//! mutation triggers rendering on its own; callers re-render explicitly
//! after updating state.

use crate::catalog::{Episode, Show};

/// Per-show episode cache state.
///
/// Distinguishes "never requested" from "request in flight" so that
/// reselecting a show while its episodes are loading cannot start a second
/// fetch for the same show.
#[derive(Debug, Clone, PartialEq)]
enum EpisodeCache {
    /// No episodes cached and no fetch in flight
    Absent,
    /// A fetch for this show's episodes is in flight
    Pending,
    /// The episode list is cached
    Resolved(Vec<Episode>),
}

/// A show together with its episode cache state.
#[derive(Debug, Clone, PartialEq)]
struct ShowEntry {
    show: Show,
    episodes: EpisodeCache,
}

/// Result of probing the episode cache for a show.
#[derive(Debug, Clone, PartialEq)]
pub enum EpisodeLookup {
    /// Episodes are cached and ready to use
    Cached(Vec<Episode>),
    /// A fetch is already in flight; do not start another
    Pending,
    /// Nothing was cached; the entry has been marked pending and the
    /// caller must start the fetch
    Absent,
}

/// Mutable session state with a constrained mutation API.
#[derive(Debug, Default)]
pub struct ShowStore {
    /// Show entries in render order, established once at seed time
    entries: Vec<ShowEntry>,
    /// Currently selected show id; None while browsing shows
    selection: Option<usize>,
    /// Current free-text search term
    search_term: String,
}

impl ShowStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the show list with the given shows.
    ///
    /// Shows are sorted by name, case-insensitively, before insertion;
    /// that order is the stable default render order for the rest of the
    /// session. Every entry starts with no episodes cached, and the
    /// selection and search term are reset.
    pub fn seed_shows(&mut self, mut shows: Vec<Show>) {
        shows.sort_by_key(|show| show.name.to_lowercase());

        self.entries = shows
            .into_iter()
            .map(|show| ShowEntry {
                show,
                episodes: EpisodeCache::Absent,
            })
            .collect();
        self.selection = None;
        self.search_term.clear();
    }

    /// All shows, in render order.
    pub fn shows(&self) -> Vec<&Show> {
        self.entries.iter().map(|entry| &entry.show).collect()
    }

    /// Number of seeded shows.
    pub fn show_count(&self) -> usize {
        self.entries.len()
    }

    /// Looks up a show by id.
    pub fn show(&self, show_id: usize) -> Option<&Show> {
        self.entry(show_id).map(|entry| &entry.show)
    }

    /// The cached episodes of a show, if resolved.
    pub fn episodes(&self, show_id: usize) -> Option<&[Episode]> {
        match self.entry(show_id)?.episodes {
            EpisodeCache::Resolved(ref episodes) => Some(episodes.as_slice()),
            _ => None,
        }
    }

    /// Probes the episode cache for a show, marking it pending on a miss.
    ///
    /// Returns None for ids not in the catalog, without mutating anything.
    /// On [`EpisodeLookup::Absent`] the entry has been marked pending and
    /// the caller is expected to start exactly one fetch, completing it
    /// with [`ShowStore::set_episodes`] or rolling it back with
    /// [`ShowStore::clear_pending`].
    pub fn get_or_mark_pending(&mut self, show_id: usize) -> Option<EpisodeLookup> {
        let entry = self.entry_mut(show_id)?;

        Some(match entry.episodes {
            EpisodeCache::Resolved(ref episodes) => EpisodeLookup::Cached(episodes.clone()),
            EpisodeCache::Pending => EpisodeLookup::Pending,
            EpisodeCache::Absent => {
                entry.episodes = EpisodeCache::Pending;
                EpisodeLookup::Absent
            }
        })
    }

    /// Stores the resolved episode list for a show.
    ///
    /// Idempotent: storing the same list twice leaves the observable state
    /// identical to storing it once. Unknown ids are ignored.
    pub fn set_episodes(&mut self, show_id: usize, episodes: Vec<Episode>) {
        if let Some(entry) = self.entry_mut(show_id) {
            entry.episodes = EpisodeCache::Resolved(episodes);
        }
    }

    /// Rolls a pending entry back to absent after a failed fetch.
    ///
    /// The show stays eligible for a retry on its next selection. Resolved
    /// entries are left untouched, so a late failure cannot evict cached
    /// episodes.
    pub fn clear_pending(&mut self, show_id: usize) {
        if let Some(entry) = self.entry_mut(show_id) {
            if entry.episodes == EpisodeCache::Pending {
                entry.episodes = EpisodeCache::Absent;
            }
        }
    }

    /// Changes the current scope to the given show, or back to show
    /// browsing.
    ///
    /// Resets the search term as a side effect: the term is scoped to
    /// whichever entity kind is displayed, and that kind just changed.
    pub fn set_selection(&mut self, show_id: Option<usize>) {
        self.selection = show_id;
        self.search_term.clear();
    }

    /// Currently selected show id; None while browsing shows.
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Updates the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Current search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    fn entry(&self, show_id: usize) -> Option<&ShowEntry> {
        self.entries.iter().find(|entry| entry.show.id == show_id)
    }

    fn entry_mut(&mut self, show_id: usize) -> Option<&mut ShowEntry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.show.id == show_id)
    }
}
