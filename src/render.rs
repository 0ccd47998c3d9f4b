//! Projection from catalog data to a structural card view.
//!
//! The render engine is a pure function from entities to a [`View`]: a
//! list of card records, a match-count readout and the attribution footer.
//! A presentation layer maps the `View` onto its output surface; nothing
//! here touches IO. Every view is a full replacement of the previous one,
//! not an incremental patch, which is acceptable for corpora of tens to
//! low hundreds of entries.

use crate::catalog::{Episode, Show};

/// Attribution line carried on every view.
pub const ATTRIBUTION: &str = "Data originally from TVMaze.com";

/// One display card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Card heading
    pub title: String,
    /// Image URL; None renders as a placeholder
    pub image: Option<String>,
    /// Plain-text summary, possibly empty
    pub summary: String,
}

/// A full replacement of the display area.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Cards to draw, in order
    pub cards: Vec<Card>,
    /// Match-count readout, "matches / total"
    pub readout: String,
    /// Status text drawn in place of content (loading, errors)
    pub notice: Option<String>,
    /// Attribution footer
    pub footer: &'static str,
}

/// Renders the show list: one card per show plus the match-count readout.
pub fn shows_view(shows: &[&Show], total: usize) -> View {
    let cards = shows
        .iter()
        .map(|show| Card {
            title: show.name.clone(),
            image: show.image.clone(),
            summary: show.summary.clone(),
        })
        .collect::<Vec<_>>();

    View {
        readout: readout(cards.len(), total),
        cards,
        notice: None,
        footer: ATTRIBUTION,
    }
}

/// Renders an episode list, counted against the selected show's full
/// episode count.
pub fn episodes_view(episodes: &[&Episode], total: usize) -> View {
    let cards = episodes
        .iter()
        .map(|episode| Card {
            title: episode_title(episode),
            image: episode.image.clone(),
            summary: episode.summary.clone(),
        })
        .collect::<Vec<_>>();

    View {
        readout: readout(cards.len(), total),
        cards,
        notice: None,
        footer: ATTRIBUTION,
    }
}

/// Renders a status message in place of content.
pub fn notice_view(message: impl Into<String>) -> View {
    View {
        cards: Vec::new(),
        readout: String::new(),
        notice: Some(message.into()),
        footer: ATTRIBUTION,
    }
}

/// Formats an episode code like "S01E01".
pub fn episode_code(episode: &Episode) -> String {
    format!("S{:02}E{:02}", episode.season, episode.number)
}

/// Formats an episode card title like "Pilot - S01E01".
pub fn episode_title(episode: &Episode) -> String {
    format!("{} - {}", episode.name, episode_code(episode))
}

/// Formats the label used when listing episodes for selection,
/// "S01E01 - Pilot".
pub fn episode_option_label(episode: &Episode) -> String {
    format!("{} - {}", episode_code(episode), episode.name)
}

fn readout(matches: usize, total: usize) -> String {
    format!("{} / {}", matches, total)
}
