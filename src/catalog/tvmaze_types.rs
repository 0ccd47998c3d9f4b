//! TVMaze API response types for deserialization.
//!
//! These structures mirror the JSON response format from the TVMaze API.

use serde::Deserialize;

/// A show record from the TVMaze shows collection.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    /// Catalog id of the show
    pub id: usize,
    /// The name of the TV show
    pub name: String,
    /// Image URLs (may be null)
    pub image: Option<TvMazeImage>,
    /// Show summary in HTML format (may be null)
    pub summary: Option<String>,
}

/// A single episode from the TVMaze episodes collection.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    /// Catalog id of the episode
    pub id: usize,
    /// Season number (0 for specials)
    pub season: usize,
    /// Episode number within the season
    pub number: usize,
    /// Episode title (may be null for episodes without a title)
    pub name: Option<String>,
    /// Image URLs (may be null)
    pub image: Option<TvMazeImage>,
    /// Episode summary in HTML format (may be null)
    pub summary: Option<String>,
}

/// Image URL pair attached to shows and episodes.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeImage {
    /// URL of the medium-size rendition (may be null)
    pub medium: Option<String>,
}
