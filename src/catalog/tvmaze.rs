//! TVMaze catalog backend implementation.

use super::tvmaze_types::{TvMazeEpisode, TvMazeImage, TvMazeShow};
use super::{CatalogError, CatalogProvider, Episode, Show};

/// Catalog backend for the TVMaze API.
///
/// This backend fetches show and episode listings from
/// https://api.tvmaze.com using the shows collection and the per-show
/// episodes collection.
pub struct TvMazeCatalog {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TvMazeCatalog {
    /// Creates a catalog client against the public TVMaze API.
    pub fn new() -> Self {
        Self::with_base_url("https://api.tvmaze.com")
    }

    /// Creates a catalog client against a custom base URL.
    ///
    /// Useful for compatible mirrors and for exercising the binary against
    /// a local fixture server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Issues a GET request and checks the response status.
    fn get(&self, path: &str) -> Result<reqwest::blocking::Response, CatalogError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        // Ensure request was successful
        if !response.status().is_success() {
            return Err(CatalogError::Network(format!(
                "HTTP {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(response)
    }

    /// Converts a TVMaze show to our internal Show structure.
    fn convert_show(tvmaze_show: TvMazeShow) -> Show {
        Show {
            id: tvmaze_show.id,
            name: tvmaze_show.name,
            image: image_url(tvmaze_show.image),
            summary: plain_summary(tvmaze_show.summary),
        }
    }

    /// Converts a TVMaze episode to our internal Episode structure.
    fn convert_episode(tvmaze_episode: TvMazeEpisode) -> Episode {
        Episode {
            id: tvmaze_episode.id,
            name: tvmaze_episode.name.unwrap_or_else(|| "Unknown".to_string()),
            season: tvmaze_episode.season,
            number: tvmaze_episode.number,
            image: image_url(tvmaze_episode.image),
            summary: plain_summary(tvmaze_episode.summary),
        }
    }
}

impl Default for TvMazeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider for TvMazeCatalog {
    fn list_shows(&self) -> Result<Vec<Show>, CatalogError> {
        let tvmaze_shows: Vec<TvMazeShow> = self
            .get("/shows")?
            .json()
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(tvmaze_shows.into_iter().map(Self::convert_show).collect())
    }

    fn list_episodes(&self, show_id: usize) -> Result<Vec<Episode>, CatalogError> {
        let tvmaze_episodes: Vec<TvMazeEpisode> = self
            .get(&format!("/shows/{}/episodes", show_id))?
            .json()
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        let mut episodes: Vec<Episode> = tvmaze_episodes
            .into_iter()
            .map(Self::convert_episode)
            .collect();

        // The API returns episodes in airdate order; make the season and
        // episode-number order explicit for stable rendering.
        episodes.sort_by_key(|e| (e.season, e.number));

        Ok(episodes)
    }
}

/// Extracts the medium-size image URL, if present.
fn image_url(image: Option<TvMazeImage>) -> Option<String> {
    image.and_then(|i| i.medium)
}

/// Normalizes an optional HTML summary to trimmed plain text.
fn plain_summary(summary: Option<String>) -> String {
    summary
        .map(|s| nanohtml2text::html2text(&s).trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_episode_substitutes_missing_fields() {
        let wire: TvMazeEpisode = serde_json::from_str(
            r#"{"id": 10, "season": 1, "number": 1, "name": null, "image": null, "summary": null}"#,
        )
        .unwrap();

        let episode = TvMazeCatalog::convert_episode(wire);
        assert_eq!(episode.name, "Unknown");
        assert_eq!(episode.image, None);
        assert_eq!(episode.summary, "");
    }

    #[test]
    fn test_convert_show_normalizes_summary_to_text() {
        let wire: TvMazeShow = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Under the Dome",
                "image": {"medium": "https://static.tvmaze.com/1.jpg"},
                "summary": "<p>An invisible dome traps a small town.</p>"
            }"#,
        )
        .unwrap();

        let show = TvMazeCatalog::convert_show(wire);
        assert_eq!(show.id, 1);
        assert_eq!(show.name, "Under the Dome");
        assert_eq!(
            show.image.as_deref(),
            Some("https://static.tvmaze.com/1.jpg")
        );
        assert_eq!(show.summary, "An invisible dome traps a small town.");
    }

    #[test]
    fn test_convert_show_tolerates_image_without_medium() {
        let wire: TvMazeShow = serde_json::from_str(
            r#"{"id": 2, "name": "Person of Interest", "image": {}, "summary": null}"#,
        )
        .unwrap();

        let show = TvMazeCatalog::convert_show(wire);
        assert_eq!(show.image, None);
        assert_eq!(show.summary, "");
    }
}
