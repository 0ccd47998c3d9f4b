//! Data structures and traits for TV catalog retrieval.
//!
//! This module provides structures to represent shows and episodes with
//! their associated metadata (names, images, summaries), as well as a trait
//! for implementing catalog backends.

mod tvmaze;
mod tvmaze_types;

pub use tvmaze::TvMazeCatalog;

use thiserror::Error;

/// Errors that can occur while reading from the catalog service.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Transport failure or non-success HTTP status
    #[error("Request failed: {0}")]
    Network(String),

    /// Failed to parse the catalog's JSON response
    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

/// A television series record from the catalog.
///
/// Immutable once fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    /// Catalog identifier, unique across the show list
    pub id: usize,
    /// The show title
    pub name: String,
    /// Medium-size cover image URL, if the catalog has one
    pub image: Option<String>,
    /// Plain-text summary, empty when the catalog has none
    pub summary: String,
}

/// A single installment of a show, identified by season and episode number.
///
/// Immutable once fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Catalog identifier
    pub id: usize,
    /// The episode title
    pub name: String,
    /// The season number this episode belongs to
    pub season: usize,
    /// The episode number within the season
    pub number: usize,
    /// Medium-size still image URL, if the catalog has one
    pub image: Option<String>,
    /// Plain-text summary, empty when the catalog has none
    pub summary: String,
}

/// Trait for catalog backends that can list shows and episodes.
///
/// Implementors retrieve catalog data from a remote source such as TVMaze.
/// Both reads are idempotent and safe for the caller to retry; backends
/// perform no retries of their own.
pub trait CatalogProvider {
    /// Fetches the full show list.
    fn list_shows(&self) -> Result<Vec<Show>, CatalogError>;

    /// Fetches all episodes of the given show, ordered by season and
    /// episode number.
    fn list_episodes(&self, show_id: usize) -> Result<Vec<Episode>, CatalogError>;
}
