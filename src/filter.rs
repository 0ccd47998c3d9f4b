//! Free-text filtering over shows and episodes.

use crate::catalog::{Episode, Show};

/// An entity that can be matched against a search term.
pub trait Searchable {
    /// The entity's display name.
    fn name(&self) -> &str;

    /// The entity's plain-text summary; empty when it has none.
    fn summary(&self) -> &str;
}

impl Searchable for Show {
    fn name(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> &str {
        &self.summary
    }
}

impl Searchable for Episode {
    fn name(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> &str {
        &self.summary
    }
}

/// Filters a corpus down to the entries matching a search term.
///
/// Matching is a case-insensitive substring test against the name or the
/// summary. Relative order is preserved, and an empty term matches the
/// whole corpus. This is a pure function: no side effects, no dependency on
/// state beyond its two arguments.
pub fn filter_matches<'a, I, T>(corpus: I, term: &str) -> Vec<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    T: Searchable + 'a,
{
    if term.is_empty() {
        return corpus.into_iter().collect();
    }

    let term = term.to_lowercase();

    corpus
        .into_iter()
        .filter(|entry| {
            entry.name().to_lowercase().contains(&term)
                || entry.summary().to_lowercase().contains(&term)
        })
        .collect()
}
