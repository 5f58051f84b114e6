use std::fmt;

use crate::character::Character;

/// Key used for characters whose first episode reference cannot be parsed.
/// Sorts last when ascending, first when descending.
pub const SENTINEL_KEY: u32 = u32::MAX;

/// Order of the view over the first-appearance episode number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Why an episode reference could not produce a sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortKeyError {
    #[error("malformed episode reference: {0}")]
    Malformed(String),

    #[error("character has no episode references")]
    Missing,
}

/// Parse the trailing `/`-separated segment of an episode URI as its number.
pub fn episode_number(reference: &str) -> Result<u32, SortKeyError> {
    let segment = reference.rsplit('/').next().unwrap_or(reference);
    segment
        .parse()
        .map_err(|_| SortKeyError::Malformed(reference.to_owned()))
}

/// The first-appearance episode number, or the error explaining why there is none.
pub fn try_sort_key(character: &Character) -> Result<u32, SortKeyError> {
    let first = character.first_episode().ok_or(SortKeyError::Missing)?;
    episode_number(first)
}

/// The first-appearance episode number, falling back to [`SENTINEL_KEY`].
pub fn sort_key(character: &Character) -> u32 {
    try_sort_key(character).unwrap_or(SENTINEL_KEY)
}

/// Sort `indices` by their precomputed `keys`.
///
/// Equal keys keep ascending index order in both directions, so the result
/// depends only on the set of indices and never on their incoming order.
pub fn sort_indices(indices: &mut [usize], keys: &[u32], direction: SortDirection) {
    indices.sort_by(|&a, &b| {
        let by_key = match direction {
            SortDirection::Ascending => keys[a].cmp(&keys[b]),
            SortDirection::Descending => keys[b].cmp(&keys[a]),
        };
        by_key.then(a.cmp(&b))
    });
}
