use std::collections::BTreeSet;

use crate::character::{Character, Dimension};

/// The user's current filter choices.
///
/// An empty set (or empty search string) places no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub species: BTreeSet<String>,
    pub gender: BTreeSet<String>,
    pub status: BTreeSet<String>,
    pub search: String,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Species => &self.species,
            Dimension::Gender => &self.gender,
            Dimension::Status => &self.status,
        }
    }

    fn selected_mut(&mut self, dimension: Dimension) -> &mut BTreeSet<String> {
        match dimension {
            Dimension::Species => &mut self.species,
            Dimension::Gender => &mut self.gender,
            Dimension::Status => &mut self.status,
        }
    }

    /// Replace the selected set for one dimension.
    pub fn set<I, S>(&mut self, dimension: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.selected_mut(dimension) = values.into_iter().map(Into::into).collect();
    }

    /// Add the value if absent, remove it if present.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) {
        let set = self.selected_mut(dimension);
        if !set.remove(value) {
            set.insert(value.to_owned());
        }
    }

    pub fn is_selected(&self, dimension: Dimension, value: &str) -> bool {
        self.selected(dimension).contains(value)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no dimension and no search term constrains the result.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
            && self.gender.is_empty()
            && self.status.is_empty()
            && self.search.is_empty()
    }

    /// Whether the character passes every clause of this selection.
    pub fn matches(&self, character: &Character) -> bool {
        matches(character, self)
    }
}

/// Conjunction over the three category clauses and the name search.
/// Each category clause is a disjunction over its selected values.
pub fn matches(character: &Character, selection: &FilterSelection) -> bool {
    let category_ok = Dimension::all().iter().all(|dimension| {
        let selected = selection.selected(*dimension);
        selected.is_empty() || selected.contains(dimension.value_of(character))
    });

    category_ok && name_contains(&character.name, &selection.search)
}

fn name_contains(name: &str, search: &str) -> bool {
    search.is_empty() || name.to_lowercase().contains(&search.to_lowercase())
}

/// Indices into `characters` of every item the selection matches, in collection order.
pub fn filter_indices(characters: &[Character], selection: &FilterSelection) -> Vec<usize> {
    characters
        .iter()
        .enumerate()
        .filter(|(_, c)| selection.matches(c))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::character;

    fn with(species: &str, gender: &str, status: &str, name: &str) -> Character {
        Character {
            gender: gender.to_owned(),
            status: status.to_owned(),
            ..character(1, name, species, 1)
        }
    }

    fn sample() -> Vec<Character> {
        vec![
            with("Human", "Male", "Alive", "Rick Sanchez"),
            with("Human", "Male", "Alive", "Morty Smith"),
            with("Alien", "Male", "Dead", "Evil Morty"),
            with("Human", "Female", "Alive", "Summer Smith"),
            with("Robot", "unknown", "unknown", "Butter Robot"),
        ]
    }

    #[test]
    fn empty_selection_matches_everything() {
        let characters = sample();
        let selection = FilterSelection::new();
        assert!(selection.is_empty());
        assert_eq!(filter_indices(&characters, &selection).len(), characters.len());
    }

    #[test]
    fn dimension_clause_is_disjunctive() {
        let characters = sample();
        let mut selection = FilterSelection::new();
        selection.set(Dimension::Species, ["Alien", "Robot"]);

        assert_eq!(filter_indices(&characters, &selection), vec![2, 4]);
    }

    #[test]
    fn dimensions_combine_conjunctively() {
        let characters = sample();
        let mut selection = FilterSelection::new();
        selection.set(Dimension::Species, ["Human"]);
        selection.set(Dimension::Gender, ["Male"]);

        assert_eq!(filter_indices(&characters, &selection), vec![0, 1]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let characters = sample();
        let mut selection = FilterSelection::new();

        for term in ["morty", "MORTY", "Morty", "mOrTy"] {
            selection.search = term.to_owned();
            assert_eq!(filter_indices(&characters, &selection), vec![1, 2], "{term}");
        }
    }

    #[test]
    fn search_and_category_both_apply() {
        let characters = sample();
        let mut selection = FilterSelection::new();
        selection.search = "morty".into();
        selection.set(Dimension::Status, ["Dead"]);

        assert_eq!(filter_indices(&characters, &selection), vec![2]);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = FilterSelection::new();
        selection.toggle(Dimension::Gender, "Female");
        assert!(selection.is_selected(Dimension::Gender, "Female"));

        selection.toggle(Dimension::Gender, "Female");
        assert!(!selection.is_selected(Dimension::Gender, "Female"));
        assert!(selection.is_empty());
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let characters = sample();
        let mut selection = FilterSelection::new();
        selection.set(Dimension::Species, ["Human"]);

        let once: Vec<Character> = filter_indices(&characters, &selection)
            .into_iter()
            .map(|i| characters[i].clone())
            .collect();
        let twice: Vec<&str> = filter_indices(&once, &selection)
            .into_iter()
            .map(|i| once[i].name.as_str())
            .collect();

        let once_names: Vec<&str> = once.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(once_names, vec!["Rick Sanchez", "Morty Smith", "Summer Smith"]);
        assert_eq!(twice, once_names);
    }

    #[test]
    fn insertion_order_within_a_dimension_does_not_matter() {
        let characters = sample();
        let mut forward = FilterSelection::new();
        forward.set(Dimension::Species, ["Human", "Robot", "Alien"]);

        let mut backward = FilterSelection::new();
        backward.toggle(Dimension::Species, "Alien");
        backward.toggle(Dimension::Species, "Robot");
        backward.toggle(Dimension::Species, "Human");

        assert_eq!(
            filter_indices(&characters, &forward),
            filter_indices(&characters, &backward)
        );
    }

    #[test]
    fn widening_a_selected_set_never_shrinks_matches() {
        let characters = sample();
        let mut selection = FilterSelection::new();
        selection.set(Dimension::Species, ["Human"]);
        let narrow = filter_indices(&characters, &selection);

        selection.toggle(Dimension::Species, "Robot");
        let wide = filter_indices(&characters, &selection);

        assert!(wide.len() >= narrow.len());
        assert!(narrow.iter().all(|i| wide.contains(i)));
    }

    #[test]
    fn clear_resets_everything() {
        let mut selection = FilterSelection::new();
        selection.set(Dimension::Status, ["Alive"]);
        selection.search = "rick".into();

        selection.clear();
        assert!(selection.is_empty());
    }
}
