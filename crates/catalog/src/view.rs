use std::collections::BTreeMap;
use std::fmt;

use crate::character::{Character, Dimension};
use crate::filter::{self, FilterSelection};
use crate::paginate::Paginator;
use crate::sort::{self, SortDirection};
use crate::source::{CharacterSource, SourceError};

/// Lifecycle of the one fetch a store performs per (re)load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// What the display layer should show, derived from the load state and the result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// A fetch is in flight.
    Loading,
    /// The last fetch failed; the message is suitable for display.
    Failed(String),
    /// Nothing has been fetched yet.
    Empty,
    /// The collection is loaded but nothing matches the current filters.
    NoResults,
    /// At least one item is displayed.
    Items,
}

/// Which part of the store changed in a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChange {
    Collection,
    Filter,
    Sort,
    Window,
    LoadState,
}

type Observer = Box<dyn Fn(ViewChange) + Send + Sync>;

/// Owns the fetched collection and every view derived from it.
///
/// Each setter recomputes the derived state synchronously and then notifies
/// observers. The full collection is never mutated by filtering or sorting;
/// the derived view is a list of indices into it.
pub struct ViewStore {
    characters: Vec<Character>,
    /// Sort key per character, parsed once at ingestion.
    keys: Vec<u32>,
    selection: FilterSelection,
    direction: SortDirection,
    /// Indices into `characters`, filtered then sorted.
    filtered: Vec<usize>,
    window: usize,
    paginator: Paginator,
    load_state: LoadState,
    observers: Vec<Observer>,
}

impl fmt::Debug for ViewStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewStore")
            .field("characters", &self.characters.len())
            .field("selection", &self.selection)
            .field("direction", &self.direction)
            .field("filtered", &self.filtered.len())
            .field("window", &self.window)
            .field("load_state", &self.load_state)
            .finish()
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStore {
    pub fn new() -> Self {
        Self::with_paginator(Paginator::default())
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self::with_paginator(Paginator::new(page_size))
    }

    fn with_paginator(paginator: Paginator) -> Self {
        Self {
            characters: Vec::new(),
            keys: Vec::new(),
            selection: FilterSelection::default(),
            direction: SortDirection::default(),
            filtered: Vec::new(),
            window: 0,
            paginator,
            load_state: LoadState::Idle,
            observers: Vec::new(),
        }
    }

    /// Register a callback invoked after every recompute.
    pub fn subscribe(&mut self, observer: impl Fn(ViewChange) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    // --- Loading ---

    pub fn begin_loading(&mut self) {
        self.load_state = LoadState::Loading;
        self.notify(ViewChange::LoadState);
    }

    /// Commit a fetch result. On failure the current collection is kept as is.
    pub fn finish_loading(
        &mut self,
        result: Result<Vec<Character>, SourceError>,
    ) -> Result<(), SourceError> {
        match result {
            Ok(characters) => {
                self.replace_collection(characters);
                self.load_state = LoadState::Ready;
                self.notify(ViewChange::LoadState);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "catalog fetch failed");
                self.load_state = LoadState::Failed(e.to_string());
                self.notify(ViewChange::LoadState);
                Err(e)
            }
        }
    }

    /// Fetch everything from `source` and commit it.
    pub async fn load(&mut self, source: &dyn CharacterSource) -> Result<(), SourceError> {
        self.begin_loading();
        let result = source.fetch_all().await;
        self.finish_loading(result)
    }

    /// Swap in a new collection wholesale and re-derive every view.
    pub fn replace_collection(&mut self, characters: Vec<Character>) {
        self.keys = characters
            .iter()
            .map(|c| match sort::try_sort_key(c) {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!(
                        id = c.id,
                        name = %c.name,
                        error = %e,
                        "using sentinel sort key"
                    );
                    sort::SENTINEL_KEY
                }
            })
            .collect();
        self.characters = characters;
        tracing::debug!(count = self.characters.len(), "collection replaced");
        self.refilter();
        self.notify(ViewChange::Collection);
    }

    // --- Inputs ---

    pub fn set_filter<I, S>(&mut self, dimension: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.set(dimension, values);
        self.refilter();
        self.notify(ViewChange::Filter);
    }

    pub fn toggle_filter(&mut self, dimension: Dimension, value: &str) {
        self.selection.toggle(dimension, value);
        self.refilter();
        self.notify(ViewChange::Filter);
    }

    pub fn clear_filters(&mut self) {
        self.selection.clear();
        self.refilter();
        self.notify(ViewChange::Filter);
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.selection.search = term.into();
        self.refilter();
        self.notify(ViewChange::Filter);
    }

    /// Re-sort the current filtered set. Does not re-run the filter.
    pub fn set_sort(&mut self, direction: SortDirection) {
        if self.direction == direction {
            return;
        }
        self.direction = direction;
        sort::sort_indices(&mut self.filtered, &self.keys, self.direction);
        self.reset_window();
        self.notify(ViewChange::Sort);
    }

    /// Grow the display window by one page. Never grows past the result set.
    pub fn load_more(&mut self) {
        let next = self.paginator.load_more(self.window, self.filtered.len());
        if next != self.window {
            self.window = next;
            self.notify(ViewChange::Window);
        }
    }

    // --- Accessors ---

    pub fn displayed_items(&self) -> Vec<&Character> {
        self.paginator
            .window(&self.filtered, self.window)
            .iter()
            .map(|&i| &self.characters[i])
            .collect()
    }

    pub fn filtered_items(&self) -> Vec<&Character> {
        self.filtered.iter().map(|&i| &self.characters[i]).collect()
    }

    /// The displayed item at `position` within the window.
    pub fn displayed_item(&self, position: usize) -> Option<&Character> {
        if position >= self.window {
            return None;
        }
        self.filtered
            .get(position)
            .and_then(|&i| self.characters.get(i))
    }

    pub fn total_filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_count(&self) -> usize {
        self.characters.len()
    }

    pub fn window_size(&self) -> usize {
        self.window
    }

    pub fn has_more(&self) -> bool {
        self.window < self.filtered.len()
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn display_state(&self) -> DisplayState {
        match &self.load_state {
            LoadState::Loading => DisplayState::Loading,
            LoadState::Failed(msg) => DisplayState::Failed(msg.clone()),
            LoadState::Idle if self.characters.is_empty() => DisplayState::Empty,
            _ if self.filtered.is_empty() => DisplayState::NoResults,
            _ => DisplayState::Items,
        }
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.direction
    }

    /// Count of full-collection items per value along `dimension`.
    ///
    /// Known values come first in their canonical order (including zero
    /// counts), followed by any other values seen, alphabetically.
    pub fn value_counts(&self, dimension: Dimension) -> Vec<(String, usize)> {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for c in &self.characters {
            *seen.entry(dimension.value_of(c)).or_default() += 1;
        }

        let known = dimension.known_values();
        let mut counts: Vec<(String, usize)> = known
            .iter()
            .map(|v| ((*v).to_owned(), seen.get(v).copied().unwrap_or(0)))
            .collect();

        counts.extend(
            seen.into_iter()
                .filter(|(v, _)| !known.contains(v))
                .map(|(v, n)| (v.to_owned(), n)),
        );
        counts
    }

    // --- Derivation ---

    fn refilter(&mut self) {
        self.filtered = filter::filter_indices(&self.characters, &self.selection);
        sort::sort_indices(&mut self.filtered, &self.keys, self.direction);
        self.reset_window();
    }

    fn reset_window(&mut self) {
        self.window = self.paginator.initial(self.filtered.len());
    }

    fn notify(&self, change: ViewChange) {
        for observer in &self.observers {
            observer(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::test_support::{InMemorySource, character};

    /// 45 characters, 10 of them Human, with distinct first episodes.
    fn forty_five() -> Vec<Character> {
        (0..45u64)
            .map(|i| {
                let species = if i % 4 == 0 && i < 40 { "Human" } else { "Alien" };
                let name = if i % 5 == 0 {
                    format!("Morty #{i}")
                } else {
                    format!("Character {i}")
                };
                character(i + 1, &name, species, (45 - i) as u32)
            })
            .collect()
    }

    fn loaded_store() -> ViewStore {
        let mut store = ViewStore::new();
        store.finish_loading(Ok(forty_five())).unwrap();
        store
    }

    fn ids(items: &[&Character]) -> Vec<u64> {
        items.iter().map(|c| c.id).collect()
    }

    #[test]
    fn new_store_is_empty_and_idle() {
        let store = ViewStore::new();
        assert_eq!(store.load_state(), &LoadState::Idle);
        assert_eq!(store.display_state(), DisplayState::Empty);
        assert!(store.displayed_items().is_empty());
        assert!(!store.has_more());
    }

    #[test]
    fn unfiltered_window_is_first_page() {
        let store = loaded_store();
        assert_eq!(store.displayed_items().len(), 20);
        assert_eq!(store.total_filtered_count(), 45);
        assert_eq!(store.display_state(), DisplayState::Items);
        assert!(store.has_more());
    }

    #[test]
    fn default_sort_is_ascending_by_first_episode() {
        let store = loaded_store();
        let keys: Vec<u32> = store
            .filtered_items()
            .iter()
            .map(|c| sort::sort_key(c))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn selecting_species_filters_and_resets_window() {
        let mut store = loaded_store();
        store.load_more();
        assert_eq!(store.window_size(), 40);

        store.set_filter(Dimension::Species, ["Human"]);
        assert_eq!(store.total_filtered_count(), 10);
        assert_eq!(store.displayed_items().len(), 10);
        assert!(store.displayed_items().iter().all(|c| c.species == "Human"));
    }

    #[test]
    fn search_matches_any_case() {
        let mut store = loaded_store();
        store.set_search("MORTY");
        assert_eq!(store.total_filtered_count(), 9);

        store.set_search("morty");
        assert_eq!(store.total_filtered_count(), 9);
    }

    #[test]
    fn load_more_at_full_length_is_noop() {
        let mut store = loaded_store();
        store.set_filter(Dimension::Species, ["Human"]);
        assert_eq!(store.displayed_items().len(), store.total_filtered_count());

        store.load_more();
        assert_eq!(store.displayed_items().len(), 10);
        assert!(!store.has_more());
    }

    #[test]
    fn load_more_grows_until_exhausted() {
        let mut store = loaded_store();
        let mut previous = store.window_size();
        while store.has_more() {
            store.load_more();
            assert!(store.window_size() > previous);
            assert!(store.window_size() <= store.total_filtered_count());
            previous = store.window_size();
        }
        assert_eq!(store.window_size(), 45);
    }

    #[test]
    fn sort_change_keeps_filter_results() {
        let mut store = loaded_store();
        store.set_filter(Dimension::Species, ["Human"]);
        let mut ascending = ids(&store.filtered_items());

        store.set_sort(SortDirection::Descending);
        let descending = ids(&store.filtered_items());

        assert_eq!(store.total_filtered_count(), 10);
        ascending.reverse();
        assert_eq!(ascending, descending);
    }

    #[test]
    fn sort_change_resets_window() {
        let mut store = loaded_store();
        store.load_more();
        store.set_sort(SortDirection::Descending);
        assert_eq!(store.window_size(), 20);
    }

    #[test]
    fn filter_after_sort_keeps_direction() {
        let mut store = loaded_store();
        store.set_sort(SortDirection::Descending);
        store.set_filter(Dimension::Species, ["Human"]);

        let keys: Vec<u32> = store
            .filtered_items()
            .iter()
            .map(|c| sort::sort_key(c))
            .collect();
        assert!(keys.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn numeric_episode_order() {
        let mut store = ViewStore::new();
        store
            .finish_loading(Ok(vec![
                character(1, "Later", "Human", 28),
                character(2, "Earlier", "Human", 3),
            ]))
            .unwrap();

        assert_eq!(ids(&store.displayed_items()), vec![2, 1]);
    }

    #[test]
    fn filtering_never_mutates_collection() {
        let mut store = loaded_store();
        store.set_filter(Dimension::Species, ["Robot"]);
        store.set_sort(SortDirection::Descending);
        assert_eq!(store.total_count(), 45);
        assert_eq!(store.display_state(), DisplayState::NoResults);

        store.clear_filters();
        assert_eq!(store.total_filtered_count(), 45);
    }

    #[test]
    fn failed_load_keeps_previous_collection() {
        let mut store = loaded_store();
        store.begin_loading();
        assert!(store.is_loading());

        let result = store.finish_loading(Err(SourceError::Network("HTTP 500".into())));
        assert!(result.is_err());
        assert!(!store.is_loading());
        assert_eq!(store.total_count(), 45);
        assert_eq!(
            store.display_state(),
            DisplayState::Failed("network error: HTTP 500".into())
        );
    }

    #[test]
    fn reload_replaces_collection_under_current_selection() {
        let batch = |ids: std::ops::RangeInclusive<u64>, alien_parity: u64| -> Vec<Character> {
            ids.map(|i| {
                let species = if i % 2 == alien_parity { "Alien" } else { "Human" };
                character(i, &format!("Character {i}"), species, i as u32)
            })
            .collect()
        };

        let mut store = ViewStore::with_page_size(2);
        store.finish_loading(Ok(batch(1..=5, 1))).unwrap();
        store.set_filter(Dimension::Species, ["Alien"]);
        store.set_sort(SortDirection::Descending);
        store.load_more();
        assert_eq!(store.window_size(), 3);

        store.begin_loading();
        store.finish_loading(Ok(batch(10..=14, 0))).unwrap();

        assert_eq!(store.total_count(), 5);
        assert_eq!(ids(&store.filtered_items()), vec![14, 12, 10]);
        assert_eq!(ids(&store.displayed_items()), vec![14, 12]);
        assert_eq!(store.window_size(), 2);
        assert!(store.selection().is_selected(Dimension::Species, "Alien"));
        assert_eq!(store.sort_direction(), SortDirection::Descending);
        assert_eq!(store.load_state(), &LoadState::Ready);
    }

    #[test]
    fn malformed_keys_sort_last() {
        let mut broken = character(99, "Broken", "Human", 1);
        broken.episode = vec!["https://rickandmortyapi.com/api/episode/unknown".into()];

        let mut store = ViewStore::new();
        store
            .finish_loading(Ok(vec![broken, character(1, "Fine", "Human", 12)]))
            .unwrap();

        assert_eq!(ids(&store.displayed_items()), vec![1, 99]);
    }

    #[test]
    fn observers_see_each_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut store = ViewStore::with_page_size(2);
        store.subscribe(move |change| sink.lock().unwrap().push(change));

        store.finish_loading(Ok(forty_five())).unwrap();
        store.set_search("morty");
        store.set_sort(SortDirection::Descending);
        store.set_sort(SortDirection::Descending);
        store.load_more();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ViewChange::Collection,
                ViewChange::LoadState,
                ViewChange::Filter,
                ViewChange::Sort,
                ViewChange::Window,
            ]
        );
    }

    #[test]
    fn value_counts_list_known_values_first() {
        let mut characters = forty_five();
        characters[1].species = "Disease".into();
        let mut store = ViewStore::new();
        store.replace_collection(characters);

        let counts = store.value_counts(Dimension::Species);
        assert_eq!(counts[0], ("Human".to_owned(), 10));
        assert_eq!(counts[1], ("Alien".to_owned(), 34));
        assert_eq!(counts.last(), Some(&("Disease".to_owned(), 1)));
    }

    #[tokio::test]
    async fn load_from_source_commits_collection() {
        let mut source = InMemorySource::new("memory");
        for c in forty_five() {
            source.add(c);
        }

        let mut store = ViewStore::new();
        store.load(&source).await.unwrap();
        assert_eq!(store.load_state(), &LoadState::Ready);
        assert_eq!(store.total_count(), 45);
    }

    #[tokio::test]
    async fn load_failure_commits_nothing() {
        let source = InMemorySource::failing("broken", SourceError::Network("page 3".into()));

        let mut store = ViewStore::new();
        let result = store.load(&source).await;
        assert!(result.is_err());
        assert_eq!(store.total_count(), 0);
        assert!(!store.is_loading());
        assert!(matches!(store.display_state(), DisplayState::Failed(_)));
    }
}
