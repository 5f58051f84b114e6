use catalog::{Dimension, ViewStore};

/// A row in the list pane: either a displayed character or the trailing "load more" row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    /// Position within the store's display window.
    Item { position: usize },
    /// Shown while the window is shorter than the filtered result set.
    LoadMore { remaining: usize },
}

/// A row in the filter overlay: a dimension header or a toggleable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRow {
    Header {
        dimension: Dimension,
        selected: usize,
    },
    Value {
        dimension: Dimension,
        value: String,
        count: usize,
        selected: bool,
    },
}

/// Flatten the store's display window into navigable rows.
pub fn build_list_rows(store: &ViewStore) -> Vec<ListRow> {
    let shown = store.window_size();
    let mut rows: Vec<ListRow> = (0..shown).map(|position| ListRow::Item { position }).collect();

    if store.has_more() {
        rows.push(ListRow::LoadMore {
            remaining: store.total_filtered_count() - shown,
        });
    }

    rows
}

/// Build the filter overlay rows: one header per dimension followed by its values.
pub fn build_filter_rows(store: &ViewStore) -> Vec<FilterRow> {
    let selection = store.selection();
    let mut rows = Vec::new();

    for dimension in Dimension::all() {
        rows.push(FilterRow::Header {
            dimension,
            selected: selection.selected(dimension).len(),
        });

        for (value, count) in store.value_counts(dimension) {
            let selected = selection.is_selected(dimension, &value);
            rows.push(FilterRow::Value {
                dimension,
                value,
                count,
                selected,
            });
        }
    }

    rows
}

fn is_value(row: &FilterRow) -> bool {
    matches!(row, FilterRow::Value { .. })
}

/// Find the first selectable (Value) row index, or None if empty.
pub fn first_value_index(rows: &[FilterRow]) -> Option<usize> {
    rows.iter().position(is_value)
}

/// Find the next selectable row after `current`, or stay put.
pub fn next_value_index(rows: &[FilterRow], current: usize) -> usize {
    rows.iter()
        .enumerate()
        .skip(current + 1)
        .find(|(_, row)| is_value(row))
        .map(|(i, _)| i)
        .unwrap_or(current)
}

/// Find the previous selectable row before `current`, or stay put.
pub fn prev_value_index(rows: &[FilterRow], current: usize) -> usize {
    rows.iter()
        .enumerate()
        .take(current)
        .rev()
        .find(|(_, row)| is_value(row))
        .map(|(i, _)| i)
        .unwrap_or(current)
}
