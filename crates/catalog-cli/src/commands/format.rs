use std::fmt::Write;

use catalog::{Character, DisplayState, ViewStore, episode_number};

const MAX_NAME_WIDTH: usize = 35;
const MAX_SPECIES_WIDTH: usize = 22;

/// Render the store's display window as a table followed by a count footer.
pub fn render_character_table(store: &ViewStore) -> String {
    let mut out = String::new();

    if store.display_state() != DisplayState::Items {
        out.push_str("No results\n");
        return out;
    }

    let items = store.displayed_items();

    let id_width = column_width(&items, "ID", usize::MAX, |c| c.id.to_string());
    let name_width = column_width(&items, "NAME", MAX_NAME_WIDTH, |c| c.name.clone());
    let species_width =
        column_width(&items, "SPECIES", MAX_SPECIES_WIDTH, |c| c.species.clone());
    let gender_width = column_width(&items, "GENDER", usize::MAX, |c| c.gender.clone());
    let status_width = column_width(&items, "STATUS", usize::MAX, |c| c.status.clone());

    let _ = writeln!(
        out,
        "{:>id_width$}  {:<name_width$}  {:<species_width$}  \
         {:<gender_width$}  {:<status_width$}  FIRST SEEN",
        "ID", "NAME", "SPECIES", "GENDER", "STATUS",
    );

    for c in &items {
        let _ = writeln!(
            out,
            "{:>id_width$}  {:<name_width$}  {:<species_width$}  \
             {:<gender_width$}  {:<status_width$}  {}",
            c.id,
            truncate(&c.name, name_width),
            truncate(&c.species, species_width),
            c.gender,
            c.status,
            first_seen(c),
        );
    }

    let _ = writeln!(
        out,
        "\nShowing {} of {} ({} total)",
        store.window_size(),
        store.total_filtered_count(),
        store.total_count()
    );

    out
}

fn column_width(
    items: &[&Character],
    header: &str,
    max: usize,
    value: impl Fn(&Character) -> String,
) -> usize {
    items
        .iter()
        .map(|c| value(c).chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
        .min(max.max(header.chars().count()))
}

fn first_seen(character: &Character) -> String {
    match character.first_episode().map(episode_number) {
        Some(Ok(n)) => format!("ep {n}"),
        _ => "?".to_owned(),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_owned()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}

#[cfg(test)]
mod tests {
    use catalog::test_support::character;

    use super::*;

    fn store_with(characters: Vec<Character>, page_size: usize) -> ViewStore {
        let mut store = ViewStore::with_page_size(page_size);
        store.finish_loading(Ok(characters)).unwrap();
        store
    }

    #[test]
    fn truncate_short_string_unchanged() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_exact_length_unchanged() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn truncate_long_string_adds_ellipsis() {
        assert_eq!(truncate("hello world", 6), "hello…");
    }

    #[test]
    fn truncate_handles_unicode() {
        assert_eq!(truncate("café latte", 5), "café…");
    }

    #[test]
    fn table_lists_window_and_footer() {
        let store = store_with(
            vec![
                character(1, "Rick Sanchez", "Human", 1),
                character(2, "Morty Smith", "Human", 1),
                character(3, "Birdperson", "Alien", 11),
            ],
            2,
        );

        let out = render_character_table(&store);
        assert!(out.contains("Rick Sanchez"));
        assert!(out.contains("Morty Smith"));
        assert!(!out.contains("Birdperson"));
        assert!(out.contains("ep 1"));
        assert!(out.ends_with("Showing 2 of 3 (3 total)\n"));
    }

    #[test]
    fn unparseable_first_episode_shows_placeholder() {
        let mut odd = character(7, "Mr. Meeseeks", "Humanoid", 5);
        odd.episode = vec!["https://rickandmortyapi.com/api/episode/pilot".into()];
        let store = store_with(vec![odd], 20);

        let out = render_character_table(&store);
        assert!(out.contains("Mr. Meeseeks"));
        assert!(out.contains('?'));
    }

    #[test]
    fn empty_filter_result_prints_no_results() {
        let mut store = store_with(vec![character(1, "Rick Sanchez", "Human", 1)], 20);
        store.set_search("nobody");

        assert_eq!(render_character_table(&store), "No results\n");
    }

    #[test]
    fn empty_collection_prints_no_results() {
        let store = store_with(Vec::new(), 20);
        assert_eq!(render_character_table(&store), "No results\n");
    }

    #[test]
    fn long_names_are_truncated_to_column() {
        let long = "Abradolf Lincler the Very Long Named Experiment";
        let store = store_with(vec![character(1, long, "Human", 1)], 20);

        let out = render_character_table(&store);
        assert!(!out.contains(long));
        assert!(out.contains('…'));
    }
}
