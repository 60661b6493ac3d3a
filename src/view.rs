//! Terminal listing of the stored planets.

use crate::{
    error::Result,
    store::{ExoplanetStore, NULL_PLACEHOLDER, ORDER_OPTIONS, VIEW_COLUMNS, resolve_order},
    table,
};

/// Lists stored planets ordered by the `order` option (see
/// [`ORDER_OPTIONS`]) as an aligned table.
pub fn render_listing(store: &ExoplanetStore, order: &str, limit: Option<usize>) -> Result<String> {
    let column = resolve_order(ORDER_OPTIONS, order)?;
    let rows = store
        .list_sorted(column, limit)?
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.unwrap_or_else(|| NULL_PLACEHOLDER.to_string()))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let headings = VIEW_COLUMNS.iter().map(|(_, heading)| *heading).collect::<Vec<_>>();
    Ok(table::render_table(&headings, &rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{loader, projection::KEY_FIELDS};

    #[test]
    fn listing_shows_placeholder_for_nulls() {
        let mut store = ExoplanetStore::open_in_memory().expect("store");
        let header = KEY_FIELDS.join(",");
        let text = format!("{header}\nA,2014,2014-05,,Transit,,,,,,,,,\nB,2010,2010-01,3,Transit,,,,,,,,,\n");
        store.load(&loader::parse_csv(&text).expect("csv")).expect("load");

        let rendered = render_listing(&store, "distance", None).expect("render");
        let lines = rendered.lines().collect::<Vec<_>>();
        assert!(lines[0].starts_with("Name"));
        assert!(lines[2].starts_with("B "));
        assert!(lines[3].starts_with("A "));
        assert!(lines[3].contains(NULL_PLACEHOLDER));
    }

    #[test]
    fn listing_rejects_unknown_order() {
        let store = ExoplanetStore::open_in_memory().expect("store");
        assert!(render_listing(&store, "colour", None).is_err());
    }
}
