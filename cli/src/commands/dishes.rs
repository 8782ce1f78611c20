use anyhow::Result;
use std::process;

use festcal_core::catalog::filter_dishes;
use festcal_core::models::ALL;
use festcal_core::storage::Storage;
use festcal_core::store::AppStore;

use super::helpers::print_dish_table;

/// List the catalog plus custom dishes, filtered by cuisine and type.
/// Explicit flags override the stored preference defaults.
pub(crate) fn cmd_dishes<S: Storage>(
    store: &AppStore<S>,
    cuisine: Option<&str>,
    dish_type: Option<&str>,
    json: bool,
) -> Result<()> {
    let prefs = &store.data().preferences;
    let cuisine = cuisine.unwrap_or(&prefs.default_cuisine);
    let dish_type = dish_type.unwrap_or(&prefs.default_type);

    let all = store.resolvable_dishes(store.current_date());
    let filtered = filter_dishes(&all, cuisine, dish_type);

    if json {
        println!("{}", serde_json::to_string_pretty(&filtered)?);
        return Ok(());
    }

    if filtered.is_empty() {
        eprintln!("No dishes match cuisine '{cuisine}' and type '{dish_type}'");
        process::exit(2);
    }

    if cuisine != ALL || dish_type != ALL {
        let count = filtered.len();
        println!("Filter: {cuisine} / {dish_type} ({count} dishes)\n");
    }
    print_dish_table(&filtered);

    Ok(())
}
