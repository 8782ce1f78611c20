use anyhow::Result;

use festcal_core::models::NewCustomDish;
use festcal_core::storage::Storage;
use festcal_core::store::AppStore;

use super::helpers::parse_date;

/// Register a custom dish, either for one day or globally across days.
pub(crate) fn cmd_custom_add<S: Storage>(
    store: &mut AppStore<S>,
    new: NewCustomDish,
    global: bool,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    store.change_date(&date);

    let dish = if global {
        store.add_global_custom_dish(new)?
    } else {
        store.add_custom_dish(new)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&dish)?);
        return Ok(());
    }

    let id = dish.id;
    let icon = &dish.icon;
    let name = &dish.name;
    let cal = dish.calories;
    let scope = if global {
        "all days".to_string()
    } else {
        date.clone()
    };
    println!("Added custom dish [{id}] {icon} {name} — {cal:.0} kcal/100g ({scope})");
    println!("Select it with: festcal add {id}");
    Ok(())
}
