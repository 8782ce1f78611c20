mod activity;
mod custom;
mod dishes;
mod export;
mod helpers;
mod history;
mod prefs;
mod select;
mod summary;

use anyhow::{Result, bail};

use festcal_core::models::Dish;

use helpers::{print_dish_table, prompt_choice};

pub(crate) use activity::cmd_activity;
pub(crate) use custom::cmd_custom_add;
pub(crate) use dishes::cmd_dishes;
pub(crate) use export::{cmd_export, cmd_share};
pub(crate) use history::{cmd_history, cmd_load, cmd_save};
pub(crate) use prefs::cmd_prefs;
pub(crate) use select::{cmd_add, cmd_quantity, cmd_remove};
pub(crate) use summary::cmd_summary;

/// Resolve a dish argument (numeric id, exact name, or partial name)
/// against the resolvable set, prompting when several names match.
pub(super) fn resolve_dish(dishes: &[Dish], query: &str) -> Result<Dish> {
    if let Ok(id) = query.parse::<i64>() {
        return match dishes.iter().find(|d| d.id == id) {
            Some(dish) => Ok(dish.clone()),
            None => bail!("No dish with id {id}"),
        };
    }

    if let Some(dish) = dishes.iter().find(|d| d.name == query) {
        return Ok(dish.clone());
    }

    let matches: Vec<&Dish> = dishes.iter().filter(|d| d.name.contains(query)).collect();
    match matches.len() {
        0 => bail!("No dish found for '{query}'"),
        1 => Ok(matches[0].clone()),
        n => {
            print_dish_table(&matches);
            let idx = prompt_choice(n)?;
            Ok(matches[idx].clone())
        }
    }
}
