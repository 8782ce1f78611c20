use anyhow::{Result, bail};

use festcal_core::catalog::CUISINES;
use festcal_core::models::{ALL, validate_dish_type};
use festcal_core::storage::Storage;
use festcal_core::store::AppStore;

/// Show preferences, or update whichever fields were passed as flags.
pub(crate) fn cmd_prefs<S: Storage>(
    store: &mut AppStore<S>,
    cuisine: Option<&str>,
    dish_type: Option<&str>,
    notifications: Option<bool>,
    json: bool,
) -> Result<()> {
    if cuisine.is_some() || dish_type.is_some() || notifications.is_some() {
        let mut prefs = store.data().preferences.clone();
        if let Some(cuisine) = cuisine {
            if cuisine != ALL && !CUISINES.contains(&cuisine) {
                bail!(
                    "Invalid cuisine '{cuisine}'. Must be {ALL} or one of: {}",
                    CUISINES.join(", ")
                );
            }
            prefs.default_cuisine = cuisine.to_string();
        }
        if let Some(dish_type) = dish_type {
            if dish_type != ALL {
                validate_dish_type(dish_type)?;
            }
            prefs.default_type = dish_type.to_string();
        }
        if let Some(enabled) = notifications {
            prefs.enable_notifications = enabled;
        }
        store.set_preferences(prefs)?;
    }

    let prefs = &store.data().preferences;
    if json {
        println!("{}", serde_json::to_string_pretty(prefs)?);
        return Ok(());
    }

    let cuisine = &prefs.default_cuisine;
    let dish_type = &prefs.default_type;
    let notifications = if prefs.enable_notifications { "on" } else { "off" };
    println!("Default cuisine: {cuisine}");
    println!("Default type:    {dish_type}");
    println!("Notifications:   {notifications}");
    Ok(())
}
