use anyhow::{Result, bail};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Custom dish ids start here so they can never collide with catalog ids.
pub const CUSTOM_DISH_ID_OFFSET: i64 = 100_000;

/// Sentinel used by filters and preferences to mean "no filter".
pub const ALL: &str = "全部";

pub const DISH_TYPES: &[&str] = &["荤菜", "素菜", "汤品", "主食", "点心"];

/// The dish type that counts toward the meat-ratio health tip.
pub const MEAT_TYPE: &str = "荤菜";

/// One dish: nutrition values are per 100 g, `portion` is the default
/// portion in grams. Field names follow the persisted wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub calories: f64,
    pub cuisine: String,
    #[serde(rename = "type")]
    pub dish_type: String,
    pub portion: i64,
    pub icon: String,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub custom: bool,
}

/// A dish reference plus quantity in grams, owned by exactly one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDish {
    pub id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyData {
    pub date: String,
    pub selected_dishes: Vec<SelectedDish>,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_fat: f64,
    pub total_carbs: f64,
    #[serde(default)]
    pub custom_dishes: Vec<Dish>,
    #[serde(default)]
    pub saved_to_history: bool,
    #[serde(default)]
    pub last_modified: String,
}

impl DailyData {
    #[must_use]
    pub fn empty(date: &str) -> Self {
        Self {
            date: date.to_string(),
            selected_dishes: Vec::new(),
            total_calories: 0.0,
            total_protein: 0.0,
            total_fat: 0.0,
            total_carbs: 0.0,
            custom_dishes: Vec::new(),
            saved_to_history: false,
            last_modified: now_iso(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub default_cuisine: String,
    pub default_type: String,
    pub enable_notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_cuisine: ALL.to_string(),
            default_type: ALL.to_string(),
            enable_notifications: false,
        }
    }
}

/// The whole persisted document. Every field carries a default so partial
/// documents written by older versions repair on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieAppData {
    #[serde(default)]
    pub daily_records: BTreeMap<String, DailyData>,
    #[serde(default)]
    pub custom_dishes: Vec<Dish>,
    #[serde(default)]
    pub preferences: Preferences,
}

/// Read-only projection of a day explicitly saved to history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub date: String,
    pub dishes: Vec<SelectedDish>,
    pub total_calories: i64,
    pub total_protein: i64,
    pub total_fat: i64,
    pub total_carbs: i64,
}

/// Form input for a custom dish, validated before it reaches the store.
#[derive(Debug, Clone)]
pub struct NewCustomDish {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub portion: i64,
    pub cuisine: String,
    pub dish_type: String,
    pub icon: String,
}

impl NewCustomDish {
    #[must_use]
    pub fn into_dish(self, id: i64) -> Dish {
        Dish {
            id,
            name: self.name,
            calories: self.calories,
            cuisine: self.cuisine,
            dish_type: self.dish_type,
            portion: self.portion,
            icon: self.icon,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
            custom: true,
        }
    }
}

pub fn validate_dish_type(dish_type: &str) -> Result<()> {
    if DISH_TYPES.contains(&dish_type) {
        Ok(())
    } else {
        bail!(
            "Invalid dish type '{dish_type}'. Must be one of: {}",
            DISH_TYPES.join(", ")
        )
    }
}

/// Validate custom-dish form input. Bounds are the original form limits:
/// name 1-50 chars, calories (0, 2000], macros [0, 200], portion [1, 1000].
pub fn validate_custom_dish(dish: &NewCustomDish) -> Result<()> {
    let name_len = dish.name.trim().chars().count();
    if name_len == 0 || name_len > 50 {
        bail!("Dish name must be between 1 and 50 characters");
    }
    if dish.calories <= 0.0 || dish.calories > 2000.0 {
        bail!("Calories per 100g must be between 0 and 2000");
    }
    for (label, value) in [
        ("protein", dish.protein),
        ("fat", dish.fat),
        ("carbs", dish.carbs),
    ] {
        if !(0.0..=200.0).contains(&value) {
            bail!("{label} per 100g must be between 0 and 200");
        }
    }
    if dish.portion < 1 || dish.portion > 1000 {
        bail!("Default portion must be between 1 and 1000 grams");
    }
    validate_dish_type(&dish.dish_type)?;
    Ok(())
}

/// Current UTC timestamp in the stored document's ISO-8601 format
/// (millisecond precision, `Z` suffix).
#[must_use]
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_custom() -> NewCustomDish {
        NewCustomDish {
            name: "外婆红烧鸡".to_string(),
            calories: 210.0,
            protein: 18.0,
            fat: 12.0,
            carbs: 6.0,
            portion: 150,
            cuisine: "自定义".to_string(),
            dish_type: "荤菜".to_string(),
            icon: "🍗".to_string(),
        }
    }

    #[test]
    fn test_validate_custom_dish_valid() {
        assert!(validate_custom_dish(&sample_custom()).is_ok());
    }

    #[test]
    fn test_validate_custom_dish_name_bounds() {
        let mut dish = sample_custom();
        dish.name = "   ".to_string();
        assert!(validate_custom_dish(&dish).is_err());

        dish.name = "长".repeat(51);
        assert!(validate_custom_dish(&dish).is_err());

        dish.name = "长".repeat(50);
        assert!(validate_custom_dish(&dish).is_ok());
    }

    #[test]
    fn test_validate_custom_dish_calorie_bounds() {
        let mut dish = sample_custom();
        dish.calories = 0.0;
        assert!(validate_custom_dish(&dish).is_err());

        dish.calories = 2000.0;
        assert!(validate_custom_dish(&dish).is_ok());

        dish.calories = 2000.5;
        assert!(validate_custom_dish(&dish).is_err());
    }

    #[test]
    fn test_validate_custom_dish_macro_bounds() {
        let mut dish = sample_custom();
        dish.protein = -1.0;
        assert!(validate_custom_dish(&dish).is_err());

        dish.protein = 200.0;
        assert!(validate_custom_dish(&dish).is_ok());

        dish.fat = 201.0;
        assert!(validate_custom_dish(&dish).is_err());
    }

    #[test]
    fn test_validate_custom_dish_portion_bounds() {
        let mut dish = sample_custom();
        dish.portion = 0;
        assert!(validate_custom_dish(&dish).is_err());

        dish.portion = 1000;
        assert!(validate_custom_dish(&dish).is_ok());

        dish.portion = 1001;
        assert!(validate_custom_dish(&dish).is_err());
    }

    #[test]
    fn test_validate_dish_type() {
        for t in DISH_TYPES {
            assert!(validate_dish_type(t).is_ok());
        }
        assert!(validate_dish_type("甜品").is_err());
        assert!(validate_dish_type(ALL).is_err());
    }

    #[test]
    fn test_dish_serde_wire_format() {
        let dish = sample_custom().into_dish(CUSTOM_DISH_ID_OFFSET + 1);
        let json = serde_json::to_value(&dish).unwrap();
        assert_eq!(json["type"], "荤菜");
        assert_eq!(json["custom"], true);
        assert_eq!(json["portion"], 150);

        // Catalog dishes omit the custom flag entirely.
        let mut plain = dish.clone();
        plain.custom = false;
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("custom").is_none());
    }

    #[test]
    fn test_daily_data_serde_camel_case() {
        let daily = DailyData::empty("2026-02-17");
        let json = serde_json::to_value(&daily).unwrap();
        assert!(json.get("selectedDishes").is_some());
        assert!(json.get("savedToHistory").is_some());
        assert!(json.get("lastModified").is_some());
        assert_eq!(json["totalCalories"], 0.0);
    }

    #[test]
    fn test_preferences_default() {
        let prefs = Preferences::default();
        assert_eq!(prefs.default_cuisine, ALL);
        assert_eq!(prefs.default_type, ALL);
        assert!(!prefs.enable_notifications);
    }

    #[test]
    fn test_now_iso_shape() {
        let ts = now_iso();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
