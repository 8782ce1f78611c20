//! The daily record store: owns the persisted document, exposes
//! date-scoped mutators, and keeps cached totals consistent with the
//! selection after every structural change.

use anyhow::{Result, bail};

use crate::calculator::total_nutrition;
use crate::catalog;
use crate::models::{
    CUSTOM_DISH_ID_OFFSET, CalorieAppData, DailyData, Dish, HistoryRecord, NewCustomDish,
    Preferences, SelectedDish, now_iso, validate_custom_dish,
};
use crate::storage::{Storage, load_app_data, save_app_data};

/// Application store over an injected storage port. Every mutator
/// recomputes the active day's totals from the resolvable dish set and
/// rewrites the whole document.
pub struct AppStore<S: Storage> {
    storage: S,
    data: CalorieAppData,
    current_date: String,
}

impl<S: Storage> AppStore<S> {
    /// Load (or recover) the document and position the store on `date`.
    pub fn open(storage: S, date: impl Into<String>) -> Self {
        let data = load_app_data(&storage);
        Self {
            storage,
            data,
            current_date: date.into(),
        }
    }

    #[must_use]
    pub fn data(&self) -> &CalorieAppData {
        &self.data
    }

    #[must_use]
    pub fn current_date(&self) -> &str {
        &self.current_date
    }

    pub fn change_date(&mut self, date: impl Into<String>) {
        self.current_date = date.into();
    }

    /// The active day's record, or a fresh zeroed one. Creation is lazy:
    /// nothing is persisted until a mutator touches the date.
    #[must_use]
    pub fn current_daily(&self) -> DailyData {
        self.data
            .daily_records
            .get(&self.current_date)
            .cloned()
            .unwrap_or_else(|| DailyData::empty(&self.current_date))
    }

    /// Every dish resolvable on `date`: the static catalog, then global
    /// custom dishes, then the day's own custom dishes. Later sources win
    /// on id collision.
    #[must_use]
    pub fn resolvable_dishes(&self, date: &str) -> Vec<Dish> {
        let mut dishes: Vec<Dish> = catalog::dishes().to_vec();
        let daily_customs = self
            .data
            .daily_records
            .get(date)
            .map(|d| d.custom_dishes.as_slice())
            .unwrap_or_default();
        for dish in self.data.custom_dishes.iter().chain(daily_customs) {
            if let Some(existing) = dishes.iter_mut().find(|d| d.id == dish.id) {
                *existing = dish.clone();
            } else {
                dishes.push(dish.clone());
            }
        }
        dishes
    }

    /// Add `quantity` grams of a dish to the active day. An existing
    /// selection of the same id accumulates; otherwise the dish is
    /// appended.
    pub fn add_dish(&mut self, id: i64, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            bail!("Quantity must be greater than 0 grams");
        }
        let mut daily = self.current_daily();
        if let Some(entry) = daily.selected_dishes.iter_mut().find(|d| d.id == id) {
            entry.quantity += quantity;
        } else {
            daily.selected_dishes.push(SelectedDish { id, quantity });
        }
        self.commit_daily(daily)
    }

    /// Remove a dish from the active day's selection.
    pub fn remove_dish(&mut self, id: i64) -> Result<()> {
        let mut daily = self.current_daily();
        daily.selected_dishes.retain(|d| d.id != id);
        self.commit_daily(daily)
    }

    /// Apply a signed gram delta to a selected dish. The new quantity is
    /// floored at zero, and a zero-quantity entry is removed rather than
    /// retained. An absent id leaves the selection unchanged.
    pub fn update_quantity(&mut self, id: i64, delta: i64) -> Result<()> {
        let mut daily = self.current_daily();
        for entry in &mut daily.selected_dishes {
            if entry.id == id {
                entry.quantity = (entry.quantity + delta).max(0);
            }
        }
        daily.selected_dishes.retain(|d| d.quantity > 0);
        self.commit_daily(daily)
    }

    /// Validate and register a custom dish for the active day only.
    /// The dish becomes resolvable but is not auto-selected.
    pub fn add_custom_dish(&mut self, new: NewCustomDish) -> Result<Dish> {
        validate_custom_dish(&new)?;
        let dish = new.into_dish(self.next_custom_id());
        let mut daily = self.current_daily();
        daily.custom_dishes.push(dish.clone());
        self.commit_daily(daily)?;
        Ok(dish)
    }

    /// Validate and register a custom dish shared across all days.
    pub fn add_global_custom_dish(&mut self, new: NewCustomDish) -> Result<Dish> {
        validate_custom_dish(&new)?;
        let dish = new.into_dish(self.next_custom_id());
        self.data.custom_dishes.push(dish.clone());
        // The resolution set changed, so the active day's totals may too.
        self.commit_daily(self.current_daily())?;
        Ok(dish)
    }

    /// Mark the active day as saved to history. Idempotent beyond the
    /// `lastModified` refresh.
    pub fn save_to_history(&mut self) -> Result<()> {
        let mut daily = self.current_daily();
        daily.saved_to_history = true;
        self.commit_daily(daily)
    }

    /// Re-activate a saved day: refresh its timestamp and switch the
    /// current date to it. Returns false (no state change) when no saved
    /// record exists for `date`.
    pub fn load_from_history(&mut self, date: &str) -> Result<bool> {
        let Some(record) = self
            .data
            .daily_records
            .get(date)
            .filter(|r| r.saved_to_history)
            .cloned()
        else {
            return Ok(false);
        };
        self.current_date = date.to_string();
        self.commit_daily(record)?;
        Ok(true)
    }

    /// Saved days projected as read-only history, newest first.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn history(&self) -> Vec<HistoryRecord> {
        let mut records: Vec<HistoryRecord> = self
            .data
            .daily_records
            .values()
            .filter(|r| r.saved_to_history)
            .map(|r| HistoryRecord {
                date: r.date.clone(),
                dishes: r.selected_dishes.clone(),
                total_calories: r.total_calories.round() as i64,
                total_protein: r.total_protein.round() as i64,
                total_fat: r.total_fat.round() as i64,
                total_carbs: r.total_carbs.round() as i64,
            })
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    pub fn set_preferences(&mut self, preferences: Preferences) -> Result<()> {
        self.data.preferences = preferences;
        self.persist()
    }

    /// Recompute totals for a day from the currently resolvable dish set,
    /// stamp it, store it, and rewrite the document. Totals are never
    /// trusted after a structural change.
    fn commit_daily(&mut self, mut daily: DailyData) -> Result<()> {
        let dishes = self.resolvable_dishes(&daily.date);
        let totals = total_nutrition(&daily.selected_dishes, &dishes);
        #[allow(clippy::cast_precision_loss)]
        {
            daily.total_calories = totals.calories as f64;
            daily.total_protein = totals.protein as f64;
            daily.total_fat = totals.fat as f64;
            daily.total_carbs = totals.carbs as f64;
        }
        daily.last_modified = now_iso();
        self.data.daily_records.insert(daily.date.clone(), daily);
        self.persist()
    }

    fn next_custom_id(&self) -> i64 {
        self.data
            .custom_dishes
            .iter()
            .chain(
                self.data
                    .daily_records
                    .values()
                    .flat_map(|d| d.custom_dishes.iter()),
            )
            .map(|d| d.id)
            .max()
            .unwrap_or(CUSTOM_DISH_ID_OFFSET)
            .max(CUSTOM_DISH_ID_OFFSET)
            + 1
    }

    fn persist(&self) -> Result<()> {
        save_app_data(&self.storage, &self.data)
    }
}
