//! Pure nutrition aggregation.
//!
//! Rounding happens per dish, before summation, so day totals are sums of
//! already-rounded integers. Summing unrounded values and rounding once
//! would be off by ±1 kcal in edge cases relative to previously exported
//! reports, so the per-dish order is deliberate.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::catalog;
use crate::models::{Dish, SelectedDish};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Nutrition {
    pub calories: i64,
    pub protein: i64,
    pub fat: i64,
    pub carbs: i64,
}

fn round(value: f64) -> i64 {
    value.round() as i64
}

/// Nutrition contributed by one dish at the given quantity in grams.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn dish_nutrition(dish: &Dish, quantity_g: i64) -> Nutrition {
    let ratio = quantity_g as f64 / 100.0;
    Nutrition {
        calories: round(dish.calories * ratio),
        protein: round(dish.protein * ratio),
        fat: round(dish.fat * ratio),
        carbs: round(dish.carbs * ratio),
    }
}

/// Sum [`dish_nutrition`] over every selection whose id resolves in
/// `dishes`. Unresolvable ids contribute zero — a stale reference is
/// never an error.
#[must_use]
pub fn total_nutrition(selected: &[SelectedDish], dishes: &[Dish]) -> Nutrition {
    selected
        .iter()
        .filter_map(|s| {
            dishes
                .iter()
                .find(|d| d.id == s.id)
                .map(|d| dish_nutrition(d, s.quantity))
        })
        .fold(Nutrition::default(), |acc, n| Nutrition {
            calories: acc.calories + n.calories,
            protein: acc.protein + n.protein,
            fat: acc.fat + n.fat,
            carbs: acc.carbs + n.carbs,
        })
}

/// Minutes of an activity needed to burn `total_calories`. An unknown
/// activity name is a configuration fault, not a runtime condition.
pub fn activity_minutes(activity: &str, total_calories: f64) -> Result<i64> {
    let factor = catalog::activity_factor(activity).with_context(|| {
        format!(
            "Unknown activity '{activity}'. Must be one of: {}",
            catalog::ACTIVITY_FACTORS
                .iter()
                .map(|(n, _)| *n)
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;
    Ok(round(total_calories / factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{dish_by_id, dishes};

    #[test]
    fn test_dish_nutrition_catalog_dish() {
        // 红烧肉 at 150g: 320 kcal/100g → 480 kcal.
        let d = dish_by_id(1).unwrap();
        let n = dish_nutrition(d, 150);
        assert_eq!(n.calories, 480);
        assert_eq!(n.protein, 27);
        assert_eq!(n.fat, 36);
        assert_eq!(n.carbs, 5); // 3 * 1.5 = 4.5 rounds up
    }

    #[test]
    fn test_dish_nutrition_rounds_per_dish() {
        // 蒜蓉西兰花 has 0.5g fat per 100g; 150g → 0.75 → 1.
        let d = dish_by_id(21).unwrap();
        let n = dish_nutrition(d, 150);
        assert_eq!(n.fat, 1);
        assert_eq!(n.calories, 53); // 35 * 1.5 = 52.5
    }

    #[test]
    fn test_total_nutrition_sums_rounded_values() {
        // Two dishes whose unrounded calories both end in .5: the total is
        // the sum of the rounded values, not the rounded sum.
        let selected = vec![
            SelectedDish { id: 21, quantity: 150 }, // 52.5 → 53
            SelectedDish { id: 31, quantity: 150 }, // 142.5 → 143
        ];
        let total = total_nutrition(&selected, dishes());
        assert_eq!(total.calories, 196); // round(52.5 + 142.5) would be 195
    }

    #[test]
    fn test_total_nutrition_skips_unresolvable_ids() {
        let selected = vec![
            SelectedDish { id: 1, quantity: 150 },
            SelectedDish { id: 9999, quantity: 500 },
        ];
        let total = total_nutrition(&selected, dishes());
        assert_eq!(total.calories, 480);
    }

    #[test]
    fn test_total_nutrition_empty_selection() {
        let total = total_nutrition(&[], dishes());
        assert_eq!(total, Nutrition::default());
    }

    #[test]
    fn test_activity_minutes_known() {
        // 跑步 factor 0.1: 480 kcal → 4800 minutes (the table is symbolic).
        assert_eq!(activity_minutes("跑步", 480.0).unwrap(), 4800);
        assert_eq!(activity_minutes("瑜伽", 90.0).unwrap(), 3000);
    }

    #[test]
    fn test_activity_minutes_rounds() {
        assert_eq!(activity_minutes("跳绳", 100.0).unwrap(), 833);
    }

    #[test]
    fn test_activity_minutes_unknown_is_error() {
        let err = activity_minutes("举重", 480.0).unwrap_err();
        assert!(err.to_string().contains("举重"));
    }
}
