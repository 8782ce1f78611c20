//! Rule-based derived views: health tips and lower-calorie alternatives.

use serde::Serialize;

use crate::calculator::Nutrition;
use crate::catalog;
use crate::models::{Dish, MEAT_TYPE, SelectedDish};

const CALORIES_HIGH: i64 = 3000;
const CALORIES_MODERATE: i64 = 2000;
const MIN_PROTEIN_G: i64 = 30;
const MAX_MEAT_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipKind {
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthTip {
    #[serde(rename = "type")]
    pub kind: TipKind,
    pub icon: &'static str,
    pub text: &'static str,
}

fn tip(kind: TipKind, icon: &'static str, text: &'static str) -> HealthTip {
    HealthTip { kind, icon, text }
}

/// Evaluate the tip rules against a day's selection.
///
/// The three calorie tiers are mutually exclusive (checked high to low,
/// first match wins, nothing for an empty day); the meat-ratio and
/// protein tips stack on top independently.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn health_tips(selected: &[SelectedDish], dishes: &[Dish], totals: &Nutrition) -> Vec<HealthTip> {
    let mut tips = Vec::new();

    if totals.calories > CALORIES_HIGH {
        tips.push(tip(
            TipKind::Warning,
            "⚠️",
            "热量摄入较高，建议减少高热量菜品，增加蔬菜摄入",
        ));
    } else if totals.calories > CALORIES_MODERATE {
        tips.push(tip(TipKind::Info, "💡", "热量适中，可以适当增加运动消耗"));
    } else if totals.calories > 0 {
        tips.push(tip(TipKind::Success, "✅", "热量控制得很好，继续保持！"));
    }

    // The ratio compares unrounded meat calories against the cached total;
    // keeping the numerator unrounded matches historical behavior.
    let meat_calories: f64 = selected
        .iter()
        .filter_map(|s| {
            dishes
                .iter()
                .find(|d| d.id == s.id && d.dish_type == MEAT_TYPE)
                .map(|d| d.calories * s.quantity as f64 / 100.0)
        })
        .sum();
    if meat_calories > totals.calories as f64 * MAX_MEAT_RATIO {
        tips.push(tip(TipKind::Warning, "🥬", "荤菜比例过高，建议增加素菜和汤品"));
    }

    if totals.protein < MIN_PROTEIN_G && totals.calories > 0 {
        tips.push(tip(
            TipKind::Info,
            "🥚",
            "蛋白质摄入不足，建议增加肉类、蛋类或豆制品",
        ));
    }

    tips
}

/// A suggested lower-calorie swap for a selected dish. `saved` is the
/// calorie delta at the selected quantity (negative = calories saved).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub original: String,
    pub alternative: String,
    pub saved: f64,
}

/// Look up the name-keyed substitute table for every selected dish, in
/// selection order. Unresolvable ids and unmapped names are skipped.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn alternatives(selected: &[SelectedDish], dishes: &[Dish]) -> Vec<Alternative> {
    selected
        .iter()
        .filter_map(|s| {
            let dish = dishes.iter().find(|d| d.id == s.id)?;
            let (alternative, diff) = catalog::alternative_for(&dish.name)?;
            Some(Alternative {
                original: dish.name.clone(),
                alternative: alternative.to_string(),
                saved: diff * s.quantity as f64 / 100.0,
            })
        })
        .collect()
}
