use anyhow::Result;
use serde::Serialize;
use std::process;

use festcal_core::calculator::{Nutrition, dish_nutrition};
use festcal_core::models::DailyData;
use festcal_core::storage::Storage;
use festcal_core::store::AppStore;
use festcal_core::tips::{Alternative, HealthTip, alternatives, health_tips};

use super::helpers::parse_date;

#[derive(Serialize)]
struct SummaryOut {
    daily: DailyData,
    tips: Vec<HealthTip>,
    alternatives: Vec<Alternative>,
}

pub(crate) fn cmd_summary<S: Storage>(
    store: &mut AppStore<S>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    store.change_date(&date);

    let daily = store.current_daily();
    let dishes = store.resolvable_dishes(&date);
    #[allow(clippy::cast_possible_truncation)]
    let totals = Nutrition {
        calories: daily.total_calories.round() as i64,
        protein: daily.total_protein.round() as i64,
        fat: daily.total_fat.round() as i64,
        carbs: daily.total_carbs.round() as i64,
    };
    let tips = health_tips(&daily.selected_dishes, &dishes, &totals);
    let swaps = alternatives(&daily.selected_dishes, &dishes);

    if json {
        let out = SummaryOut {
            daily,
            tips,
            alternatives: swaps,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if daily.selected_dishes.is_empty() {
        eprintln!("No dishes selected for {date}");
        process::exit(2);
    }

    println!("=== {date} ===\n");

    for s in &daily.selected_dishes {
        let Some(dish) = dishes.iter().find(|d| d.id == s.id) else {
            let id = s.id;
            let quantity = s.quantity;
            println!("    [{id}] (unknown dish) — {quantity}g");
            continue;
        };
        let n = dish_nutrition(dish, s.quantity);
        let id = dish.id;
        let icon = &dish.icon;
        let name = &dish.name;
        let quantity = s.quantity;
        let cal = n.calories;
        let protein = n.protein;
        let fat = n.fat;
        let carbs = n.carbs;
        println!(
            "    [{id}] {icon} {name} — {quantity}g — {cal} kcal | P:{protein}g F:{fat}g C:{carbs}g"
        );
    }

    let cal = totals.calories;
    let protein = totals.protein;
    let fat = totals.fat;
    let carbs = totals.carbs;
    println!("\n  TOTAL: {cal} kcal | P:{protein}g F:{fat}g C:{carbs}g");

    if !tips.is_empty() {
        println!();
        for tip in &tips {
            let icon = tip.icon;
            let text = tip.text;
            println!("  {icon} {text}");
        }
    }

    if !swaps.is_empty() {
        println!("\n  换一换:");
        for alt in &swaps {
            let original = &alt.original;
            let alternative = &alt.alternative;
            let saved = -alt.saved;
            println!("    {original} → {alternative} (省 {saved:.0} 千卡)");
        }
    }

    Ok(())
}
