use anyhow::Result;
use serde::Serialize;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use festcal_core::storage::Storage;
use festcal_core::store::AppStore;

use super::helpers::{json_error, parse_date};

pub(crate) fn cmd_save<S: Storage>(
    store: &mut AppStore<S>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    store.change_date(&date);

    let daily = store.current_daily();
    if daily.selected_dishes.is_empty() {
        let msg = format!("No dishes selected for {date}, nothing to save");
        if json {
            println!("{}", json_error(&msg));
        } else {
            eprintln!("{msg}");
        }
        process::exit(2);
    }

    store.save_to_history()?;

    if json {
        #[derive(Serialize)]
        struct SaveOut<'a> {
            date: &'a str,
            saved: bool,
        }
        let out = SaveOut { date: &date, saved: true };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let total = daily.total_calories;
    println!("Saved {date} to history ({total:.0} kcal)");
    Ok(())
}

pub(crate) fn cmd_load<S: Storage>(store: &mut AppStore<S>, date: &str, json: bool) -> Result<()> {
    let date = parse_date(Some(date.to_string()))?;

    if !store.load_from_history(&date)? {
        let msg = format!("No saved record for {date}");
        if json {
            println!("{}", json_error(&msg));
        } else {
            eprintln!("{msg}");
        }
        process::exit(2);
    }

    let daily = store.current_daily();

    if json {
        println!("{}", serde_json::to_string_pretty(&daily)?);
        return Ok(());
    }

    let count = daily.selected_dishes.len();
    let total = daily.total_calories;
    println!("Loaded {date} from history: {count} dishes, {total:.0} kcal");
    Ok(())
}

pub(crate) fn cmd_history<S: Storage>(store: &AppStore<S>, json: bool) -> Result<()> {
    let records = store.history();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        eprintln!("No history records saved yet");
        process::exit(2);
    }

    #[derive(Tabled)]
    struct HistoryRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Dishes")]
        dishes: usize,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "Protein")]
        protein: String,
        #[tabled(rename = "Fat")]
        fat: String,
        #[tabled(rename = "Carbs")]
        carbs: String,
    }

    let rows: Vec<HistoryRow> = records
        .iter()
        .map(|r| HistoryRow {
            date: r.date.clone(),
            dishes: r.dishes.len(),
            calories: r.total_calories.to_string(),
            protein: format!("{}g", r.total_protein),
            fat: format!("{}g", r.total_fat),
            carbs: format!("{}g", r.total_carbs),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}
