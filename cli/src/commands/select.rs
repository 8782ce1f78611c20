use anyhow::Result;
use serde::Serialize;
use std::process;

use festcal_core::calculator::dish_nutrition;
use festcal_core::storage::Storage;
use festcal_core::store::AppStore;

use super::helpers::{json_error, parse_date, parse_quantity};
use super::resolve_dish;

#[derive(Serialize)]
struct SelectionOut<'a> {
    date: &'a str,
    id: i64,
    name: &'a str,
    quantity: i64,
    calories: i64,
}

pub(crate) fn cmd_add<S: Storage>(
    store: &mut AppStore<S>,
    dish_arg: &str,
    quantity: Option<&str>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    store.change_date(&date);

    let dish = resolve_dish(&store.resolvable_dishes(&date), dish_arg)?;
    let quantity = match quantity {
        Some(q) => parse_quantity(q)?,
        None => dish.portion,
    };
    store.add_dish(dish.id, quantity)?;

    let total = store
        .current_daily()
        .selected_dishes
        .iter()
        .find(|d| d.id == dish.id)
        .map_or(quantity, |d| d.quantity);
    let n = dish_nutrition(&dish, total);

    if json {
        let out = SelectionOut {
            date: &date,
            id: dish.id,
            name: &dish.name,
            quantity: total,
            calories: n.calories,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let name = &dish.name;
    let icon = &dish.icon;
    let cal = n.calories;
    println!("Added {icon} {name} — {total}g — {cal} kcal ({date})");
    Ok(())
}

pub(crate) fn cmd_remove<S: Storage>(
    store: &mut AppStore<S>,
    dish_id: i64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    store.change_date(&date);

    let daily = store.current_daily();
    if !daily.selected_dishes.iter().any(|d| d.id == dish_id) {
        let msg = format!("Dish {dish_id} is not selected for {date}");
        if json {
            println!("{}", json_error(&msg));
        } else {
            eprintln!("{msg}");
        }
        process::exit(2);
    }

    store.remove_dish(dish_id)?;

    if json {
        #[derive(Serialize)]
        struct RemoveOut<'a> {
            date: &'a str,
            removed: i64,
        }
        let out = RemoveOut {
            date: &date,
            removed: dish_id,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Removed dish {dish_id} from {date}");
    Ok(())
}

pub(crate) fn cmd_quantity<S: Storage>(
    store: &mut AppStore<S>,
    dish_id: i64,
    delta: i64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    store.change_date(&date);

    let daily = store.current_daily();
    if !daily.selected_dishes.iter().any(|d| d.id == dish_id) {
        let msg = format!("Dish {dish_id} is not selected for {date}");
        if json {
            println!("{}", json_error(&msg));
        } else {
            eprintln!("{msg}");
        }
        process::exit(2);
    }

    store.update_quantity(dish_id, delta)?;

    let daily = store.current_daily();
    let remaining = daily.selected_dishes.iter().find(|d| d.id == dish_id);

    if json {
        #[derive(Serialize)]
        struct QuantityOut<'a> {
            date: &'a str,
            id: i64,
            quantity: i64,
        }
        let out = QuantityOut {
            date: &date,
            id: dish_id,
            quantity: remaining.map_or(0, |d| d.quantity),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match remaining {
        Some(entry) => {
            let quantity = entry.quantity;
            let total = daily.total_calories;
            println!("Dish {dish_id} is now {quantity}g ({date}: {total:.0} kcal)");
        }
        None => println!("Removed dish {dish_id} from {date} (quantity reached 0)"),
    }
    Ok(())
}
