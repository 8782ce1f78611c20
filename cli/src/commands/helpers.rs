use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use festcal_core::models::Dish;

/// Resolve an optional date argument to the stored `YYYY-MM-DD` key.
pub(crate) fn parse_date(date_str: Option<String>) -> Result<String> {
    let date = match date_str {
        None => Local::now().date_naive(),
        Some(s) => match s.as_str() {
            "today" => Local::now().date_naive(),
            "yesterday" => Local::now().date_naive() - chrono::Duration::days(1),
            "tomorrow" => Local::now().date_naive() + chrono::Duration::days(1),
            _ => NaiveDate::parse_from_str(&s, "%Y-%m-%d").with_context(|| {
                format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday/tomorrow")
            })?,
        },
    };
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Parse a gram quantity like "150" or "150g" into whole grams.
pub(crate) fn parse_quantity(s: &str) -> Result<i64> {
    let trimmed = s.trim_end_matches('g').trim();
    let value: i64 = trimmed.parse().with_context(|| {
        format!("Invalid quantity: '{s}'. Use whole grams like '150' or '150g'")
    })?;
    if value <= 0 {
        bail!("Quantity must be greater than 0 grams");
    }
    Ok(value)
}

pub(crate) fn prompt_choice(count: usize) -> Result<usize> {
    eprint!("\nSelect a dish (1-{count}): ");
    io::stderr().flush()?;
    let stdin = io::stdin();
    let line = stdin.lock().lines().next().context("No input")??;
    let n: usize = line.trim().parse().context("Invalid number")?;
    if n < 1 || n > count {
        bail!("Selection out of range");
    }
    Ok(n - 1)
}

pub(crate) fn print_dish_table(dishes: &[&Dish]) {
    #[derive(Tabled)]
    struct DishRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Cuisine")]
        cuisine: String,
        #[tabled(rename = "Type")]
        dish_type: String,
        #[tabled(rename = "Cal/100g")]
        calories: String,
        #[tabled(rename = "P/100g")]
        protein: String,
        #[tabled(rename = "F/100g")]
        fat: String,
        #[tabled(rename = "C/100g")]
        carbs: String,
        #[tabled(rename = "Portion")]
        portion: String,
    }

    let rows: Vec<DishRow> = dishes
        .iter()
        .enumerate()
        .map(|(i, d)| DishRow {
            idx: i + 1,
            id: d.id,
            name: format!("{} {}", d.icon, truncate(&d.name, 20)),
            cuisine: d.cuisine.clone(),
            dish_type: d.dish_type.clone(),
            calories: {
                let cal = d.calories;
                format!("{cal:.0}")
            },
            protein: format!("{:.1}", d.protein),
            fat: format!("{:.1}", d.fat),
            carbs: format!("{:.1}", d.carbs),
            portion: format!("{}g", d.portion),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(5..10)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_none_is_today() {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(parse_date(None).unwrap(), today);
    }

    #[test]
    fn test_parse_date_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(
            parse_date(Some("today".to_string())).unwrap(),
            today.format("%Y-%m-%d").to_string()
        );
        assert_eq!(
            parse_date(Some("yesterday".to_string())).unwrap(),
            (today - chrono::Duration::days(1))
                .format("%Y-%m-%d")
                .to_string()
        );
        assert_eq!(
            parse_date(Some("tomorrow".to_string())).unwrap(),
            (today + chrono::Duration::days(1))
                .format("%Y-%m-%d")
                .to_string()
        );
    }

    #[test]
    fn test_parse_date_iso() {
        assert_eq!(
            parse_date(Some("2026-02-17".to_string())).unwrap(),
            "2026-02-17"
        );
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date(Some("nope".to_string())).is_err());
        assert!(parse_date(Some("2026-2-17".to_string())).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("150").unwrap(), 150);
        assert_eq!(parse_quantity("150g").unwrap(), 150);
        assert_eq!(parse_quantity("150 ").unwrap(), 150);
    }

    #[test]
    fn test_parse_quantity_invalid() {
        assert!(parse_quantity("abc").is_err());
        assert!(parse_quantity("1.5").is_err());
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-50").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world this is long", 10), "hello w...");
    }

    #[test]
    fn test_truncate_utf8() {
        // Should not panic on multi-byte characters
        assert_eq!(truncate("红烧狮子头配青菜心", 8), "红烧狮子头...");
        assert_eq!(truncate("红烧肉", 8), "红烧肉");
    }
}
