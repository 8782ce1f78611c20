use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use festcal_core::calculator::activity_minutes;
use festcal_core::catalog::ACTIVITY_FACTORS;
use festcal_core::storage::Storage;
use festcal_core::store::AppStore;

use super::helpers::{json_error, parse_date};

/// Show how long each activity (or one named activity) takes to burn a
/// day's total calories.
pub(crate) fn cmd_activity<S: Storage>(
    store: &mut AppStore<S>,
    name: Option<&str>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    store.change_date(&date);

    let total = store.current_daily().total_calories;
    if total <= 0.0 {
        let msg = format!("No calories logged for {date}");
        if json {
            println!("{}", json_error(&msg));
        } else {
            eprintln!("{msg}");
        }
        process::exit(2);
    }

    if let Some(name) = name {
        let minutes = match activity_minutes(name, total) {
            Ok(minutes) => minutes,
            Err(e) => {
                let msg = format!("{e:#}");
                if json {
                    println!("{}", json_error(&msg));
                } else {
                    eprintln!("{msg}");
                }
                process::exit(2);
            }
        };
        if json {
            #[derive(Serialize)]
            struct ActivityOut<'a> {
                date: &'a str,
                activity: &'a str,
                minutes: i64,
            }
            let out = ActivityOut {
                date: &date,
                activity: name,
                minutes,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("{name} {minutes} 分钟可消耗 {total:.0} 千卡 ({date})");
        }
        return Ok(());
    }

    if json {
        let mut out = BTreeMap::new();
        for &(activity, _) in ACTIVITY_FACTORS {
            out.insert(activity, activity_minutes(activity, total)?);
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    #[derive(Tabled)]
    struct ActivityRow {
        #[tabled(rename = "Activity")]
        activity: &'static str,
        #[tabled(rename = "Minutes")]
        minutes: String,
    }

    let mut rows = Vec::new();
    for &(activity, _) in ACTIVITY_FACTORS {
        let minutes = activity_minutes(activity, total)?;
        rows.push(ActivityRow {
            activity,
            minutes: minutes.to_string(),
        });
    }

    println!("消耗 {total:.0} 千卡 ({date}) 需要:\n");
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}
