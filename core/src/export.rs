//! Presentation-layer string builders: CSV/JSON export of one day and
//! the plain-text share blob. No business logic lives here.

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::calculator::{dish_nutrition, total_nutrition};
use crate::models::{Dish, SelectedDish};

const CSV_HEADER: [&str; 6] = ["菜品名称", "分量", "热量(千卡)", "蛋白质", "脂肪", "碳水化合物"];
const CSV_TOTALS_LABEL: &str = "总计";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportDish {
    pub name: String,
    pub quantity: i64,
    pub calories: i64,
    pub protein: i64,
    pub fat: i64,
    pub carbs: i64,
}

/// Snapshot of one day in the export wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub date: String,
    pub total_calories: i64,
    pub total_protein: i64,
    pub total_fat: i64,
    pub total_carbs: i64,
    pub dishes: Vec<ExportDish>,
}

/// Project a day's selection into an [`ExportRecord`]. Selections whose
/// id no longer resolves are omitted, per the stale-reference policy.
#[must_use]
pub fn build_export_record(date: &str, selected: &[SelectedDish], dishes: &[Dish]) -> ExportRecord {
    let totals = total_nutrition(selected, dishes);
    let dishes: Vec<ExportDish> = selected
        .iter()
        .filter_map(|s| {
            let dish = dishes.iter().find(|d| d.id == s.id)?;
            let n = dish_nutrition(dish, s.quantity);
            Some(ExportDish {
                name: dish.name.clone(),
                quantity: s.quantity,
                calories: n.calories,
                protein: n.protein,
                fat: n.fat,
                carbs: n.carbs,
            })
        })
        .collect();
    ExportRecord {
        date: date.to_string(),
        total_calories: totals.calories,
        total_protein: totals.protein,
        total_fat: totals.fat,
        total_carbs: totals.carbs,
        dishes,
    }
}

pub fn to_json(record: &ExportRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// CSV layout: header row, one row per dish, a blank separator line,
/// then a 总计 row summing quantities and nutrients.
pub fn to_csv(record: &ExportRecord) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for d in &record.dishes {
        wtr.write_record([
            d.name.as_str(),
            &d.quantity.to_string(),
            &d.calories.to_string(),
            &d.protein.to_string(),
            &d.fat.to_string(),
            &d.carbs.to_string(),
        ])?;
    }
    let body = String::from_utf8(wtr.into_inner().map_err(|e| anyhow!("csv writer: {e}"))?)?;

    let total_quantity: i64 = record.dishes.iter().map(|d| d.quantity).sum();
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        CSV_TOTALS_LABEL,
        &total_quantity.to_string(),
        &record.total_calories.to_string(),
        &record.total_protein.to_string(),
        &record.total_fat.to_string(),
        &record.total_carbs.to_string(),
    ])?;
    let totals = String::from_utf8(wtr.into_inner().map_err(|e| anyhow!("csv writer: {e}"))?)?;

    Ok(format!("{body}\n{totals}"))
}

/// The fixed festive share template.
#[must_use]
pub fn share_text(record: &ExportRecord) -> String {
    let dishes_text = record
        .dishes
        .iter()
        .map(|d| format!("- {} ({}g)", d.name, d.quantity))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "🧧 春节美食热量计算器 🧧\n\n📅 日期: {}\n🔥 总热量: {} 千卡\n\n📊 营养素:\n• 蛋白质: {}g\n• 脂肪: {}g\n• 碳水化合物: {}g\n\n已选菜品:\n{}\n\n🧨 2026 马年春节快乐！",
        record.date,
        record.total_calories,
        record.total_protein,
        record.total_fat,
        record.total_carbs,
        dishes_text
    )
}

#[must_use]
pub fn export_file_name(date: &str, format: ExportFormat) -> String {
    format!("calorie-report-{date}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::dishes;

    fn sample_record() -> ExportRecord {
        let selected = vec![
            SelectedDish { id: 1, quantity: 150 }, // 红烧肉 → 480 kcal
            SelectedDish { id: 3, quantity: 200 }, // 清蒸鲈鱼 → 220 kcal
        ];
        build_export_record("2026-02-17", &selected, dishes())
    }

    #[test]
    fn test_build_export_record() {
        let record = sample_record();
        assert_eq!(record.date, "2026-02-17");
        assert_eq!(record.dishes.len(), 2);
        assert_eq!(record.dishes[0].name, "红烧肉");
        assert_eq!(record.dishes[0].calories, 480);
        assert_eq!(record.total_calories, 700);
        assert_eq!(record.total_protein, 67); // 27 + 40
    }

    #[test]
    fn test_build_export_record_omits_stale_selections() {
        let selected = vec![
            SelectedDish { id: 1, quantity: 150 },
            SelectedDish { id: 424_242, quantity: 500 },
        ];
        let record = build_export_record("2026-02-17", &selected, dishes());
        assert_eq!(record.dishes.len(), 1);
        assert_eq!(record.total_calories, 480);
    }

    #[test]
    fn test_json_shape() {
        let json = to_json(&sample_record()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalCalories"], 700);
        assert_eq!(value["dishes"][0]["name"], "红烧肉");
        assert_eq!(value["dishes"][1]["quantity"], 200);
        // Pretty-printed.
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_csv_format() {
        let csv = to_csv(&sample_record()).unwrap();
        let expected = "菜品名称,分量,热量(千卡),蛋白质,脂肪,碳水化合物\n\
                        红烧肉,150,480,27,36,5\n\
                        清蒸鲈鱼,200,220,40,4,0\n\
                        \n\
                        总计,350,700,67,40,5\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_csv_empty_selection_still_has_totals_row() {
        let record = build_export_record("2026-02-17", &[], dishes());
        let csv = to_csv(&record).unwrap();
        assert_eq!(
            csv,
            "菜品名称,分量,热量(千卡),蛋白质,脂肪,碳水化合物\n\n总计,0,0,0,0,0\n"
        );
    }

    #[test]
    fn test_share_text() {
        let text = share_text(&sample_record());
        assert!(text.starts_with("🧧 春节美食热量计算器 🧧"));
        assert!(text.contains("📅 日期: 2026-02-17"));
        assert!(text.contains("🔥 总热量: 700 千卡"));
        assert!(text.contains("• 蛋白质: 67g"));
        assert!(text.contains("- 红烧肉 (150g)"));
        assert!(text.contains("- 清蒸鲈鱼 (200g)"));
        assert!(text.ends_with("🧨 2026 马年春节快乐！"));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name("2026-02-17", ExportFormat::Json),
            "calorie-report-2026-02-17.json"
        );
        assert_eq!(
            export_file_name("2026-02-17", ExportFormat::Csv),
            "calorie-report-2026-02-17.csv"
        );
    }
}
