use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use festcal_core::export::{
    ExportFormat, build_export_record, export_file_name, share_text, to_csv, to_json,
};
use festcal_core::storage::Storage;
use festcal_core::store::AppStore;

use super::helpers::parse_date;

/// Export one day's record. Writes to `output` when given, otherwise the
/// conventional `calorie-report-<date>.<ext>` name in the working directory.
pub(crate) fn cmd_export<S: Storage>(
    store: &mut AppStore<S>,
    date: Option<String>,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let date = parse_date(date)?;
    store.change_date(&date);

    let daily = store.current_daily();
    let dishes = store.resolvable_dishes(&date);
    let record = build_export_record(&date, &daily.selected_dishes, &dishes);

    let content = match format {
        ExportFormat::Json => to_json(&record)?,
        ExportFormat::Csv => to_csv(&record)?,
    };

    let path = output.map_or_else(
        || Path::new(&export_file_name(&date, format)).to_path_buf(),
        Path::to_path_buf,
    );
    fs::write(&path, &content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let count = record.dishes.len();
    println!("Exported {date} ({count} dishes) to {}", path.display());
    Ok(())
}

pub(crate) fn cmd_share<S: Storage>(store: &mut AppStore<S>, date: Option<String>) -> Result<()> {
    let date = parse_date(date)?;
    store.change_date(&date);

    let daily = store.current_daily();
    let dishes = store.resolvable_dishes(&date);
    let record = build_export_record(&date, &daily.selected_dishes, &dishes);

    println!("{}", share_text(&record));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use festcal_core::storage::MemoryStorage;

    #[test]
    fn test_export_writes_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        let mut store = AppStore::open(MemoryStorage::new(), "2026-02-17");
        store.add_dish(1, 150).unwrap();

        cmd_export(
            &mut store,
            Some("2026-02-17".to_string()),
            ExportFormat::Csv,
            Some(&path),
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("菜品名称,分量,热量(千卡)"));
        assert!(content.contains("红烧肉,150,480"));
        assert!(content.contains("总计,150,480"));
    }

    #[test]
    fn test_export_json_omits_stale_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let mut store = AppStore::open(MemoryStorage::new(), "2026-02-17");
        store.add_dish(3, 200).unwrap();
        store.add_dish(424_242, 500).unwrap();

        cmd_export(
            &mut store,
            Some("2026-02-17".to_string()),
            ExportFormat::Json,
            Some(&path),
        )
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["dishes"].as_array().unwrap().len(), 1);
        assert_eq!(value["dishes"][0]["name"], "清蒸鲈鱼");
        assert_eq!(value["totalCalories"], 220);
    }
}

