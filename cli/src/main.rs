mod commands;
mod config;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::commands::{
    cmd_activity, cmd_add, cmd_custom_add, cmd_dishes, cmd_export, cmd_history, cmd_load,
    cmd_prefs, cmd_quantity, cmd_remove, cmd_save, cmd_share, cmd_summary,
};
use crate::config::Config;
use festcal_core::export::ExportFormat;
use festcal_core::storage::FileStorage;
use festcal_core::store::AppStore;

#[derive(Parser)]
#[command(
    name = "festcal",
    version,
    about = "A festive-meal calorie calculator CLI",
    long_about = "\n\n  🧧 festcal 🧧\n  春节美食热量计算器\n  know what the feast costs.\n"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the dish catalog (plus your custom dishes)
    Dishes {
        /// Filter by cuisine (default: your preference, 全部 for everything)
        #[arg(short, long)]
        cuisine: Option<String>,
        /// Filter by dish type: 荤菜, 素菜, 汤品, 主食, 点心
        #[arg(short = 't', long = "type")]
        dish_type: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a dish to a day's selection
    Add {
        /// Dish id or (partial) name
        dish: String,
        /// Quantity in grams, e.g. "150" or "150g" (default: the dish's portion)
        quantity: Option<String>,
        /// Date to add for (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a dish from a day's selection
    Remove {
        /// Dish id to remove
        dish_id: i64,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Adjust a selected dish's quantity by a signed gram delta
    Quantity {
        /// Dish id to adjust
        dish_id: i64,
        /// Gram delta, e.g. 50 or -50 (reaching 0 removes the dish)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a day's selection, totals, health tips, and swap suggestions
    Summary {
        /// Date to show (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Exercise minutes needed to burn a day's calories
    Activity {
        /// Activity name (e.g. 跑步); omit for the whole table
        name: Option<String>,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a day to history
    Save {
        /// Date to save (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load a saved day back as the active selection
    Load {
        /// Date of the saved record (YYYY-MM-DD)
        date: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved history records
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage custom dishes
    Custom {
        #[command(subcommand)]
        command: CustomCommands,
    },
    /// Export a day as JSON or CSV
    Export {
        /// Date to export (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        date: Option<String>,
        /// Export format
        #[arg(short, long, value_enum, default_value_t = ExportFormatArg::Json)]
        format: ExportFormatArg,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a shareable plain-text snapshot of a day
    Share {
        /// Date to share (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        date: Option<String>,
    },
    /// Show or change user preferences
    Prefs {
        /// Default cuisine filter
        #[arg(long)]
        cuisine: Option<String>,
        /// Default dish-type filter
        #[arg(long = "type")]
        dish_type: Option<String>,
        /// Enable or disable notifications
        #[arg(long)]
        notifications: Option<bool>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CustomCommands {
    /// Add a custom dish (daily by default, --global to share across days)
    Add {
        /// Dish name
        name: String,
        /// Calories per 100g
        #[arg(long)]
        calories: f64,
        /// Protein per 100g
        #[arg(long, default_value_t = 0.0)]
        protein: f64,
        /// Fat per 100g
        #[arg(long, default_value_t = 0.0)]
        fat: f64,
        /// Carbs per 100g
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,
        /// Default portion in grams
        #[arg(long, default_value_t = 100)]
        portion: i64,
        /// Dish type: 荤菜, 素菜, 汤品, 主食, 点心
        #[arg(long = "type", default_value = "荤菜")]
        dish_type: String,
        /// Cuisine label
        #[arg(long, default_value = "自定义")]
        cuisine: String,
        /// Icon shown in listings
        #[arg(long, default_value = "🍽️")]
        icon: String,
        /// Register globally instead of for one day
        #[arg(long)]
        global: bool,
        /// Date the dish belongs to (ignored with --global)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormatArg {
    Json,
    Csv,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Json => Self::Json,
            ExportFormatArg::Csv => Self::Csv,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let storage = FileStorage::in_dir(&config.data_dir);
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let mut store = AppStore::open(storage, today);

    match cli.command {
        Commands::Dishes {
            cuisine,
            dish_type,
            json,
        } => cmd_dishes(&store, cuisine.as_deref(), dish_type.as_deref(), json),
        Commands::Add {
            dish,
            quantity,
            date,
            json,
        } => cmd_add(&mut store, &dish, quantity.as_deref(), date, json),
        Commands::Remove {
            dish_id,
            date,
            json,
        } => cmd_remove(&mut store, dish_id, date, json),
        Commands::Quantity {
            dish_id,
            delta,
            date,
            json,
        } => cmd_quantity(&mut store, dish_id, delta, date, json),
        Commands::Summary { date, json } => cmd_summary(&mut store, date, json),
        Commands::Activity { name, date, json } => {
            cmd_activity(&mut store, name.as_deref(), date, json)
        }
        Commands::Save { date, json } => cmd_save(&mut store, date, json),
        Commands::Load { date, json } => cmd_load(&mut store, &date, json),
        Commands::History { json } => cmd_history(&store, json),
        Commands::Custom { command } => match command {
            CustomCommands::Add {
                name,
                calories,
                protein,
                fat,
                carbs,
                portion,
                dish_type,
                cuisine,
                icon,
                global,
                date,
                json,
            } => cmd_custom_add(
                &mut store,
                festcal_core::models::NewCustomDish {
                    name,
                    calories,
                    protein,
                    fat,
                    carbs,
                    portion,
                    cuisine,
                    dish_type,
                    icon,
                },
                global,
                date,
                json,
            ),
        },
        Commands::Export {
            date,
            format,
            output,
        } => cmd_export(&mut store, date, format.into(), output.as_deref()),
        Commands::Share { date } => cmd_share(&mut store, date),
        Commands::Prefs {
            cuisine,
            dish_type,
            notifications,
            json,
        } => cmd_prefs(
            &mut store,
            cuisine.as_deref(),
            dish_type.as_deref(),
            notifications,
            json,
        ),
    }
}
