// Day Planner - Main Entry Point

use std::path::PathBuf;

use day_planner::models::settings::PlannerSettings;
use day_planner::services::database::Database;
use day_planner::services::settings::{load_or_default, resolve_database_path};
use day_planner::services::storage::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
use day_planner::ui_egui::PlannerApp;

fn open_storage(settings: &PlannerSettings) -> Box<dyn KeyValueStore> {
    let path = resolve_database_path(settings);
    match Database::open(&path).and_then(SqliteKeyValueStore::new) {
        Ok(store) => {
            log::info!("Using database at {}", path.display());
            Box::new(store)
        }
        Err(e) => {
            log::error!("Failed to open {}: {:#}; changes will not be saved", path.display(), e);
            Box::new(MemoryKeyValueStore::new())
        }
    }
}

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Day Planner");

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = load_or_default(config_path.as_deref());
    let storage = open_storage(&settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 860.0])
            .with_min_inner_size([480.0, 400.0])
            .with_title("Day Planner"),
        ..Default::default()
    };

    eframe::run_native(
        "Day Planner",
        options,
        Box::new(move |_cc| Ok(Box::new(PlannerApp::new(settings, storage)))),
    )
}
