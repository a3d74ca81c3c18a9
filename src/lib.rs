//! Billing core for carpentry work: bills grouped into room headers, work
//! items measured in mixed units and priced per square foot, a company
//! profile, and HTML invoice export.
//!
//! The desktop shell lives behind the `app` feature; everything else is plain
//! library code usable from tests and other front ends.

#[cfg(feature = "app")]
pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{Error, Result, ValidationErrors};

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides the
/// default `info` level. Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(feature = "app")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use anyhow::anyhow;
    use tauri::Manager;

    use crate::services::state::AppState;

    init_tracing();

    tauri::Builder::default()
        .setup(|app| {
            let app_data_dir = app
                .path()
                .app_data_dir()
                .map_err(|e| anyhow!("App data dir: {}", e))?;
            std::fs::create_dir_all(&app_data_dir)?;

            let db_path = app_data_dir.join("carpentry_bills.sqlite");
            let db = db::Database::new(db_path)?;
            tracing::info!("Data directory: {}", app_data_dir.display());

            app.manage(AppState::new(db, app_data_dir));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::bills::new_bill,
            commands::bills::list_bills,
            commands::bills::get_bill,
            commands::bills::save_bill,
            commands::bills::delete_bill,
            commands::bills::seed_demo_bills,
            commands::editor::update_bill_info,
            commands::editor::add_header,
            commands::editor::remove_header,
            commands::editor::submit_work_item,
            commands::editor::remove_work_item,
            commands::profile::get_profile,
            commands::profile::has_profile,
            commands::profile::save_profile,
            commands::export::export_bill,
            commands::settings::get_settings,
            commands::settings::save_settings,
            commands::settings::pick_export_folder,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
