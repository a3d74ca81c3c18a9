use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::db::Database;
use crate::services::export::{HtmlFileProducer, RenderOptions};
use crate::services::settings::{self, Settings};

/// Long-lived handles shared by every command.
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub settings: Arc<Mutex<Settings>>,
    app_data_dir: PathBuf,
}

impl AppState {
    pub fn new(db: Database, app_data_dir: PathBuf) -> Self {
        let settings = settings::load_settings(&db);
        AppState {
            db: Arc::new(Mutex::new(db)),
            settings: Arc::new(Mutex::new(settings)),
            app_data_dir,
        }
    }

    pub fn db(&self) -> Result<MutexGuard<'_, Database>> {
        self.db.lock().map_err(|_| anyhow!("DB lock"))
    }

    pub fn settings(&self) -> Result<Settings> {
        Ok(self
            .settings
            .lock()
            .map_err(|_| anyhow!("Settings lock"))?
            .clone())
    }

    pub fn update_settings(&self, updated: Settings) -> Result<()> {
        {
            let db = self.db()?;
            settings::save_settings(&*db, &updated)?;
        }
        let mut locked = self.settings.lock().map_err(|_| anyhow!("Settings lock"))?;
        *locked = updated;
        Ok(())
    }

    pub fn render_options(&self) -> Result<RenderOptions> {
        Ok(RenderOptions::from(&self.settings()?))
    }

    pub fn producer(&self) -> Result<HtmlFileProducer> {
        Ok(HtmlFileProducer::new(
            self.settings()?.export_dir_or(&self.app_data_dir),
        ))
    }
}
