use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::db::KeyValueStore;
use crate::error::Result;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

const CURRENCY_SYMBOL_KEY: &str = "setting:currency_symbol";
const EXPORT_DIR_KEY: &str = "setting:export_dir";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency_symbol: String,
    pub export_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            export_dir: None,
        }
    }
}

impl Settings {
    /// Where exported invoices go: the configured folder, or `exports/`
    /// under the app data directory.
    pub fn export_dir_or(&self, app_data_dir: &Path) -> PathBuf {
        self.export_dir
            .as_deref()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| app_data_dir.join("exports"))
    }
}

/// Reads settings, falling back to defaults for anything unset or unreadable.
pub fn load_settings<S: KeyValueStore>(store: &S) -> Settings {
    let defaults = Settings::default();
    let currency_symbol = store
        .get(CURRENCY_SYMBOL_KEY)
        .ok()
        .flatten()
        .filter(|symbol| !symbol.is_empty())
        .unwrap_or(defaults.currency_symbol);
    let export_dir = store.get(EXPORT_DIR_KEY).ok().flatten();
    Settings {
        currency_symbol,
        export_dir,
    }
}

pub fn save_settings<S: KeyValueStore>(store: &S, settings: &Settings) -> Result<()> {
    store.set(CURRENCY_SYMBOL_KEY, &settings.currency_symbol)?;
    match &settings.export_dir {
        Some(dir) => store.set(EXPORT_DIR_KEY, dir)?,
        None => store.remove(EXPORT_DIR_KEY)?,
    }
    Ok(())
}
