use tauri::State;

use crate::services::settings::Settings;
use crate::services::state::AppState;

#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<Settings, String> {
    state.settings().map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_settings(settings: Settings, state: State<'_, AppState>) -> Result<(), String> {
    let mut settings = settings;
    if settings.currency_symbol.trim().is_empty() {
        settings.currency_symbol = Settings::default().currency_symbol;
    }
    settings.export_dir = settings.export_dir.filter(|dir| !dir.trim().is_empty());
    state.update_settings(settings).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn pick_export_folder() -> Result<Option<String>, String> {
    let selection = rfd::FileDialog::new()
        .set_title("Choose export folder")
        .pick_folder()
        .map(|path| path.to_string_lossy().to_string());
    Ok(selection)
}
