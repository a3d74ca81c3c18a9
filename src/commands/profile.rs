use tauri::State;

use crate::commands::CommandError;
use crate::models::{Profile, ProfileDraft};
use crate::services::profile::ProfileStore;
use crate::services::state::AppState;

#[tauri::command]
pub async fn get_profile(state: State<'_, AppState>) -> Result<Option<Profile>, String> {
    let db = state.db().map_err(|e| e.to_string())?;
    Ok(ProfileStore::new(&*db).get_profile())
}

#[tauri::command]
pub async fn has_profile(state: State<'_, AppState>) -> Result<bool, String> {
    let db = state.db().map_err(|e| e.to_string())?;
    Ok(ProfileStore::new(&*db).has_profile())
}

#[tauri::command]
pub async fn save_profile(
    draft: ProfileDraft,
    state: State<'_, AppState>,
) -> Result<bool, CommandError> {
    let profile = draft.validate()?;
    let db = state.db()?;
    Ok(ProfileStore::new(&*db).save_profile(&profile))
}
