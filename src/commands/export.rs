use tauri::State;

use crate::commands::CommandError;
use crate::models::Bill;
use crate::services::export::{export_invoice, SystemShare};
use crate::services::profile::ProfileStore;
use crate::services::state::AppState;

/// Renders the bill, writes it to the export folder and hands it to the
/// system viewer. Returns `false` when any of those steps failed.
#[tauri::command]
pub async fn export_bill(bill: Bill, state: State<'_, AppState>) -> Result<bool, CommandError> {
    bill.validate_for_save()?;

    let profile = {
        let db = state.db()?;
        ProfileStore::new(&*db).get_profile()
    };
    let options = state.render_options()?;
    let producer = state.producer()?;

    Ok(export_invoice(&bill, profile.as_ref(), &options, &producer, &SystemShare).await)
}
