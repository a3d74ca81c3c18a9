use tauri::State;
use uuid::Uuid;

use crate::commands::CommandError;
use crate::models::{Bill, BillDetail, BillSummary};
use crate::services::bills::{search_bills, summarize, BillRepository};
use crate::services::demo;
use crate::services::state::AppState;

#[tauri::command]
pub async fn new_bill() -> Result<BillDetail, String> {
    Ok(BillDetail::from(&Bill::new()))
}

#[tauri::command]
pub async fn list_bills(
    query: Option<String>,
    state: State<'_, AppState>,
) -> Result<Vec<BillSummary>, String> {
    let db = state.db().map_err(|e| e.to_string())?;
    let bills = BillRepository::new(&*db).list_bills();
    let bills = search_bills(bills, query.as_deref().unwrap_or_default());
    Ok(summarize(&bills))
}

#[tauri::command]
pub async fn get_bill(bill_id: Uuid, state: State<'_, AppState>) -> Result<Option<BillDetail>, String> {
    let db = state.db().map_err(|e| e.to_string())?;
    Ok(BillRepository::new(&*db).get_bill(bill_id).map(|bill| BillDetail::from(&bill)))
}

#[tauri::command]
pub async fn save_bill(bill: Bill, state: State<'_, AppState>) -> Result<bool, CommandError> {
    bill.validate_for_save()?;
    let db = state.db()?;
    Ok(BillRepository::new(&*db).save_bill(&bill))
}

#[tauri::command]
pub async fn delete_bill(bill_id: Uuid, state: State<'_, AppState>) -> Result<bool, String> {
    let db = state.db().map_err(|e| e.to_string())?;
    Ok(BillRepository::new(&*db).delete_bill(bill_id))
}

#[tauri::command]
pub async fn seed_demo_bills(state: State<'_, AppState>) -> Result<usize, String> {
    let db = state.db().map_err(|e| e.to_string())?;
    demo::seed_demo_bills(&BillRepository::new(&*db)).map_err(|e| e.to_string())
}
