//! Edits to a bill that is still open in the editor. Each command takes the
//! current bill, applies one change and hands back the recomputed detail;
//! nothing is persisted until `save_bill`.

use uuid::Uuid;

use crate::commands::CommandError;
use crate::models::{Bill, BillDetail, WorkItem, WorkItemDraft};

#[tauri::command]
pub async fn update_bill_info(
    mut bill: Bill,
    bill_name: String,
    advance_amount: String,
) -> Result<BillDetail, CommandError> {
    bill.set_advance_from_text(&advance_amount)?;
    bill.set_bill_name(&bill_name);
    Ok(BillDetail::from(&bill))
}

#[tauri::command]
pub async fn add_header(mut bill: Bill, name: String) -> Result<BillDetail, CommandError> {
    bill.add_header(&name)?;
    Ok(BillDetail::from(&bill))
}

#[tauri::command]
pub async fn remove_header(mut bill: Bill, header_id: Uuid) -> Result<BillDetail, String> {
    bill.remove_header(header_id);
    Ok(BillDetail::from(&bill))
}

/// Adds a work item, or replaces `item_id` when editing. An unknown header
/// or item leaves the bill as it was.
#[tauri::command]
pub async fn submit_work_item(
    mut bill: Bill,
    header_id: Uuid,
    item_id: Option<Uuid>,
    draft: WorkItemDraft,
) -> Result<BillDetail, CommandError> {
    if let Some(header) = bill.header_mut(header_id) {
        match item_id {
            Some(item_id) => {
                if let Some(existing) = header.work_item(item_id) {
                    let revised = existing.revise(&draft)?;
                    header.update_work_item(revised);
                }
            }
            None => header.add_work_item(WorkItem::create(&draft)?),
        }
    }
    Ok(BillDetail::from(&bill))
}

#[tauri::command]
pub async fn remove_work_item(
    mut bill: Bill,
    header_id: Uuid,
    item_id: Uuid,
) -> Result<BillDetail, String> {
    if let Some(header) = bill.header_mut(header_id) {
        header.remove_work_item(item_id);
    }
    Ok(BillDetail::from(&bill))
}
