use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::bill::{Bill, Header};
use crate::models::unit::Unit;
use crate::models::work_item::WorkItem;

/// One row of the dashboard list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub id: Uuid,
    pub bill_name: String,
    pub created_at: DateTime<Utc>,
    pub section_count: usize,
    pub work_item_count: usize,
    pub grand_total: f64,
    pub advance_amount: f64,
    pub balance_due: f64,
}

impl From<&Bill> for BillSummary {
    fn from(bill: &Bill) -> Self {
        BillSummary {
            id: bill.id(),
            bill_name: bill.bill_name().to_string(),
            created_at: bill.created_at(),
            section_count: bill.headers().len(),
            work_item_count: bill.work_item_count(),
            grand_total: bill.grand_total(),
            advance_amount: bill.advance_amount(),
            balance_due: bill.balance_due(),
        }
    }
}

/// A bill with every derived figure filled in, for the editor screen. The
/// JSON keeps the bill's field names, so the editor can send it straight
/// back as a [`Bill`]; the derived figures are ignored on the way in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDetail {
    pub id: Uuid,
    pub bill_name: String,
    pub advance_amount: f64,
    pub created_at: DateTime<Utc>,
    pub headers: Vec<HeaderDetail>,
    pub grand_total: f64,
    pub balance_due: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderDetail {
    pub id: Uuid,
    pub name: String,
    pub work_items: Vec<WorkItemDetail>,
    pub subtotal: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemDetail {
    pub id: Uuid,
    pub work_name: String,
    pub width: f64,
    pub width_unit: Unit,
    pub height: f64,
    pub height_unit: Unit,
    pub rate: f64,
    pub area: f64,
    pub amount: f64,
}

impl From<&WorkItem> for WorkItemDetail {
    fn from(item: &WorkItem) -> Self {
        WorkItemDetail {
            id: item.id(),
            work_name: item.work_name().to_string(),
            width: item.width(),
            width_unit: item.width_unit(),
            height: item.height(),
            height_unit: item.height_unit(),
            rate: item.rate(),
            area: item.area(),
            amount: item.amount(),
        }
    }
}

impl From<&Header> for HeaderDetail {
    fn from(header: &Header) -> Self {
        HeaderDetail {
            id: header.id(),
            name: header.name().to_string(),
            work_items: header.work_items().iter().map(WorkItemDetail::from).collect(),
            subtotal: header.subtotal(),
        }
    }
}

impl From<&Bill> for BillDetail {
    fn from(bill: &Bill) -> Self {
        BillDetail {
            id: bill.id(),
            bill_name: bill.bill_name().to_string(),
            advance_amount: bill.advance_amount(),
            created_at: bill.created_at(),
            headers: bill.headers().iter().map(HeaderDetail::from).collect(),
            grand_total: bill.grand_total(),
            balance_due: bill.balance_due(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::work_item::WorkItemDraft;

    #[test]
    fn summary_reflects_current_totals() {
        let mut bill = Bill::new();
        bill.set_bill_name("Office Cabin Project");
        let cabin = bill.add_header("Manager Cabin").unwrap();
        let item = WorkItem::create(&WorkItemDraft {
            work_name: "Office Table".into(),
            width: Some(4.0),
            height: Some(2.5),
            rate: Some(160.0),
            ..Default::default()
        })
        .unwrap();
        bill.header_mut(cabin).unwrap().add_work_item(item);
        bill.set_advance_amount(2000.0).unwrap();

        let summary = BillSummary::from(&bill);
        assert_eq!(summary.section_count, 1);
        assert_eq!(summary.work_item_count, 1);
        assert_eq!(summary.grand_total, 1600.0);
        assert_eq!(summary.balance_due, -400.0);

        let detail = BillDetail::from(&bill);
        assert_eq!(detail.headers[0].subtotal, 1600.0);
        assert_eq!(detail.headers[0].work_items[0].area, 10.0);
    }

    #[test]
    fn detail_lists_each_work_item_once_and_reads_back_as_a_bill() {
        let mut bill = Bill::new();
        bill.set_bill_name("Kitchen Job");
        let kitchen = bill.add_header("Kitchen").unwrap();
        let item = WorkItem::create(&WorkItemDraft {
            work_name: "Cabinet".into(),
            width: Some(4.0),
            height: Some(2.0),
            rate: Some(150.0),
            ..Default::default()
        })
        .unwrap();
        bill.header_mut(kitchen).unwrap().add_work_item(item);

        let json = serde_json::to_value(BillDetail::from(&bill)).unwrap();
        assert!(json.get("bill").is_none());
        assert_eq!(json["headers"][0]["workItems"][0]["amount"], 1200.0);
        assert_eq!(json.to_string().matches("\"workName\"").count(), 1);

        let back: Bill = serde_json::from_value(json).unwrap();
        assert_eq!(back, bill);
    }
}
