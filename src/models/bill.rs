use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result, ValidationErrors};
use crate::models::work_item::WorkItem;
use crate::utils::parse_amount;

/// A named section of a bill, usually a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredHeader")]
pub struct Header {
    id: Uuid,
    name: String,
    work_items: Vec<WorkItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredHeader {
    id: Uuid,
    name: String,
    #[serde(default)]
    work_items: Vec<WorkItem>,
}

impl TryFrom<StoredHeader> for Header {
    type Error = ValidationErrors;

    fn try_from(stored: StoredHeader) -> std::result::Result<Self, Self::Error> {
        let name = stored.name.trim();
        if name.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("name", "Please enter a header name");
            return Err(errors);
        }
        Ok(Header {
            id: stored.id,
            name: name.to_string(),
            work_items: stored.work_items,
        })
    }
}

impl Header {
    fn new(name: String) -> Self {
        Header {
            id: Uuid::new_v4(),
            name,
            work_items: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn work_items(&self) -> &[WorkItem] {
        &self.work_items
    }

    pub fn work_item(&self, id: Uuid) -> Option<&WorkItem> {
        self.work_items.iter().find(|item| item.id() == id)
    }

    pub fn add_work_item(&mut self, item: WorkItem) {
        self.work_items.push(item);
    }

    /// Replaces the item with the same id. Returns `false` and leaves the
    /// header untouched when no item matches.
    pub fn update_work_item(&mut self, item: WorkItem) -> bool {
        match self.work_items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    /// Returns `false` when no item matched.
    pub fn remove_work_item(&mut self, id: Uuid) -> bool {
        let before = self.work_items.len();
        self.work_items.retain(|item| item.id() != id);
        self.work_items.len() != before
    }

    pub fn subtotal(&self) -> f64 {
        self.work_items.iter().map(WorkItem::amount).sum()
    }
}

/// The invoice being built: named sections plus the payment summary.
///
/// Bills arrive from storage and from the editor as JSON, so deserializing
/// applies the same rules as the mutators: valid work items, non-empty and
/// distinct header names, and a non-negative advance. The bill name may be
/// blank until the bill is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredBill")]
pub struct Bill {
    id: Uuid,
    bill_name: String,
    headers: Vec<Header>,
    advance_amount: f64,
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredBill {
    id: Uuid,
    #[serde(default)]
    bill_name: String,
    #[serde(default)]
    headers: Vec<Header>,
    #[serde(default)]
    advance_amount: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<StoredBill> for Bill {
    type Error = Error;

    fn try_from(stored: StoredBill) -> Result<Self> {
        let mut bill = Bill::new_at(stored.created_at);
        bill.id = stored.id;
        bill.set_bill_name(&stored.bill_name);
        bill.set_advance_amount(stored.advance_amount)?;
        for header in stored.headers {
            if bill.has_header_named(&header.name) {
                return Err(Error::DuplicateHeader(header.name));
            }
            bill.headers.push(header);
        }
        Ok(bill)
    }
}

impl Default for Bill {
    fn default() -> Self {
        Self::new()
    }
}

impl Bill {
    pub fn new() -> Self {
        Self::new_at(Utc::now())
    }

    pub fn new_at(created_at: DateTime<Utc>) -> Self {
        Bill {
            id: Uuid::new_v4(),
            bill_name: String::new(),
            headers: Vec::new(),
            advance_amount: 0.0,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bill_name(&self) -> &str {
        &self.bill_name
    }

    pub fn set_bill_name(&mut self, name: &str) {
        self.bill_name = name.trim().to_string();
    }

    pub fn advance_amount(&self) -> f64 {
        self.advance_amount
    }

    pub fn set_advance_amount(&mut self, amount: f64) -> std::result::Result<(), ValidationErrors> {
        if !amount.is_finite() || amount < 0.0 {
            let mut errors = ValidationErrors::new();
            errors.add("advanceAmount", "Advance amount cannot be negative");
            return Err(errors);
        }
        self.advance_amount = amount;
        Ok(())
    }

    /// Blank input clears the advance to zero.
    pub fn set_advance_from_text(&mut self, text: &str) -> std::result::Result<(), ValidationErrors> {
        if text.trim().is_empty() {
            self.advance_amount = 0.0;
            return Ok(());
        }
        match parse_amount(text) {
            Some(amount) => self.set_advance_amount(amount),
            None => {
                let mut errors = ValidationErrors::new();
                errors.add("advanceAmount", "Advance amount must be a number");
                Err(errors)
            }
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn header(&self, id: Uuid) -> Option<&Header> {
        self.headers.iter().find(|header| header.id == id)
    }

    pub fn header_mut(&mut self, id: Uuid) -> Option<&mut Header> {
        self.headers.iter_mut().find(|header| header.id == id)
    }

    /// Appends a new empty section. Names are compared trimmed and
    /// case-insensitively against the sections already in this bill.
    pub fn add_header(&mut self, name: &str) -> Result<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("name", "Please enter a header name");
            return Err(Error::Validation(errors));
        }
        if self.has_header_named(name) {
            return Err(Error::DuplicateHeader(name.to_string()));
        }

        let header = Header::new(name.to_string());
        let id = header.id;
        self.headers.push(header);
        Ok(id)
    }

    fn has_header_named(&self, name: &str) -> bool {
        let key = name.trim().to_lowercase();
        self.headers.iter().any(|h| h.name.to_lowercase() == key)
    }

    /// Drops the section and all of its work items. Returns `false` when no
    /// section matched.
    pub fn remove_header(&mut self, id: Uuid) -> bool {
        let before = self.headers.len();
        self.headers.retain(|header| header.id != id);
        self.headers.len() != before
    }

    pub fn grand_total(&self) -> f64 {
        self.headers.iter().map(Header::subtotal).sum()
    }

    /// Not clamped: an advance larger than the total yields a negative value.
    pub fn balance_due(&self) -> f64 {
        self.grand_total() - self.advance_amount
    }

    pub fn work_item_count(&self) -> usize {
        self.headers.iter().map(|h| h.work_items.len()).sum()
    }

    /// Checks a bill is complete enough to be saved or exported.
    pub fn validate_for_save(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.bill_name.trim().is_empty() {
            errors.add("billName", "Please enter a bill name");
        }
        if self.headers.is_empty() {
            errors.add("headers", "Please add at least one header");
        }
        errors.into_result()
    }
}
