use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::models::unit::{to_square_feet, Unit};
use crate::utils::parse_amount;

/// Raw work-item fields as submitted from the form. Numbers are optional
/// because the user may leave a field blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkItemDraft {
    pub work_name: String,
    pub width: Option<f64>,
    pub width_unit: Unit,
    pub height: Option<f64>,
    pub height_unit: Unit,
    pub rate: Option<f64>,
}

impl WorkItemDraft {
    /// Builds a draft from the text a user typed; unparseable numbers are
    /// treated as missing and reported by [`WorkItemDraft::validate`].
    pub fn from_text(
        work_name: &str,
        width: &str,
        width_unit: Unit,
        height: &str,
        height_unit: Unit,
        rate: &str,
    ) -> Self {
        WorkItemDraft {
            work_name: work_name.to_string(),
            width: parse_amount(width),
            width_unit,
            height: parse_amount(height),
            height_unit,
            rate: parse_amount(rate),
        }
    }

    pub fn validate(&self) -> Result<ValidDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let work_name = self.work_name.trim();
        if work_name.is_empty() {
            errors.add("workName", "Work name is required");
        }
        let width = positive(self.width);
        if width.is_none() {
            errors.add("width", "Width must be greater than 0");
        }
        let height = positive(self.height);
        if height.is_none() {
            errors.add("height", "Height must be greater than 0");
        }
        let rate = positive(self.rate);
        if rate.is_none() {
            errors.add("rate", "Rate must be greater than 0");
        }

        match (width, height, rate) {
            (Some(width), Some(height), Some(rate)) if errors.is_empty() => Ok(ValidDraft {
                work_name: work_name.to_string(),
                width,
                width_unit: self.width_unit,
                height,
                height_unit: self.height_unit,
                rate,
            }),
            _ => Err(errors),
        }
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    work_name: String,
    width: f64,
    width_unit: Unit,
    height: f64,
    height_unit: Unit,
    rate: f64,
}

/// A single billable line. Area and amount are computed from the stored
/// dimensions on every read. Deserializing runs the same checks as
/// [`WorkItem::create`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredWorkItem")]
pub struct WorkItem {
    id: Uuid,
    work_name: String,
    width: f64,
    width_unit: Unit,
    height: f64,
    height_unit: Unit,
    rate: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWorkItem {
    id: Uuid,
    work_name: String,
    width: f64,
    width_unit: Unit,
    height: f64,
    height_unit: Unit,
    rate: f64,
}

impl TryFrom<StoredWorkItem> for WorkItem {
    type Error = ValidationErrors;

    fn try_from(stored: StoredWorkItem) -> Result<Self, Self::Error> {
        let valid = WorkItemDraft {
            work_name: stored.work_name,
            width: Some(stored.width),
            width_unit: stored.width_unit,
            height: Some(stored.height),
            height_unit: stored.height_unit,
            rate: Some(stored.rate),
        }
        .validate()?;
        Ok(Self::from_valid(stored.id, valid))
    }
}

impl WorkItem {
    pub fn create(draft: &WorkItemDraft) -> Result<Self, ValidationErrors> {
        let valid = draft.validate()?;
        Ok(Self::from_valid(Uuid::new_v4(), valid))
    }

    /// Replaces every field with the draft's values, keeping this item's id.
    pub fn revise(&self, draft: &WorkItemDraft) -> Result<Self, ValidationErrors> {
        let valid = draft.validate()?;
        Ok(Self::from_valid(self.id, valid))
    }

    fn from_valid(id: Uuid, valid: ValidDraft) -> Self {
        WorkItem {
            id,
            work_name: valid.work_name,
            width: valid.width,
            width_unit: valid.width_unit,
            height: valid.height,
            height_unit: valid.height_unit,
            rate: valid.rate,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn work_name(&self) -> &str {
        &self.work_name
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn width_unit(&self) -> Unit {
        self.width_unit
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn height_unit(&self) -> Unit {
        self.height_unit
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Area in square feet.
    pub fn area(&self) -> f64 {
        to_square_feet(self.width, self.width_unit, self.height, self.height_unit)
    }

    pub fn amount(&self) -> f64 {
        self.area() * self.rate
    }

    /// The item's current values as an editable draft.
    pub fn to_draft(&self) -> WorkItemDraft {
        WorkItemDraft {
            work_name: self.work_name.clone(),
            width: Some(self.width),
            width_unit: self.width_unit,
            height: Some(self.height),
            height_unit: self.height_unit,
            rate: Some(self.rate),
        }
    }
}
