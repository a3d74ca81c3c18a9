mod bill;
mod profile;
mod unit;
mod views;
mod work_item;

pub use bill::{Bill, Header};
pub use profile::{Profile, ProfileDraft};
pub use unit::{to_square_feet, Unit};
pub use views::{BillDetail, BillSummary, HeaderDetail, WorkItemDetail};
pub use work_item::{ValidDraft, WorkItem, WorkItemDraft};
