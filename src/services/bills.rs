use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db::KeyValueStore;
use crate::error::Result;
use crate::models::{Bill, BillSummary};

const BILL_PREFIX: &str = "bill:";

fn bill_key(id: Uuid) -> String {
    format!("{}{}", BILL_PREFIX, id)
}

/// Stores each bill under its own key, so saving one bill never rewrites
/// another. Storage failures are logged here and reported to callers only as
/// `false`, `None` or an empty list.
pub struct BillRepository<S> {
    store: S,
}

impl<S: KeyValueStore> BillRepository<S> {
    pub fn new(store: S) -> Self {
        BillRepository { store }
    }

    /// Inserts the bill, or fully replaces a stored bill with the same id.
    /// Performs no validation; see [`Bill::validate_for_save`].
    pub fn save_bill(&self, bill: &Bill) -> bool {
        match self.try_save(bill) {
            Ok(()) => {
                info!("Saved bill {} ({})", bill.id(), bill.bill_name());
                true
            }
            Err(err) => {
                error!("Error saving bill {}: {}", bill.id(), err);
                false
            }
        }
    }

    fn try_save(&self, bill: &Bill) -> Result<()> {
        let json = serde_json::to_string(bill)?;
        self.store.set(&bill_key(bill.id()), &json)
    }

    pub fn get_bill(&self, id: Uuid) -> Option<Bill> {
        let raw = match self.store.get(&bill_key(id)) {
            Ok(raw) => raw?,
            Err(err) => {
                error!("Error getting bill {}: {}", id, err);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(bill) => Some(bill),
            Err(err) => {
                error!("Stored bill {} is unreadable: {}", id, err);
                None
            }
        }
    }

    /// Every stored bill in key order. Records that no longer parse are
    /// skipped rather than failing the whole listing.
    pub fn list_bills(&self) -> Vec<Bill> {
        let entries = match self.store.scan_prefix(BILL_PREFIX) {
            Ok(entries) => entries,
            Err(err) => {
                error!("Error getting bills: {}", err);
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter_map(|(key, raw)| match serde_json::from_str::<Bill>(&raw) {
                Ok(bill) => Some(bill),
                Err(err) => {
                    warn!("Skipping unreadable bill record {}: {}", key, err);
                    None
                }
            })
            .collect()
    }

    /// Deleting a bill that is not stored still counts as success.
    pub fn delete_bill(&self, id: Uuid) -> bool {
        match self.store.remove(&bill_key(id)) {
            Ok(()) => {
                info!("Deleted bill {}", id);
                true
            }
            Err(err) => {
                error!("Error deleting bill {}: {}", id, err);
                false
            }
        }
    }
}

/// Sorts by creation time, newest first.
pub fn newest_first(mut bills: Vec<Bill>) -> Vec<Bill> {
    bills.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    bills
}

/// Case-insensitive substring match on the bill name, newest first. A blank
/// query matches everything.
pub fn search_bills(bills: Vec<Bill>, query: &str) -> Vec<Bill> {
    let needle = query.trim().to_lowercase();
    let matching = bills
        .into_iter()
        .filter(|bill| needle.is_empty() || bill.bill_name().to_lowercase().contains(&needle))
        .collect();
    newest_first(matching)
}

pub fn summarize(bills: &[Bill]) -> Vec<BillSummary> {
    bills.iter().map(BillSummary::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::error::Error;
    use crate::models::{Unit, WorkItem, WorkItemDraft};
    use chrono::{Duration, Utc};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::LockPoisoned)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::LockPoisoned)
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Err(Error::LockPoisoned)
        }
        fn scan_prefix(&self, _prefix: &str) -> Result<Vec<(String, String)>> {
            Err(Error::LockPoisoned)
        }
    }

    fn sample_bill(name: &str) -> Bill {
        let mut bill = Bill::new();
        bill.set_bill_name(name);
        let kitchen = bill.add_header("Kitchen").unwrap();
        let item = WorkItem::create(&WorkItemDraft {
            work_name: "Cabinet".into(),
            width: Some(4.0),
            width_unit: Unit::Feet,
            height: Some(2.0),
            height_unit: Unit::Feet,
            rate: Some(150.0),
        })
        .unwrap();
        bill.header_mut(kitchen).unwrap().add_work_item(item);
        bill.set_advance_amount(200.0).unwrap();
        bill
    }

    #[test]
    fn round_trips_by_value() {
        let repo = BillRepository::new(MemoryStore::new());
        let bill = sample_bill("Kitchen Job");

        assert!(repo.save_bill(&bill));
        let listed = repo.list_bills();
        assert_eq!(listed, vec![bill.clone()]);
        assert_eq!(repo.get_bill(bill.id()), Some(bill));
    }

    #[test]
    fn arbitrary_dimensions_survive_storage_exactly() {
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            let scale = 10f64.powi((state % 10) as i32 - 3);
            unit * scale + f64::MIN_POSITIVE
        };

        let repo = BillRepository::new(MemoryStore::new());
        for _ in 0..200 {
            let mut bill = Bill::new();
            bill.set_bill_name("Precision");
            let header = bill.add_header("Room").unwrap();
            let item = WorkItem::create(&WorkItemDraft {
                work_name: "Panel".into(),
                width: Some(next()),
                width_unit: Unit::Meter,
                height: Some(next()),
                height_unit: Unit::Inch,
                rate: Some(next()),
            })
            .unwrap();
            bill.header_mut(header).unwrap().add_work_item(item);
            bill.set_advance_amount(next()).unwrap();

            assert!(repo.save_bill(&bill));
            assert_eq!(repo.get_bill(bill.id()), Some(bill));
        }
    }

    #[test]
    fn saving_same_id_replaces() {
        let repo = BillRepository::new(MemoryStore::new());
        let mut bill = sample_bill("Kitchen Job");
        assert!(repo.save_bill(&bill));

        bill.set_bill_name("Kitchen Job (revised)");
        bill.add_header("Pantry").unwrap();
        assert!(repo.save_bill(&bill));

        let listed = repo.list_bills();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].bill_name(), "Kitchen Job (revised)");
        assert_eq!(listed[0].headers().len(), 2);
    }

    #[test]
    fn saves_of_different_bills_coexist() {
        let store = MemoryStore::new();
        let first = BillRepository::new(&store);
        let second = BillRepository::new(&store);

        assert!(first.save_bill(&sample_bill("One")));
        assert!(second.save_bill(&sample_bill("Two")));
        assert_eq!(BillRepository::new(&store).list_bills().len(), 2);
    }

    #[test]
    fn delete_is_idempotent() {
        let repo = BillRepository::new(MemoryStore::new());
        let bill = sample_bill("Kitchen Job");
        repo.save_bill(&bill);

        assert!(repo.delete_bill(Uuid::new_v4()));
        assert_eq!(repo.list_bills().len(), 1);

        assert!(repo.delete_bill(bill.id()));
        assert!(repo.delete_bill(bill.id()));
        assert!(repo.list_bills().is_empty());
        assert_eq!(repo.get_bill(bill.id()), None);
    }

    #[test]
    fn storage_failures_become_plain_results() {
        let repo = BillRepository::new(BrokenStore);
        let bill = sample_bill("Kitchen Job");

        assert!(!repo.save_bill(&bill));
        assert!(!repo.delete_bill(bill.id()));
        assert_eq!(repo.get_bill(bill.id()), None);
        assert!(repo.list_bills().is_empty());
    }

    #[test]
    fn corrupt_records_are_skipped() {
        let store = MemoryStore::new();
        store.set("bill:garbage", "{not json").unwrap();
        let repo = BillRepository::new(&store);
        let bill = sample_bill("Kitchen Job");
        repo.save_bill(&bill);

        assert_eq!(repo.list_bills(), vec![bill]);
    }

    #[test]
    fn search_is_case_insensitive_and_newest_first() {
        let now = Utc::now();
        let mut older = Bill::new_at(now - Duration::days(2));
        older.set_bill_name("Mr. Sharma Kitchen Renovation");
        let mut newer = Bill::new_at(now - Duration::days(1));
        newer.set_bill_name("Kitchen for Mrs. Verma");
        let mut other = Bill::new_at(now);
        other.set_bill_name("Office Cabin Project");

        let found = search_bills(vec![older.clone(), other.clone(), newer.clone()], "KITCHEN");
        assert_eq!(found, vec![newer.clone(), older.clone()]);

        let all = search_bills(vec![older.clone(), other.clone(), newer.clone()], "  ");
        assert_eq!(all, vec![other, newer, older]);
    }

    #[test]
    fn summaries_follow_input_order() {
        let bills = vec![sample_bill("A"), sample_bill("B")];
        let summaries = summarize(&bills);
        assert_eq!(summaries[0].bill_name, "A");
        assert_eq!(summaries[1].grand_total, 1200.0);
        assert_eq!(summaries[1].balance_due, 1000.0);
    }
}
