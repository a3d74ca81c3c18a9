use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::db::KeyValueStore;
use crate::error::Result;
use crate::models::{Bill, Unit, WorkItem, WorkItemDraft};
use crate::services::bills::BillRepository;

type Section<'a> = (&'a str, &'a [(&'a str, f64, f64, f64)]);

fn build_bill(name: &str, created_at: DateTime<Utc>, advance: f64, sections: &[Section<'_>]) -> Result<Bill> {
    let mut bill = Bill::new_at(created_at);
    bill.set_bill_name(name);
    bill.set_advance_amount(advance)?;
    for (section, items) in sections {
        let header_id = bill.add_header(section)?;
        for (work_name, width, height, rate) in items.iter() {
            let item = WorkItem::create(&WorkItemDraft {
                work_name: work_name.to_string(),
                width: Some(*width),
                width_unit: Unit::Feet,
                height: Some(*height),
                height_unit: Unit::Feet,
                rate: Some(*rate),
            })?;
            if let Some(header) = bill.header_mut(header_id) {
                header.add_work_item(item);
            }
        }
    }
    Ok(bill)
}

/// Three sample bills dated today, yesterday and the day before.
pub fn demo_bills(now: DateTime<Utc>) -> Result<Vec<Bill>> {
    Ok(vec![
        build_bill(
            "Mr. Sharma Kitchen Renovation",
            now,
            5000.0,
            &[
                (
                    "Kitchen",
                    &[("Cabinet Doors", 4.0, 2.0, 150.0), ("Counter Top", 8.0, 2.0, 200.0)],
                ),
                ("Dining Area", &[("Wall Paneling", 12.0, 8.0, 100.0)]),
            ],
        )?,
        build_bill(
            "Mrs. Verma Bedroom Work",
            now - Duration::days(1),
            3000.0,
            &[(
                "Master Bedroom",
                &[("Wardrobe", 6.0, 8.0, 180.0), ("Bed Backrest", 5.0, 4.0, 120.0)],
            )],
        )?,
        build_bill(
            "Office Cabin Project",
            now - Duration::days(2),
            2000.0,
            &[
                ("Manager Cabin", &[("Office Table", 4.0, 2.5, 160.0)]),
                (
                    "Meeting Room",
                    &[("Conference Table", 8.0, 3.0, 140.0), ("Wall Shelves", 10.0, 1.5, 110.0)],
                ),
            ],
        )?,
    ])
}

/// Stores the sample bills and returns how many were saved.
pub fn seed_demo_bills<S: KeyValueStore>(repo: &BillRepository<S>) -> Result<usize> {
    let bills = demo_bills(Utc::now())?;
    let saved = bills.iter().filter(|bill| repo.save_bill(bill)).count();
    info!("Seeded {} demo bills", saved);
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::services::bills::newest_first;

    #[test]
    fn demo_totals() {
        let bills = demo_bills(Utc::now()).unwrap();
        let totals: Vec<(f64, f64)> = bills.iter().map(|b| (b.grand_total(), b.balance_due())).collect();
        assert_eq!(
            totals,
            vec![(14000.0, 9000.0), (11040.0, 8040.0), (6610.0, 4610.0)]
        );
    }

    #[test]
    fn seeded_bills_list_newest_first() {
        let repo = BillRepository::new(MemoryStore::new());
        assert_eq!(seed_demo_bills(&repo).unwrap(), 3);

        let names: Vec<String> = newest_first(repo.list_bills())
            .iter()
            .map(|b| b.bill_name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "Mr. Sharma Kitchen Renovation",
                "Mrs. Verma Bedroom Work",
                "Office Cabin Project"
            ]
        );
    }
}
