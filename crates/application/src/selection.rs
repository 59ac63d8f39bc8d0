use std::collections::HashSet;

use chrono::NaiveDate;
use domain::{ChecklistRecord, ProductionEntry, SerialNumber};

/// Serials produced on `today` (plant clock) that have never been inspected.
///
/// Order is first appearance in the production log. A serial with ANY
/// checklist row, whatever its date, is excluded for good.
pub fn available_for_inspection(
    entries: &[ProductionEntry],
    checklists: &[ChecklistRecord],
    today: NaiveDate,
) -> Vec<SerialNumber> {
    let inspected: HashSet<&SerialNumber> = checklists.iter().map(|r| &r.serial).collect();

    let mut seen = HashSet::new();
    let mut available = Vec::new();
    for entry in entries {
        if entry.plant_date() != today {
            continue;
        }
        if inspected.contains(&entry.serial) {
            continue;
        }
        if seen.insert(entry.serial.clone()) {
            available.push(entry.serial.clone());
        }
    }
    available
}

/// Serials whose first inspection rejected the unit and that have not been
/// reinspected yet.
///
/// One reinspection round only: once any reinspection batch exists for a
/// serial it never comes back here, even if that reinspection failed again.
pub fn available_for_reinspection(checklists: &[ChecklistRecord]) -> Vec<SerialNumber> {
    let reinspected: HashSet<&SerialNumber> = checklists
        .iter()
        .filter(|r| r.reinspection)
        .map(|r| &r.serial)
        .collect();

    let mut seen = HashSet::new();
    let mut available = Vec::new();
    for row in checklists {
        if !row.product_rejected || row.reinspection {
            continue;
        }
        if reinspected.contains(&row.serial) {
            continue;
        }
        if seen.insert(row.serial.clone()) {
            available.push(row.serial.clone());
        }
    }
    available
}
