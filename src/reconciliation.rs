// ⚖️ Reconciliation - check the museum's books add up
//
// Following the formula:
//   revenue = sum(cost of every recorded attendance)
//
// Also cross-checks the attendance map against the ledger and makes sure
// every id in either one points at an admitted patron / known exhibit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::entities::Money;
use crate::museum::Museum;

// ============================================================================
// RECONCILIATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconciliationResult {
    /// Revenue matches the ledger
    Balanced { revenue: Money, attendance_count: usize },

    /// Revenue and ledger disagree
    RevenueMismatch {
        recorded_revenue: Money,
        ledger_total: Money,
        difference: Money,
    },
}

impl ReconciliationResult {
    pub fn difference(&self) -> Money {
        match self {
            ReconciliationResult::Balanced { .. } => 0,
            ReconciliationResult::RevenueMismatch { difference, .. } => *difference,
        }
    }
}

// ============================================================================
// DISCREPANCIES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscrepancyCategory {
    RevenueMismatch,
    UnknownPatron,
    UnknownExhibit,
    NegativeBalance,
    NegativeCost,
    NegativeRevenue,
    LedgerMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub category: DiscrepancyCategory,
    pub description: String,
}

impl Discrepancy {
    fn new(category: DiscrepancyCategory, description: String) -> Self {
        Discrepancy { category, description }
    }
}

// ============================================================================
// RECONCILIATION REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub museum_name: String,
    pub result: ReconciliationResult,
    pub patron_count: usize,
    pub exhibit_count: usize,
    pub discrepancies: Vec<Discrepancy>,
    pub reconciled_at: DateTime<Utc>,
}

impl ReconciliationReport {
    pub fn is_balanced(&self) -> bool {
        self.discrepancies.is_empty()
    }

    pub fn summary(&self) -> String {
        let revenue = match &self.result {
            ReconciliationResult::Balanced { revenue, attendance_count } => {
                format!("${} from {} attendances", revenue, attendance_count)
            }
            ReconciliationResult::RevenueMismatch {
                recorded_revenue,
                ledger_total,
                ..
            } => format!("${} recorded vs ${} in ledger", recorded_revenue, ledger_total),
        };

        format!(
            "Reconciliation for {}: {} patrons, {} exhibits, {}, {} discrepancies",
            self.museum_name,
            self.patron_count,
            self.exhibit_count,
            revenue,
            self.discrepancies.len()
        )
    }
}

// ============================================================================
// RECONCILE
// ============================================================================

pub fn reconcile(museum: &Museum) -> ReconciliationReport {
    let mut discrepancies = Vec::new();

    let patron_ids: HashSet<&str> = museum.patrons().iter().map(|p| p.id.as_str()).collect();
    let exhibit_ids: HashSet<&str> = museum.exhibits().iter().map(|e| e.id()).collect();

    // 1. Revenue vs ledger
    let ledger_total: Money = museum
        .attendance()
        .iter()
        .fold(0, |total: Money, a| total.saturating_add(a.cost));
    let result = if ledger_total == museum.revenue() {
        ReconciliationResult::Balanced {
            revenue: museum.revenue(),
            attendance_count: museum.attendance().len(),
        }
    } else {
        let difference = museum.revenue().saturating_sub(ledger_total);
        discrepancies.push(Discrepancy::new(
            DiscrepancyCategory::RevenueMismatch,
            format!(
                "Revenue ${} does not match ledger total ${} (off by ${})",
                museum.revenue(),
                ledger_total,
                difference
            ),
        ));
        ReconciliationResult::RevenueMismatch {
            recorded_revenue: museum.revenue(),
            ledger_total,
            difference,
        }
    };

    // 2. Every referenced id resolves
    for attendance in museum.attendance() {
        if !patron_ids.contains(attendance.patron_id.as_str()) {
            discrepancies.push(Discrepancy::new(
                DiscrepancyCategory::UnknownPatron,
                format!(
                    "Attendance {} references unadmitted patron {}",
                    attendance.attendance_id, attendance.patron_id
                ),
            ));
        }
        if !exhibit_ids.contains(attendance.exhibit_id.as_str()) {
            discrepancies.push(Discrepancy::new(
                DiscrepancyCategory::UnknownExhibit,
                format!(
                    "Attendance {} references unknown exhibit {}",
                    attendance.attendance_id, attendance.exhibit_id
                ),
            ));
        }
    }

    for (exhibit_id, attendees) in museum.patrons_of_exhibits() {
        if !exhibit_ids.contains(exhibit_id.as_str()) {
            discrepancies.push(Discrepancy::new(
                DiscrepancyCategory::UnknownExhibit,
                format!("Attendance map has unknown exhibit {}", exhibit_id),
            ));
        }
        for patron_id in attendees {
            if !patron_ids.contains(patron_id.as_str()) {
                discrepancies.push(Discrepancy::new(
                    DiscrepancyCategory::UnknownPatron,
                    format!(
                        "Attendance map lists unadmitted patron {} for exhibit {}",
                        patron_id, exhibit_id
                    ),
                ));
            }
        }
    }

    // 3. Money never flows backwards
    if museum.revenue() < 0 {
        discrepancies.push(Discrepancy::new(
            DiscrepancyCategory::NegativeRevenue,
            format!("Revenue is negative: ${}", museum.revenue()),
        ));
    }

    for exhibit in museum.exhibits() {
        if exhibit.cost() < 0 {
            discrepancies.push(Discrepancy::new(
                DiscrepancyCategory::NegativeCost,
                format!("{} has negative cost ${}", exhibit.name(), exhibit.cost()),
            ));
        }
    }

    for patron in museum.patrons() {
        if patron.spending_money < 0 {
            discrepancies.push(Discrepancy::new(
                DiscrepancyCategory::NegativeBalance,
                format!("{} has negative balance ${}", patron.name, patron.spending_money),
            ));
        }
    }

    // 4. Map agrees with ledger
    let mut from_ledger: HashMap<&str, Vec<&str>> = HashMap::new();
    for attendance in museum.attendance() {
        from_ledger
            .entry(attendance.exhibit_id.as_str())
            .or_default()
            .push(attendance.patron_id.as_str());
    }
    let from_map: HashMap<&str, Vec<&str>> = museum
        .patrons_of_exhibits()
        .iter()
        .map(|(exhibit_id, ids)| {
            (exhibit_id.as_str(), ids.iter().map(String::as_str).collect::<Vec<_>>())
        })
        .collect();
    if from_ledger != from_map {
        discrepancies.push(Discrepancy::new(
            DiscrepancyCategory::LedgerMismatch,
            "Attendance map does not match the attendance ledger".to_string(),
        ));
    }

    for discrepancy in &discrepancies {
        warn!(museum = %museum.name, category = ?discrepancy.category, "{}", discrepancy.description);
    }

    ReconciliationReport {
        museum_name: museum.name.clone(),
        result,
        patron_count: museum.patrons().len(),
        exhibit_count: museum.exhibits().len(),
        discrepancies,
        reconciled_at: Utc::now(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
