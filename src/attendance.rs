// 🎟️ Attendance Ledger - every paid visit is an event
//
// An Attendance is written each time a patron pays for an exhibit.
// The ledger is append-only: no refunds, no removals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Exhibit, Money, Patron};

// ============================================================================
// ATTENDANCE
// ============================================================================

/// One recorded (exhibit, patron) pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub attendance_id: String,
    pub exhibit_id: String,
    pub exhibit_name: String,
    pub patron_id: String,
    pub patron_name: String,
    /// What the patron paid (the exhibit's cost at the time)
    pub cost: Money,
    pub attended_at: DateTime<Utc>,
}

impl Attendance {
    pub fn new(exhibit: &Exhibit, patron: &Patron) -> Self {
        Attendance {
            attendance_id: uuid::Uuid::new_v4().to_string(),
            exhibit_id: exhibit.id().to_string(),
            exhibit_name: exhibit.name().to_string(),
            patron_id: patron.id.clone(),
            patron_name: patron.name.clone(),
            cost: exhibit.cost(),
            attended_at: Utc::now(),
        }
    }
}

// ============================================================================
// SKIPPED EXHIBIT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Cost was more than the patron had left
    Unaffordable,

    /// Taking the payment would overflow the museum's revenue
    RevenueOverflow,
}

/// An interesting exhibit the patron did not attend when it came up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedExhibit {
    pub exhibit_id: String,
    pub exhibit_name: String,
    pub cost: Money,
    /// Balance at the moment the exhibit was considered
    pub balance: Money,
    pub reason: SkipReason,
}

impl SkippedExhibit {
    pub fn new(exhibit: &Exhibit, balance: Money, reason: SkipReason) -> Self {
        SkippedExhibit {
            exhibit_id: exhibit.id().to_string(),
            exhibit_name: exhibit.name().to_string(),
            cost: exhibit.cost(),
            balance,
            reason,
        }
    }

    /// How much more the patron would have needed (0 if they could pay)
    pub fn shortfall(&self) -> Money {
        self.cost.saturating_sub(self.balance).max(0)
    }
}

// ============================================================================
// ADMISSION REPORT
// ============================================================================

/// Outcome of admitting one patron: where they went, what they skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionReport {
    pub patron_id: String,
    pub patron_name: String,
    pub starting_money: Money,
    pub remaining_money: Money,
    /// In visiting order (costliest first)
    pub attended: Vec<Attendance>,
    pub skipped: Vec<SkippedExhibit>,
}

impl AdmissionReport {
    pub fn new(patron: &Patron) -> Self {
        AdmissionReport {
            patron_id: patron.id.clone(),
            patron_name: patron.name.clone(),
            starting_money: patron.spending_money,
            remaining_money: patron.spending_money,
            attended: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn spent(&self) -> Money {
        self.attended
            .iter()
            .fold(0, |total: Money, a| total.saturating_add(a.cost))
    }

    pub fn attended_exhibit_names(&self) -> Vec<&str> {
        self.attended.iter().map(|a| a.exhibit_name.as_str()).collect()
    }

    pub fn summary(&self) -> String {
        let visited = if self.attended.is_empty() {
            "nothing".to_string()
        } else {
            self.attended_exhibit_names().join(", ")
        };

        format!(
            "{} attended {} (spent ${}, ${} left, {} skipped)",
            self.patron_name,
            visited,
            self.spent(),
            self.remaining_money,
            self.skipped.len()
        )
    }
}
