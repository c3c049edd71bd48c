// 🏛️ Museum - aggregate root for exhibits, patrons and attendance
//
// Queries never reorder or mutate the exhibit list; they build new Vecs.
// Admission is the only place money moves:
//   patron.spending_money -= cost  and  museum.revenue += cost
// happen together, once per recorded attendance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::attendance::{AdmissionReport, Attendance, SkipReason, SkippedExhibit};
use crate::entities::{Exhibit, Money, Patron};
use crate::error::{MuseumError, MuseumResult};

// ============================================================================
// MUSEUM
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Museum {
    /// Stable identity (UUID)
    pub id: String,
    pub name: String,
    pub opened_at: DateTime<Utc>,

    /// In the order they were added; duplicates allowed
    pub(crate) exhibits: Vec<Exhibit>,

    /// In admission order
    pub(crate) patrons: Vec<Patron>,

    /// Sum of every recorded attendance cost
    pub(crate) revenue: Money,

    /// exhibit id -> patron ids, in admission order.
    /// A key exists only once someone has attended.
    pub(crate) patrons_of_exhibits: HashMap<String, Vec<String>>,

    /// Append-only ledger backing `revenue` and `patrons_of_exhibits`
    pub(crate) attendance: Vec<Attendance>,
}

impl Museum {
    pub fn new(name: impl Into<String>) -> Self {
        Museum {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            opened_at: Utc::now(),
            exhibits: Vec::new(),
            patrons: Vec::new(),
            revenue: 0,
            patrons_of_exhibits: HashMap::new(),
            attendance: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn exhibits(&self) -> &[Exhibit] {
        &self.exhibits
    }

    pub fn patrons(&self) -> &[Patron] {
        &self.patrons
    }

    pub fn revenue(&self) -> Money {
        self.revenue
    }

    pub fn patrons_of_exhibits(&self) -> &HashMap<String, Vec<String>> {
        &self.patrons_of_exhibits
    }

    pub fn attendance(&self) -> &[Attendance] {
        &self.attendance
    }

    pub fn exhibit(&self, id: &str) -> Option<&Exhibit> {
        self.exhibits.iter().find(|e| e.id() == id)
    }

    pub fn patron(&self, id: &str) -> Option<&Patron> {
        self.patrons.iter().find(|p| p.id == id)
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    pub fn add_exhibit(&mut self, exhibit: Exhibit) {
        debug!(
            exhibit = %exhibit.name(),
            cost = exhibit.cost(),
            free = exhibit.is_free(),
            "exhibit added"
        );
        self.exhibits.push(exhibit);
    }

    /// Add an interest to a patron who has already been admitted.
    ///
    /// Only affects later queries; the patron's tour already happened.
    pub fn add_patron_interest(
        &mut self,
        patron_id: &str,
        interest: impl Into<String>,
    ) -> MuseumResult<()> {
        let patron = self
            .patrons
            .iter_mut()
            .find(|p| p.id == patron_id)
            .ok_or_else(|| MuseumError::UnknownPatron(patron_id.to_string()))?;
        patron.add_interest(interest);
        Ok(())
    }

    /// Admit a patron and send them through every exhibit they want to see,
    /// costliest first, paying for each one they can still afford.
    ///
    /// Affordability is checked per exhibit against the running balance, so
    /// skipping an expensive exhibit does not stop the patron from seeing a
    /// cheaper one afterwards.
    pub fn admit(&mut self, mut patron: Patron) -> AdmissionReport {
        patron.admitted_at = Some(Utc::now());

        let tour: Vec<Exhibit> = self
            .interested_exhibits_by_cost(&patron)
            .into_iter()
            .cloned()
            .collect();

        let mut report = AdmissionReport::new(&patron);

        for exhibit in &tour {
            if !patron.can_afford(exhibit.cost()) {
                debug!(
                    patron = %patron.name,
                    exhibit = %exhibit.name(),
                    cost = exhibit.cost(),
                    balance = patron.spending_money,
                    "cannot afford, skipping"
                );
                report.skipped.push(SkippedExhibit::new(
                    exhibit,
                    patron.spending_money,
                    SkipReason::Unaffordable,
                ));
                continue;
            }

            let Some(revenue) = self.revenue.checked_add(exhibit.cost()) else {
                warn!(
                    museum = %self.name,
                    patron = %patron.name,
                    exhibit = %exhibit.name(),
                    cost = exhibit.cost(),
                    revenue = self.revenue,
                    "payment would overflow revenue, skipping"
                );
                report.skipped.push(SkippedExhibit::new(
                    exhibit,
                    patron.spending_money,
                    SkipReason::RevenueOverflow,
                ));
                continue;
            };

            patron.spending_money -= exhibit.cost();
            let attendance = self.record_attendance(exhibit, &patron, revenue);
            debug!(
                patron = %patron.name,
                exhibit = %exhibit.name(),
                cost = exhibit.cost(),
                balance = patron.spending_money,
                "attended"
            );
            report.attended.push(attendance);
        }

        report.remaining_money = patron.spending_money;
        info!(
            museum = %self.name,
            patron = %patron.name,
            attended = report.attended.len(),
            spent = report.spent(),
            "patron admitted"
        );

        self.patrons.push(patron);
        report
    }

    fn record_attendance(
        &mut self,
        exhibit: &Exhibit,
        patron: &Patron,
        revenue: Money,
    ) -> Attendance {
        self.revenue = revenue;
        self.patrons_of_exhibits
            .entry(exhibit.id().to_string())
            .or_default()
            .push(patron.id.clone());

        let attendance = Attendance::new(exhibit, patron);
        self.attendance.push(attendance.clone());
        attendance
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// True iff the exhibit's name appears anywhere in the patron's interests
    pub fn interested(&self, patron: &Patron, exhibit: &Exhibit) -> bool {
        patron.has_interest(exhibit.name())
    }

    /// Exhibits the patron is interested in, in exhibit order
    pub fn recommend_exhibits(&self, patron: &Patron) -> Vec<&Exhibit> {
        self.exhibits
            .iter()
            .filter(|exhibit| self.interested(patron, exhibit))
            .collect()
    }

    /// Patrons interested in the exhibit, in admission order
    pub fn patrons_who_like_exhibit(&self, exhibit: &Exhibit) -> Vec<&Patron> {
        self.patrons
            .iter()
            .filter(|patron| self.interested(patron, exhibit))
            .collect()
    }

    /// Each exhibit paired with its interested patrons, in exhibit order.
    ///
    /// Exhibits nobody likes are left out. An exhibit added more than once
    /// appears once, at its first position.
    pub fn patrons_by_exhibit_interest(&self) -> Vec<(&Exhibit, Vec<&Patron>)> {
        let mut seen = HashSet::new();

        self.exhibits
            .iter()
            .filter(|exhibit| seen.insert(exhibit.id()))
            .filter_map(|exhibit| {
                let patrons = self.patrons_who_like_exhibit(exhibit);
                if patrons.is_empty() {
                    None
                } else {
                    Some((exhibit, patrons))
                }
            })
            .collect()
    }

    /// `recommend_exhibits` ordered costliest first; equal costs keep
    /// exhibit order
    pub fn interested_exhibits_by_cost(&self, patron: &Patron) -> Vec<&Exhibit> {
        let mut exhibits = self.recommend_exhibits(patron);
        // sort_by is stable
        exhibits.sort_by(|a, b| b.cost().cmp(&a.cost()));
        exhibits
    }

    /// Patrons who paid to attend the exhibit, in admission order
    pub fn patrons_of_exhibit(&self, exhibit: &Exhibit) -> Vec<&Patron> {
        self.patrons_of_exhibits
            .get(exhibit.id())
            .map(|ids| ids.iter().filter_map(|id| self.patron(id)).collect())
            .unwrap_or_default()
    }

    /// Revenue earned per exhibit, in exhibit order (duplicates collapsed)
    pub fn revenue_by_exhibit(&self) -> Vec<(&Exhibit, Money)> {
        let mut totals: HashMap<&str, Money> = HashMap::new();
        for attendance in &self.attendance {
            let total = totals.entry(attendance.exhibit_id.as_str()).or_insert(0);
            *total = total.saturating_add(attendance.cost);
        }

        let mut seen = HashSet::new();
        self.exhibits
            .iter()
            .filter(|exhibit| seen.insert(exhibit.id()))
            .map(|exhibit| {
                let total = totals.get(exhibit.id()).copied().unwrap_or(0);
                (exhibit, total)
            })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
