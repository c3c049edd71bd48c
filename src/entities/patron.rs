// 🧑 Patron Entity - a visitor with spending money and declared interests
//
// Interests are exhibit names, kept in the order they were declared.
// Duplicates are allowed. The only mutation outside this file is the
// museum deducting admission from `spending_money`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Money;
use crate::error::{non_empty, non_negative, MuseumResult};

// ============================================================================
// PATRON ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patron {
    // ========================================================================
    // IDENTITY
    // ========================================================================
    /// Stable identity (UUID) - NEVER changes
    pub id: String,

    pub name: String,

    // ========================================================================
    // STATE
    // ========================================================================
    /// Money left to spend on exhibits. Only the museum decreases it.
    pub(crate) spending_money: Money,

    /// Exhibit names this patron wants to see (append-only)
    pub interests: Vec<String>,

    /// Set when a museum admits the patron
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admitted_at: Option<DateTime<Utc>>,
}

impl Patron {
    /// Create new patron with a fresh UUID and no interests
    pub fn new(name: impl Into<String>, spending_money: Money) -> MuseumResult<Self> {
        Ok(Patron {
            id: uuid::Uuid::new_v4().to_string(),
            name: non_empty("Patron", name.into())?,
            spending_money: non_negative("spending_money", spending_money)?,
            interests: Vec::new(),
            admitted_at: None,
        })
    }

    /// Append an interest, keeping earlier entries and duplicates
    pub fn add_interest(&mut self, interest: impl Into<String>) {
        self.interests.push(interest.into());
    }

    /// Builder form of `add_interest`
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for interest in interests {
            self.add_interest(interest);
        }
        self
    }

    /// Exact membership test against the full interest list
    pub fn has_interest(&self, exhibit_name: &str) -> bool {
        self.interests.iter().any(|interest| interest == exhibit_name)
    }

    pub fn spending_money(&self) -> Money {
        self.spending_money
    }

    pub fn can_afford(&self, cost: Money) -> bool {
        self.spending_money >= cost
    }

    pub fn is_admitted(&self) -> bool {
        self.admitted_at.is_some()
    }
}

// ============================================================================
// TESTS
// ============================================================================
