// 🖼️ Exhibit Entity - a named attraction with a fixed admission cost
//
// The exhibit name is what patrons declare interest in, so it doubles as
// the matching key. The UUID is what the museum's attendance map is keyed on:
// a cloned exhibit is the same exhibit, two exhibits built with the same
// name and cost are not.

use serde::{Deserialize, Serialize};

use super::Money;
use crate::error::{non_empty, non_negative, MuseumResult};

// ============================================================================
// EXHIBIT ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibit {
    /// Stable identity (UUID) - NEVER changes
    id: String,

    /// Display name, matched against patron interests
    name: String,

    /// Admission price, never negative
    cost: Money,
}

impl Exhibit {
    /// Create new exhibit with a fresh UUID
    pub fn new(name: impl Into<String>, cost: Money) -> MuseumResult<Self> {
        Ok(Exhibit {
            id: uuid::Uuid::new_v4().to_string(),
            name: non_empty("Exhibit", name.into())?,
            cost: non_negative("cost", cost)?,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    /// Free exhibits are attended by every interested patron
    pub fn is_free(&self) -> bool {
        self.cost == 0
    }
}

// ============================================================================
// TESTS
// ============================================================================
