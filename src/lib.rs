// Museum Simulation - Core Library
// Exhibits, patrons, interest matching and paid attendance

pub mod attendance;
pub mod entities;
pub mod error;
pub mod loader;
pub mod museum;
pub mod reconciliation;

// Re-export commonly used types
pub use attendance::{AdmissionReport, Attendance, SkipReason, SkippedExhibit};
pub use entities::{Exhibit, Money, Patron};
pub use error::{MuseumError, MuseumResult};
pub use loader::{ExhibitRecord, PatronRecord, Scenario};
pub use museum::Museum;
pub use reconciliation::{
    reconcile, Discrepancy, DiscrepancyCategory, ReconciliationReport, ReconciliationResult,
};
