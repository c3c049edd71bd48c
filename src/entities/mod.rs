// Entity Models - passive records the Museum works with
// Patron and Exhibit only store data; all behavior lives on Museum.

pub mod exhibit;
pub mod patron;

pub use exhibit::Exhibit;
pub use patron::Patron;

/// Integer money units (admission costs, spending balances, revenue)
pub type Money = i64;
