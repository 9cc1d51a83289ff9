// Application layer - turns raw user input into ledger operations.
// The CLI shell talks to ExpenseService only; the domain Ledger stays free of
// parsing and logging concerns.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
