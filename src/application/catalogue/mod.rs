mod catalogue_service;
mod errors;
mod loan_stats;

pub use catalogue_service::CatalogueService;
pub use errors::{BorrowRejectedReason, CatalogueError, Result};
pub use loan_stats::{LoanStats, compute_loan_stats};
