pub mod analyze;
pub mod error;
pub mod ops;
pub mod resolve;

pub use analyze::{
    CharCoverageReport, DuplicateRecord, DuplicateReport, PhoneticCoverageReport, char_coverage,
    find_duplicates, phonetic_coverage,
};
pub use error::AppError;
pub use ops::{Operation, Outcome, Request, run};
