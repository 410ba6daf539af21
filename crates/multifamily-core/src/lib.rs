pub mod analysis;
pub mod comparison;
pub mod error;
pub mod irr;
pub mod mortgage;
pub mod portfolio;
pub mod time_value;
pub mod types;

pub use error::MultifamilyError;
pub use types::*;

/// Standard result type for all multifamily-core operations
pub type MultifamilyResult<T> = Result<T, MultifamilyError>;
