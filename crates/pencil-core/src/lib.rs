pub mod error;
pub mod time_value;
pub mod types;
pub mod underwriting;

#[cfg(feature = "assessment")]
pub mod assessment;

#[cfg(feature = "assessment")]
pub mod analysis;

#[cfg(feature = "report")]
pub mod report;

pub use error::PencilError;
pub use types::*;

/// Standard result type for all pencil operations
pub type PencilResult<T> = Result<T, PencilError>;
