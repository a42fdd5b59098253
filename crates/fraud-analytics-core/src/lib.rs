pub mod amount;
pub mod error;
pub mod types;
pub mod year;

#[cfg(feature = "severity")]
pub mod severity;

#[cfg(feature = "trends")]
pub mod trends;

#[cfg(feature = "summary")]
pub mod summary;

#[cfg(feature = "filters")]
pub mod filters;

#[cfg(all(feature = "severity", feature = "trends", feature = "summary", feature = "filters"))]
pub mod analysis;

pub use error::FraudAnalyticsError;
pub use types::*;

/// Standard result type for the fallible entry points (filters, envelopes)
pub type FraudResult<T> = Result<T, FraudAnalyticsError>;
