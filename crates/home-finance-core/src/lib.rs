pub mod error;
pub mod format;
pub mod time_value;
pub mod types;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "gift_tax")]
pub mod gift_tax;

#[cfg(feature = "funding")]
pub mod funding;

pub use error::HomeFinanceError;
pub use types::*;

/// Standard result type for all fallible home-finance operations
pub type HomeFinanceResult<T> = Result<T, HomeFinanceError>;
