//! PromptVault License Log
//!
//! Append-only record of product license activations. A key can be
//! activated at most once; the store enforces this with a unique
//! constraint rather than a check-then-insert in the caller.

mod error;
mod license;
mod manager;

pub use error::LicenseError;
pub use license::LicenseRecord;
pub use manager::LicenseManager;

pub type Result<T> = std::result::Result<T, LicenseError>;
