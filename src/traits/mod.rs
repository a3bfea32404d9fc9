//! Operation traits for EDSM entities.

mod fetch;

pub use fetch::Fetch;
