//! EDSM API model types.

mod faction;
mod market;
mod station;
mod system;
mod traffic;

pub use faction::*;
pub use market::*;
pub use station::*;
pub use system::*;
pub use traffic::*;

use serde::Serializer;

/// EDSM boolean query flags go on the wire as `0`/`1` integers.
pub(crate) fn flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}
