//! zc-core: stable foundation for the zone charge editor.
//!
//! Contains:
//! - ids (zone identifiers)
//! - numeric (decimal-string normalizer, strict parsing, exact summation)
//! - events (named-event emitter used by storage and validators)
//! - collate (name ordering for the selected list)
//! - error (shared error types)

pub mod collate;
pub mod error;
pub mod events;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use collate::{Collation, compare_names};
pub use error::{CoreError, CoreResult};
pub use events::{Emitter, EventKind, SubscriptionId};
pub use ids::ZoneId;
pub use numeric::*;
