//! apg-domain
//!
//! Pure data model for the admissions prompt generator: the field catalog,
//! raw form snapshots, the normalized applicant record and the source list.
//! No I/O, no storage, no rendering.

pub mod catalog;
pub mod record;
pub mod snapshot;
pub mod sources;

pub use catalog::*;
pub use record::*;
pub use snapshot::*;
pub use sources::*;
