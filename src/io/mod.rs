//! Input/output helpers.
//!
//! - roster CSV ingest + validation (`roster`)
//! - roster/template exports (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod roster;

pub use curve::*;
pub use export::*;
pub use roster::*;
