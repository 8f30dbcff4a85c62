//! Domain logic for the plant catalog: records, the finder matcher, the
//! identification reconciler and care guides. No I/O lives here.

pub mod care;
pub mod catalog;
pub mod error;
pub mod identification;
pub mod plant;
pub mod recommendation;
pub mod search;
pub mod session;
pub mod types;
