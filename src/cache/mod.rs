//! Request cache
//!
//! An in-memory store with a single time-to-live per instance. Entries are
//! swept by a background task, not checked on read. Nothing survives a
//! process restart.

mod ttl;

pub use ttl::TtlCache;
