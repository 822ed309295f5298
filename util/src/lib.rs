//! Utility library for the roll-control simulation software

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod archive;
pub mod host;
pub mod logger;
pub mod maths;
pub mod module;
pub mod params;
pub mod session;
pub mod time;
