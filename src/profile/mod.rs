//! Contractor profile assembly.

pub mod loader;

pub use loader::{load_contractor, load_flyers};
