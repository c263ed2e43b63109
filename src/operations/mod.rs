pub mod vortex;
pub mod query;
