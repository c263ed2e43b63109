//! Sketch a closed polygon with mouse clicks and solve the incompressible
//! potential flow around it with a vortex panel method.

pub mod editor;
pub mod error;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{PanelflowError, Result};
