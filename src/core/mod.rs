pub mod color;
pub mod error;

pub use color::{ColorTable, Rgba, decimal_to_rgba, degrees_to_radians, radians_to_degrees};
pub use error::{ExportError, ExportResult};
