pub mod document;
pub mod options;

pub use document::{DocumentKind, GeometryType};
pub use options::{AxisMode, FixOptions, OutputMethod, RunMode};
