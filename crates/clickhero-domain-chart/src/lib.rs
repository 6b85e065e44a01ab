pub mod chart_import;
pub mod model;
pub mod timeline;

pub use chart_import::*;
pub use model::*;
pub use timeline::*;
