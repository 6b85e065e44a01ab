pub mod resolver;
pub mod stats;
pub mod threshold;

pub use resolver::*;
pub use stats::*;
pub use threshold::*;
