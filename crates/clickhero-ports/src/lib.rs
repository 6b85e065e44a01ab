pub mod playback;
pub mod storage;
pub mod types;

pub use playback::*;
pub use storage::*;
pub use types::*;
