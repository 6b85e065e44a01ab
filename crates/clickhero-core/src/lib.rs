pub mod app;
pub mod beat;
pub mod dispatcher;
pub mod game;
pub mod input;
pub mod ipc;
pub mod report;
pub mod session;

pub use app::*;
pub use beat::*;
pub use dispatcher::*;
pub use game::*;
pub use input::*;
pub use ipc::*;
pub use report::*;
pub use session::*;
