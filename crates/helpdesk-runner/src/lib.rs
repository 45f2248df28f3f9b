pub mod command;
pub mod config;
pub mod demo;
pub mod intake;
pub mod render;
pub mod reply;
pub mod scenario;
pub mod session;

pub use command::*;
pub use config::*;
pub use demo::*;
pub use intake::*;
pub use render::*;
pub use reply::*;
pub use session::*;
