pub mod messages;
pub mod config;
pub mod models;
pub mod utils;

pub use messages::*;
pub use self::config::*;
pub use utils::*;
