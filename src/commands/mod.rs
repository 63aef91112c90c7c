mod auth;
mod board;
mod ownership;
mod profile;
mod tasks;
mod types;

pub use auth::*;
pub use board::*;
pub use ownership::*;
pub use profile::*;
pub use tasks::*;
pub use types::*;
