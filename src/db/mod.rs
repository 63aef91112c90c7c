mod pool;
mod sessions;
mod tasks;
mod types;
mod users;


pub use pool::*;
pub use sessions::*;
pub use tasks::*;
pub use types::*;
pub use users::*;
