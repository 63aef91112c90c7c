mod hash;
mod time;
pub mod crypto;
pub mod validation;

pub use hash::*;
pub use time::*;
