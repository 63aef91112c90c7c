//! 认证
//!
//! - `session`: 会话的创建、解析与注销
//! - `extractor`: `AuthUser` 提取器，所有需要登录的接口都通过它拿到用户 ID

mod extractor;
mod session;

pub use extractor::*;
pub use session::*;
