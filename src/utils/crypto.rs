//! 密码哈希与会话令牌
//!
//! 密码使用 Argon2id（PHC 字符串格式，自带盐值）；
//! 会话令牌是 32 字节随机数的十六进制，数据库只保存它的 SHA-256。

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::{rngs::OsRng, RngCore};

use super::compute_sha256;
use crate::error::{AppError, AppResult};

const TOKEN_SIZE: usize = 32;

/// 生成密码哈希
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

/// 校验密码。哈希串损坏视为内部错误，密码不匹配返回 Ok(false)
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed =
        PasswordHash::new(password_hash).map_err(|e| AppError::PasswordHash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::PasswordHash(e.to_string())),
    }
}

/// 生成新的会话令牌（明文只返回给客户端一次）
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; TOKEN_SIZE];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// 令牌入库前的摘要
pub fn hash_session_token(token: &str) -> String {
    compute_sha256(token.as_bytes())
}
