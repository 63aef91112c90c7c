//! 通用验证函数
//!
//! 提供集中的验证逻辑，避免在命令层重复验证代码。
//! 错误消息会原样返回给客户端。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::db::TaskStatus;
use crate::error::{AppError, AppResult};
use crate::utils::format_timestamp;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const NAME_MAX_CHARS: usize = 100;
pub const PASSWORD_MIN_CHARS: usize = 8;

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 验证标题非空白且不超过 100 字符
///
/// 长度按原始输入计算，原样返回（不 trim）
pub fn validate_title(title: &str) -> AppResult<&str> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Title must be at most {} characters",
            TITLE_MAX_CHARS
        )));
    }
    Ok(title)
}

/// 描述允许为空，最多 500 字符
pub fn validate_description(description: &str) -> AppResult<&str> {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Description must be at most {} characters",
            DESCRIPTION_MAX_CHARS
        )));
    }
    Ok(description)
}

/// 解析截止日期并规范化为 RFC 3339 UTC 字符串
///
/// 支持 RFC 3339、无时区的日期时间（按 UTC）以及纯日期（UTC 零点）
pub fn parse_due_date(raw: &str) -> AppResult<String> {
    let raw = raw.trim();
    parse_datetime(raw)
        .map(format_timestamp)
        .ok_or_else(|| AppError::Validation("Invalid date format".to_string()))
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 解析任务状态（更新时使用，未知取值报错）
pub fn parse_status(raw: &str) -> AppResult<TaskStatus> {
    TaskStatus::parse(raw).ok_or_else(|| AppError::Validation("Invalid status".to_string()))
}

/// 解析列表过滤条件：未知取值直接忽略
pub fn parse_status_filter(raw: Option<&str>) -> Option<TaskStatus> {
    raw.and_then(TaskStatus::parse)
}

/// 验证用户名
pub fn validate_name(name: &str) -> AppResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if trimmed.chars().count() > NAME_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Name must be at most {} characters",
            NAME_MAX_CHARS
        )));
    }
    Ok(trimmed)
}

/// 验证邮箱格式（只做基本检查），返回 trim + 小写后的邮箱
pub fn validate_email(email: &str) -> AppResult<String> {
    let normalized = email.trim().to_lowercase();
    let valid = match normalized.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
                && !normalized.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    Ok(normalized)
}

/// 验证新密码长度
pub fn validate_password(password: &str) -> AppResult<&str> {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_CHARS
        )));
    }
    Ok(password)
}
