use crate::utils::error::{Diy99Error, Result};

// 99Diy 業務狀態碼
pub const OK: i64 = 200;
pub const SERVICE_NOT_FOUND_ERROR: i64 = 400;
pub const INTERNAL_ERROR: i64 = 500;

pub fn is_success_code(code: i64) -> bool {
    code == 0 || code == OK
}

/// Map a remote status code and message to `Ok(())` or a [`Diy99Error::RemoteError`].
pub fn wrap_status(code: i64, message: &str) -> Result<()> {
    if is_success_code(code) {
        return Ok(());
    }

    let message = match code {
        SERVICE_NOT_FOUND_ERROR => "service not found".to_string(),
        INTERNAL_ERROR if message.is_empty() => "internal error, please contact 99Diy".to_string(),
        INTERNAL_ERROR => message.to_string(),
        _ => match message.trim() {
            "" => "unknown error".to_string(),
            trimmed => trimmed.to_string(),
        },
    };

    Err(Diy99Error::RemoteError { code, message })
}
