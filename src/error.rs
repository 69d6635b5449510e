/// Error types for the booking engine.
/// Domain variants carry the user-facing messages shown by the front end.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("该手机号已注册")]
    PhoneAlreadyRegistered,

    #[error("账号或密码错误")]
    InvalidCredentials,

    #[error("未登录")]
    NotLoggedIn,

    #[error("用户不存在")]
    UserNotFound,

    #[error("订单不存在")]
    OrderNotFound,

    #[error("仅已支付订单可退票")]
    OrderNotPaid,

    #[error("车次不存在")]
    TrainNotFound,

    #[error("该车次无此席别")]
    SeatClassNotFound,

    #[error("乘客不存在")]
    PassengerNotFound,

    #[error("改签车次不能与原车次相同")]
    InvalidReschedule,

    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

pub type Result<T> = std::result::Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_messages() {
        assert_eq!(BookingError::PhoneAlreadyRegistered.to_string(), "该手机号已注册");
        assert_eq!(BookingError::OrderNotFound.to_string(), "订单不存在");
        assert_eq!(BookingError::OrderNotPaid.to_string(), "仅已支付订单可退票");
    }

    #[test]
    fn test_validation_message_passthrough() {
        let err = BookingError::Validation("密码至少6位".to_string());
        assert_eq!(err.to_string(), "密码至少6位");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: BookingError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: BookingError = json_err.into();
        assert!(matches!(err, BookingError::Json(_)));
    }
}
