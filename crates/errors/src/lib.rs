use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("缺少必需参数: {0}")]
    InvalidArgument(String),
    #[error("作业标识格式错误: {id} - {reason}")]
    MalformedId { id: String, reason: String },
    #[error("无法解析服务器主机名: {host} - {message}")]
    HostResolution { host: String, message: String },
    #[error("未指定父服务器且未配置默认服务器")]
    NoDefaultServer,
    #[error("作业已归档，请通过历史查询接口访问: {id}")]
    HistoryJobId { id: String },
    #[error("未知的作业标识: {id}")]
    UnknownJobId { id: String },
    #[error("资源不足: {0}")]
    ResourceExhausted(String),
    #[error("配置错误: {0}")]
    Configuration(String),
    #[error("序列化错误: {0}")]
    Serialization(String),
    #[error("内部错误: {0}")]
    Internal(String),
}

pub type LocatorResult<T> = Result<T, LocatorError>;

/// 拒绝应答中携带的错误码，0 保留给成功应答
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    InvalidArgument = 15004,
    MalformedId = 15020,
    HostResolution = 15008,
    NoDefaultServer = 15034,
    HistoryJobId = 15139,
    UnknownJobId = 15001,
    ResourceExhausted = 15010,
    Internal = 15011,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn from_i32(code: i32) -> Option<Self> {
        [
            ErrorCode::InvalidArgument,
            ErrorCode::MalformedId,
            ErrorCode::HostResolution,
            ErrorCode::NoDefaultServer,
            ErrorCode::HistoryJobId,
            ErrorCode::UnknownJobId,
            ErrorCode::ResourceExhausted,
            ErrorCode::Internal,
        ]
        .into_iter()
        .find(|c| c.as_i32() == code)
    }
}

impl LocatorError {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }
    pub fn malformed_id<I: Into<String>, R: Into<String>>(id: I, reason: R) -> Self {
        Self::MalformedId {
            id: id.into(),
            reason: reason.into(),
        }
    }
    pub fn host_resolution<H: Into<String>, M: Into<String>>(host: H, message: M) -> Self {
        Self::HostResolution {
            host: host.into(),
            message: message.into(),
        }
    }
    pub fn history_job<S: Into<String>>(id: S) -> Self {
        Self::HistoryJobId { id: id.into() }
    }
    pub fn unknown_job<S: Into<String>>(id: S) -> Self {
        Self::UnknownJobId { id: id.into() }
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LocatorError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            LocatorError::MalformedId { .. } => ErrorCode::MalformedId,
            LocatorError::HostResolution { .. } => ErrorCode::HostResolution,
            LocatorError::NoDefaultServer => ErrorCode::NoDefaultServer,
            LocatorError::HistoryJobId { .. } => ErrorCode::HistoryJobId,
            LocatorError::UnknownJobId { .. } => ErrorCode::UnknownJobId,
            LocatorError::ResourceExhausted(_) => ErrorCode::ResourceExhausted,
            LocatorError::Configuration(_)
            | LocatorError::Serialization(_)
            | LocatorError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// 仅对当前请求致命，不影响服务进程
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LocatorError::Internal(_) | LocatorError::ResourceExhausted(_)
        )
    }

    pub fn user_message(&self) -> &str {
        match self {
            LocatorError::InvalidArgument(_) => "缺少作业标识",
            LocatorError::MalformedId { .. } => "作业标识格式有误",
            LocatorError::HostResolution { .. } => "无法解析作业所属服务器",
            LocatorError::NoDefaultServer => "未配置默认服务器",
            LocatorError::HistoryJobId { .. } => "作业已完成，请查询历史记录",
            LocatorError::UnknownJobId { .. } => "请求的作业不存在",
            LocatorError::ResourceExhausted(_) => "系统资源不足，请稍后重试",
            _ => "系统繁忙，请稍后重试",
        }
    }
}

impl From<serde_json::Error> for LocatorError {
    fn from(err: serde_json::Error) -> Self {
        LocatorError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for LocatorError {
    fn from(err: anyhow::Error) -> Self {
        LocatorError::Internal(err.to_string())
    }
}
