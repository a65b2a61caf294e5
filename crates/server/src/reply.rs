use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use locator_errors::{ErrorCode, LocatorError, LocatorResult};

/// 定位作业请求，作业标识可以带 `@server` 路由提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocateRequest {
    pub job_id: String,
}

impl LocateRequest {
    pub fn new<S: Into<String>>(job_id: S) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyChoice {
    Locate(String),
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReply {
    pub code: i32,
    pub aux_code: i32,
    pub choice: ReplyChoice,
}

impl BatchReply {
    pub fn locate<S: Into<String>>(location: S) -> Self {
        Self {
            code: 0,
            aux_code: 0,
            choice: ReplyChoice::Locate(location.into()),
        }
    }

    pub fn reject(code: ErrorCode) -> Self {
        Self {
            code: code.as_i32(),
            aux_code: 0,
            choice: ReplyChoice::Reject,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    pub fn location(&self) -> Option<&str> {
        match &self.choice {
            ReplyChoice::Locate(location) => Some(location),
            ReplyChoice::Reject => None,
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_i32(self.code)
    }
}

/// 把应答交给传输层
pub trait ReplyChannel: Send + Sync {
    fn send(&self, reply: BatchReply) -> LocatorResult<()>;
}

impl ReplyChannel for UnboundedSender<BatchReply> {
    fn send(&self, reply: BatchReply) -> LocatorResult<()> {
        UnboundedSender::send(self, reply).map_err(|_| LocatorError::internal("应答通道已关闭"))
    }
}
