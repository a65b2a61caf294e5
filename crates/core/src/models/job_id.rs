use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use locator_errors::{LocatorError, LocatorResult};

use super::{ArraySubscript, ServerName};
use crate::grammar;
use crate::limits::MAX_SERVER_JOB_ID_LEN;

/// 解析后的作业标识 `seq[sub][.parent[:port]][@current[:port]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobIdentifier {
    /// 十进制序列号，解析成功时一定非空
    pub sequence_number: String,
    pub subscript: Option<ArraySubscript>,
    /// 创建作业的服务器
    pub parent_server: Option<ServerName>,
    /// `@server` 指定的当前服务器，仅用于路由
    pub current_server: Option<ServerName>,
}

impl JobIdentifier {
    pub fn parse(raw: &str) -> LocatorResult<Self> {
        grammar::parse_job_id(raw)
    }

    /// 序列号加数组下标，即规范标识中 `.` 之前的部分
    pub fn sequence(&self) -> String {
        match &self.subscript {
            Some(subscript) => format!("{}{}", self.sequence_number, subscript),
            None => self.sequence_number.clone(),
        }
    }

    pub fn is_array(&self) -> bool {
        self.subscript.is_some()
    }
}

impl FromStr for JobIdentifier {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for JobIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sequence())?;
        if let Some(parent) = &self.parent_server {
            write!(f, ".{parent}")?;
        }
        if let Some(current) = &self.current_server {
            write!(f, "@{current}")?;
        }
        Ok(())
    }
}

/// 规范作业标识 `sequence.server`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalJobId(String);

impl CanonicalJobId {
    pub fn new(sequence: &str, server: &str) -> LocatorResult<Self> {
        let id = format!("{sequence}.{server}");
        if id.len() > MAX_SERVER_JOB_ID_LEN {
            return Err(LocatorError::malformed_id(
                id,
                format!("规范作业标识超过 {MAX_SERVER_JOB_ID_LEN} 字节"),
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CanonicalJobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
