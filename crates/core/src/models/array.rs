use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::limits::MAX_SUBSCRIPT_LEN;

/// 数组作业下标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArraySubscript {
    /// `seq[]`，表示整个数组
    Whole,
    /// `seq[idx]`，单个子作业
    Single(u64),
    /// `seq[1-10:2]` 或 `seq[1,3,5-7]`，保留原始文本
    Range(String),
}

impl ArraySubscript {
    /// 解析方括号内部的文本，不合法时返回 `None`
    pub fn parse(body: &str) -> Option<Self> {
        if body.is_empty() {
            return Some(ArraySubscript::Whole);
        }
        if body.len() + 2 > MAX_SUBSCRIPT_LEN {
            return None;
        }
        if body.bytes().all(|b| b.is_ascii_digit()) {
            // 前导零会让规范标识与原文不一致
            if body.len() > 1 && body.starts_with('0') {
                return None;
            }
            return body.parse().ok().map(ArraySubscript::Single);
        }
        if body.split(',').all(is_range_item) {
            return Some(ArraySubscript::Range(body.to_string()));
        }
        None
    }

    pub fn is_whole(&self) -> bool {
        matches!(self, ArraySubscript::Whole)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// n | a-b | a-b:step
fn is_range_item(item: &str) -> bool {
    let (span, step) = match item.split_once(':') {
        Some((span, step)) => (span, Some(step)),
        None => (item, None),
    };
    if let Some(step) = step {
        if !is_digits(step) || !span.contains('-') {
            return false;
        }
    }
    match span.split_once('-') {
        Some((start, end)) => is_digits(start) && is_digits(end),
        None => is_digits(span),
    }
}

impl fmt::Display for ArraySubscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArraySubscript::Whole => write!(f, "[]"),
            ArraySubscript::Single(idx) => write!(f, "[{idx}]"),
            ArraySubscript::Range(body) => write!(f, "[{body}]"),
        }
    }
}

/// 对 `seq[sub][.server]` 形式作业标识的切分视图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayJobId<'a> {
    pub base: &'a str,
    pub subscript: ArraySubscript,
    /// 包含前导 `.` 的服务器后缀，没有时为空串
    pub suffix: &'a str,
}

impl<'a> ArrayJobId<'a> {
    /// 按字符扫描切分，任何不符合数组作业语法的输入都返回 `None`
    pub fn split(id: &'a str) -> Option<Self> {
        let open = id.find('[')?;
        let base = &id[..open];
        if !is_digits(base) {
            return None;
        }
        let rest = &id[open + 1..];
        let close = rest.find(']')?;
        let body = &rest[..close];
        if body.contains('[') {
            return None;
        }
        let suffix = &rest[close + 1..];
        if !(suffix.is_empty() || suffix.starts_with('.')) || suffix.contains(['[', ']']) {
            return None;
        }
        let subscript = ArraySubscript::parse(body)?;
        Some(Self {
            base,
            subscript,
            suffix,
        })
    }

    /// 整个数组共享同一条跟踪记录，下标被统一替换为 `[]`
    pub fn tracking_key(&self) -> String {
        format!("{}[]{}", self.base, self.suffix)
    }
}

/// 计算作业标识在跟踪表中的查找键，非数组作业原样返回
pub fn tracking_key(id: &str) -> Cow<'_, str> {
    match ArrayJobId::split(id) {
        Some(array_id) if !array_id.subscript.is_whole() => Cow::Owned(array_id.tracking_key()),
        _ => Cow::Borrowed(id),
    }
}
