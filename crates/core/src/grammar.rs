//! 作业标识语法
//!
//! 完整语法为 `seq_number[.parent_server[:port]][@current_server[:port]]`，
//! 其中 `seq_number` 可以带一个数组下标，例如 `7[]`、`7[3]`、`7[1-10:2]`。
//! 解析只读取输入，不修改调用方的字符串。

use locator_errors::{LocatorError, LocatorResult};

use crate::limits::{MAX_CLIENT_JOB_ID_LEN, MAX_SEQ_NUMBER_LEN};
use crate::models::{ArraySubscript, JobIdentifier, ServerName};

pub fn parse_job_id(raw: &str) -> LocatorResult<JobIdentifier> {
    if raw.is_empty() {
        return Err(LocatorError::malformed_id(raw, "作业标识为空"));
    }
    if raw.len() > MAX_CLIENT_JOB_ID_LEN {
        return Err(LocatorError::malformed_id(
            truncate_for_report(raw),
            format!("作业标识超过 {MAX_CLIENT_JOB_ID_LEN} 字节"),
        ));
    }

    let (head, current) = match raw.split_once('@') {
        Some((head, current)) => (head, Some(current)),
        None => (raw, None),
    };
    let (seq_token, parent) = match head.split_once('.') {
        Some((seq, parent)) => (seq, Some(parent)),
        None => (head, None),
    };

    let (sequence_number, subscript) = parse_sequence(seq_token, raw)?;
    let parent_server = parent.map(|p| ServerName::parse(p, raw)).transpose()?;
    let current_server = current.map(|c| ServerName::parse(c, raw)).transpose()?;

    Ok(JobIdentifier {
        sequence_number,
        subscript,
        parent_server,
        current_server,
    })
}

fn parse_sequence(token: &str, raw: &str) -> LocatorResult<(String, Option<ArraySubscript>)> {
    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let (digits, rest) = token.split_at(digits_end);
    if digits.is_empty() {
        return Err(LocatorError::malformed_id(raw, "序列号为空或不是数字"));
    }
    if digits.len() > MAX_SEQ_NUMBER_LEN {
        return Err(LocatorError::malformed_id(
            raw,
            format!("序列号超过 {MAX_SEQ_NUMBER_LEN} 位"),
        ));
    }
    if rest.is_empty() {
        return Ok((digits.to_string(), None));
    }

    let body = rest
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .filter(|body| !body.contains(['[', ']']))
        .ok_or_else(|| LocatorError::malformed_id(raw, format!("序列号后存在非法内容: {rest}")))?;
    let subscript = ArraySubscript::parse(body)
        .ok_or_else(|| LocatorError::malformed_id(raw, format!("数组下标无效: {rest}")))?;
    Ok((digits.to_string(), Some(subscript)))
}

fn truncate_for_report(raw: &str) -> String {
    raw.chars().take(64).collect::<String>() + "..."
}
