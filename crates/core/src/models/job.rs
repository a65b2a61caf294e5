use serde::{Deserialize, Serialize};

/// 作业状态，定位服务只关心 `Moved` 与 `Finished`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Transit,
    Queued,
    Held,
    Waiting,
    Running,
    Exiting,
    Expired,
    Begun,
    Moved,
    Finished,
}

/// 实时作业表中的作业记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveJobRecord {
    pub job_id: String,
    pub state: JobState,
    /// 作业已完成并保留为历史记录
    #[serde(default)]
    pub archived: bool,
}

impl LiveJobRecord {
    pub fn new<S: Into<String>>(job_id: S, state: JobState) -> Self {
        Self {
            job_id: job_id.into(),
            state,
            archived: false,
        }
    }

    pub fn is_moved(&self) -> bool {
        self.state == JobState::Moved
    }

    /// 历史作业：已归档、已完成，或迁出后在目标端完成
    pub fn is_history(&self) -> bool {
        self.archived || self.state == JobState::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_classification() {
        assert!(!LiveJobRecord::new("1.s", JobState::Running).is_history());
        assert!(LiveJobRecord::new("1.s", JobState::Finished).is_history());

        let mut moved = LiveJobRecord::new("1.s", JobState::Moved);
        assert!(moved.is_moved());
        assert!(!moved.is_history());
        moved.archived = true;
        assert!(moved.is_history());
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_string(&JobState::Moved).unwrap();
        assert_eq!(json, "\"MOVED\"");
        let record: LiveJobRecord =
            serde_json::from_str(r#"{"job_id":"1.s","state":"QUEUED"}"#).unwrap();
        assert_eq!(record.state, JobState::Queued);
        assert!(!record.archived);
    }
}
