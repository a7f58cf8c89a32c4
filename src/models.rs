use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    Running,
    Completed,
    Failed,
    Idle,
}

impl PipelineState {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineState::Running => "running",
            PipelineState::Completed => "completed",
            PipelineState::Failed => "failed",
            PipelineState::Idle => "idle",
        }
    }
}

/// Display label sent by the server; never recomputed against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Warning,
    Critical,
}

impl MetricStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricStatus::Good => "good",
            MetricStatus::Warning => "warning",
            MetricStatus::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn is_urgent(self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStatus {
    pub name: String,
    pub status: PipelineState,
    pub last_run: DateTime<Utc>,
    /// Seconds.
    pub duration: u64,
    pub records_processed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetric {
    pub name: String,
    pub value: f64,
    pub threshold: f64,
    pub status: MetricStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiModelPerformance {
    pub name: String,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub last_trained: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityIssue {
    pub severity: Severity,
    pub category: String,
    pub description: String,
    pub affected_records: u64,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendItem {
    pub keyword: String,
    pub volume: u64,
    /// Preformatted by the server, e.g. "+12%".
    pub growth: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub task: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_goal: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weekly_goal: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_goal: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub checklist: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSuggestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub priority: Priority,
}

/// Everything the pipeline dashboard view shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub pipelines: Vec<PipelineStatus>,
    pub metrics: Vec<QualityMetric>,
    pub models: Vec<AiModelPerformance>,
    pub issues: Vec<DataQualityIssue>,
}

/// Everything the marketing home view shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeData {
    pub news: Vec<NewsItem>,
    pub trends: Vec<TrendItem>,
    pub goals: Goals,
    pub suggestions: Vec<AiSuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_uses_camel_case_wire_names() {
        let pipeline: PipelineStatus = serde_json::from_str(
            r#"{"name":"ingest","status":"running","lastRun":"2024-01-15T10:30:00Z","duration":120,"recordsProcessed":1500}"#,
        )
        .unwrap();
        assert_eq!(pipeline.status, PipelineState::Running);
        assert_eq!(pipeline.duration, 120);
        assert_eq!(pipeline.records_processed, 1500);
    }

    #[test]
    fn unknown_pipeline_state_is_rejected() {
        let result: Result<PipelineStatus, _> = serde_json::from_str(
            r#"{"name":"ingest","status":"paused","lastRun":"2024-01-15T10:30:00Z","duration":1,"recordsProcessed":1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn goals_tolerate_missing_fields() {
        let goals: Goals = serde_json::from_str(r#"{"daily_goal":"ship it"}"#).unwrap();
        assert_eq!(goals.daily_goal, "ship it");
        assert!(goals.weekly_goal.is_empty());
        assert!(goals.checklist.is_empty());
    }

    #[test]
    fn goals_treat_null_fields_as_empty() {
        let goals: Goals = serde_json::from_str(
            r#"{"daily_goal":null,"weekly_goal":"grow reach","monthly_goal":null,"checklist":null}"#,
        )
        .unwrap();
        assert!(goals.daily_goal.is_empty());
        assert_eq!(goals.weekly_goal, "grow reach");
        assert!(goals.monthly_goal.is_empty());
        assert!(goals.checklist.is_empty());

        let item: ChecklistItem =
            serde_json::from_str(r#"{"task":"draft copy","completed":null}"#).unwrap();
        assert!(!item.completed);
    }

    #[test]
    fn suggestion_reads_type_field() {
        let suggestion: AiSuggestion =
            serde_json::from_str(r#"{"type":"content","message":"post more reels","priority":"high"}"#)
                .unwrap();
        assert_eq!(suggestion.kind, "content");
        assert_eq!(suggestion.priority, Priority::High);
    }

    #[test]
    fn only_high_and_critical_are_urgent() {
        assert!(Severity::Critical.is_urgent());
        assert!(Severity::High.is_urgent());
        assert!(!Severity::Medium.is_urgent());
        assert!(!Severity::Low.is_urgent());
    }
}
