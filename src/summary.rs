use crate::format::average;
use crate::models::{DashboardData, PipelineState};

/// Headline numbers of the overview tab.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewSummary {
    pub active_pipelines: usize,
    pub average_quality: Option<f64>,
    pub average_accuracy: Option<f64>,
    pub urgent_issues: usize,
}

impl OverviewSummary {
    pub fn from_data(data: &DashboardData) -> Self {
        Self {
            active_pipelines: data
                .pipelines
                .iter()
                .filter(|p| p.status == PipelineState::Running)
                .count(),
            average_quality: average(data.metrics.iter().map(|m| m.value)),
            average_accuracy: average(data.models.iter().map(|m| m.accuracy)),
            urgent_issues: data
                .issues
                .iter()
                .filter(|issue| issue.severity.is_urgent())
                .count(),
        }
    }
}
