use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::aggregator::{Origin, ViewModel};
use crate::format::{format_average, format_count, format_duration, format_percent};
use crate::models::{DashboardData, HomeData};
use crate::summary::OverviewSummary;

fn origin_note(origin: &Origin) -> Option<String> {
    match origin {
        Origin::Live => None,
        Origin::Fallback { reason } => Some(format!("> Sample data shown: {reason}")),
        Origin::Failed { reason } => Some(format!("> Data unavailable: {reason}")),
    }
}

/// Keeps a value inside one markdown table cell.
fn table_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

pub fn build_report(
    dashboard: &ViewModel<DashboardData>,
    home: &ViewModel<HomeData>,
    generated_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();
    let data = &dashboard.data;
    let summary = OverviewSummary::from_data(data);

    let _ = writeln!(output, "# Marketing Pipeline Report");
    let _ = writeln!(output, "Generated {}", generated_at.to_rfc3339());
    let _ = writeln!(output);

    let _ = writeln!(output, "## Overview");
    if let Some(note) = origin_note(&dashboard.origin) {
        let _ = writeln!(output, "{note}");
        let _ = writeln!(output);
    }
    let _ = writeln!(output, "- Active pipelines: {}", summary.active_pipelines);
    let _ = writeln!(
        output,
        "- Average quality score: {}",
        format_average(summary.average_quality)
    );
    let _ = writeln!(
        output,
        "- Average AI accuracy: {}",
        format_average(summary.average_accuracy)
    );
    let _ = writeln!(output, "- High/critical issues: {}", summary.urgent_issues);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Pipelines");
    if data.pipelines.is_empty() {
        let _ = writeln!(output, "No pipelines reported.");
    } else {
        let _ = writeln!(output, "| Name | Status | Last run | Duration | Records |");
        let _ = writeln!(output, "|---|---|---|---|---|");
        for pipeline in &data.pipelines {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                table_cell(&pipeline.name),
                pipeline.status.as_str(),
                pipeline.last_run.to_rfc3339(),
                format_duration(pipeline.duration),
                format_count(pipeline.records_processed)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Data Quality");
    if data.metrics.is_empty() {
        let _ = writeln!(output, "No quality metrics reported.");
    }
    for metric in &data.metrics {
        let _ = writeln!(
            output,
            "- {}: {} (threshold {}, {})",
            metric.name,
            format_percent(metric.value),
            format_percent(metric.threshold),
            metric.status.as_str()
        );
    }
    for issue in &data.issues {
        let _ = writeln!(
            output,
            "- **{}** {}: {} ({} records). {}",
            issue.severity.as_str(),
            issue.category,
            issue.description,
            format_count(issue.affected_records),
            issue.recommendation
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## AI Models");
    if data.models.is_empty() {
        let _ = writeln!(output, "No models reported.");
    }
    for model in &data.models {
        let _ = writeln!(
            output,
            "- {}: accuracy {}, precision {}, recall {}, F1 {}",
            model.name,
            format_percent(model.accuracy),
            format_percent(model.precision),
            format_percent(model.recall),
            format_percent(model.f1_score)
        );
    }

    let home_data = &home.data;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Marketing News");
    if let Some(note) = origin_note(&home.origin) {
        let _ = writeln!(output, "{note}");
        let _ = writeln!(output);
    }
    if home_data.news.is_empty() {
        let _ = writeln!(output, "No news today.");
    }
    for item in &home_data.news {
        let _ = writeln!(output, "- [{}]({}) ({}, {})", item.title, item.url, item.source, item.category);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Trends");
    if home_data.trends.is_empty() {
        let _ = writeln!(output, "No trends reported.");
    }
    for trend in &home_data.trends {
        let _ = writeln!(
            output,
            "- {} {} (volume {})",
            trend.keyword,
            trend.growth,
            format_count(trend.volume)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Goals");
    let _ = writeln!(output, "- Daily: {}", home_data.goals.daily_goal);
    let _ = writeln!(output, "- Weekly: {}", home_data.goals.weekly_goal);
    let _ = writeln!(output, "- Monthly: {}", home_data.goals.monthly_goal);
    for item in &home_data.goals.checklist {
        let mark = if item.completed { "x" } else { " " };
        let _ = writeln!(output, "- [{mark}] {}", item.task);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## AI Feedback");
    if home_data.suggestions.is_empty() {
        let _ = writeln!(output, "No suggestions right now.");
    }
    for suggestion in &home_data.suggestions {
        let _ = writeln!(
            output,
            "- ({}) {}: {}",
            suggestion.priority.as_str(),
            suggestion.kind,
            suggestion.message
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FallbackData;

    #[test]
    fn report_lists_every_section() {
        let dashboard = ViewModel {
            data: DashboardData::fallback(),
            origin: Origin::Live,
        };
        let home = ViewModel {
            data: HomeData::fallback(),
            origin: Origin::Live,
        };
        let generated_at: DateTime<Utc> = "2024-01-15T12:00:00Z".parse().unwrap();
        let report = build_report(&dashboard, &home, generated_at);

        for heading in [
            "## Overview",
            "## Pipelines",
            "## Data Quality",
            "## AI Models",
            "## Marketing News",
            "## Trends",
            "## Goals",
            "## AI Feedback",
        ] {
            assert!(report.contains(heading), "missing {heading}");
        }
        assert!(report.contains("- Average quality score: 88.3%"));
        assert!(report.contains("| Data cleansing | running |"));
        assert!(report.contains("- [x] Draft post copy"));
        assert!(!report.contains("Sample data shown"));
    }

    #[test]
    fn report_flags_sample_data() {
        let dashboard = ViewModel {
            data: DashboardData::fallback(),
            origin: Origin::Fallback {
                reason: "timeout".to_string(),
            },
        };
        let home = ViewModel {
            data: HomeData::default(),
            origin: Origin::Failed {
                reason: "refused".to_string(),
            },
        };
        let report = build_report(&dashboard, &home, Utc::now());
        assert!(report.contains("> Sample data shown: timeout"));
        assert!(report.contains("> Data unavailable: refused"));
        assert!(report.contains("No news today."));
    }

    #[test]
    fn pipeline_names_cannot_break_the_table() {
        let mut data = DashboardData::fallback();
        data.pipelines.truncate(1);
        data.pipelines[0].name = "ingest | clean\nstage".to_string();
        let dashboard = ViewModel {
            data,
            origin: Origin::Live,
        };
        let home = ViewModel {
            data: HomeData::fallback(),
            origin: Origin::Live,
        };
        let report = build_report(&dashboard, &home, Utc::now());
        assert!(report.contains("| ingest \\| clean stage | completed |"));
    }
}
