use std::fmt::{Display, Write};

use chrono::TimeZone;
use clap::ValueEnum;

use crate::aggregator::{Origin, ViewModel};
use crate::format::{
    format_average, format_count, format_datetime, format_duration, format_percent,
    format_short_datetime,
};
use crate::models::{DashboardData, HomeData, Priority};
use crate::summary::OverviewSummary;

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Tab {
    #[default]
    Overview,
    Pipeline,
    Quality,
    Ai,
}

pub fn render_loading(view: &str) -> String {
    format!("Loading {view} data...\n")
}

fn write_banner(output: &mut String, origin: &Origin) {
    match origin {
        Origin::Live => {}
        Origin::Fallback { reason } => {
            let _ = writeln!(output, "[!] Live data unavailable, showing sample data ({reason})");
            let _ = writeln!(output);
        }
        Origin::Failed { reason } => {
            let _ = writeln!(output, "[x] Could not load data: {reason}");
            let _ = writeln!(output);
        }
    }
}

fn write_heading(output: &mut String, title: &str) {
    let _ = writeln!(output, "{title}");
    let _ = writeln!(output, "{}", "-".repeat(title.chars().count()));
}

fn bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "HIGH",
        Priority::Medium => "MEDIUM",
        Priority::Low => "LOW",
    }
}

pub fn render_dashboard<Tz>(view: &ViewModel<DashboardData>, tab: Tab, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut output = String::new();
    let _ = writeln!(output, "Data / AI Pipeline Dashboard");
    let _ = writeln!(output);
    write_banner(&mut output, &view.origin);

    let data = &view.data;
    match tab {
        Tab::Overview => {
            let summary = OverviewSummary::from_data(data);
            write_heading(&mut output, "Overview");
            let _ = writeln!(output, "Active pipelines:      {}", summary.active_pipelines);
            let _ = writeln!(
                output,
                "Average quality score: {}",
                format_average(summary.average_quality)
            );
            let _ = writeln!(
                output,
                "Average AI accuracy:   {}",
                format_average(summary.average_accuracy)
            );
            let _ = writeln!(output, "Urgent quality issues: {}", summary.urgent_issues);
        }
        Tab::Pipeline => {
            write_heading(&mut output, "Pipeline Status");
            if data.pipelines.is_empty() {
                let _ = writeln!(output, "No pipelines reported.");
            }
            for pipeline in &data.pipelines {
                let _ = writeln!(
                    output,
                    "[{:<9}] {}",
                    pipeline.status.as_str(),
                    pipeline.name
                );
                let _ = writeln!(
                    output,
                    "            last run {} | took {} | {} records",
                    format_datetime(&pipeline.last_run, tz),
                    format_duration(pipeline.duration),
                    format_count(pipeline.records_processed)
                );
            }
        }
        Tab::Quality => {
            write_heading(&mut output, "Quality Metrics");
            if data.metrics.is_empty() {
                let _ = writeln!(output, "No quality metrics reported.");
            }
            let name_width = data
                .metrics
                .iter()
                .map(|m| m.name.chars().count())
                .max()
                .unwrap_or(0);
            for metric in &data.metrics {
                let _ = writeln!(
                    output,
                    "{:<name_width$} {} {:>6} (threshold {}, {})",
                    metric.name,
                    bar(metric.value),
                    format_percent(metric.value),
                    format_percent(metric.threshold),
                    metric.status.as_str()
                );
            }

            let _ = writeln!(output);
            write_heading(&mut output, "Quality Issues");
            if data.issues.is_empty() {
                let _ = writeln!(output, "No quality issues reported.");
            }
            for issue in &data.issues {
                let _ = writeln!(output, "[{}] {}", issue.severity.as_str(), issue.category);
                let _ = writeln!(output, "    {}", issue.description);
                let _ = writeln!(
                    output,
                    "    affected records: {}",
                    format_count(issue.affected_records)
                );
                let _ = writeln!(output, "    recommendation: {}", issue.recommendation);
            }
        }
        Tab::Ai => {
            write_heading(&mut output, "AI Model Performance");
            if data.models.is_empty() {
                let _ = writeln!(output, "No models reported.");
            }
            for model in &data.models {
                let _ = writeln!(output, "{}", model.name);
                for (label, score) in [
                    ("accuracy ", model.accuracy),
                    ("precision", model.precision),
                    ("recall   ", model.recall),
                ] {
                    let _ = writeln!(output, "  {label} {} {:>6}", bar(score), format_percent(score));
                }
                let _ = writeln!(output, "  f1 score  {}", format_percent(model.f1_score));
                let _ = writeln!(
                    output,
                    "  last trained {}",
                    format_datetime(&model.last_trained, tz)
                );
            }
        }
    }

    output
}

pub fn render_home<Tz>(view: &ViewModel<HomeData>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut output = String::new();
    let _ = writeln!(output, "Mr. Mark Marketing Mastery Dashboard");
    let _ = writeln!(output);
    write_banner(&mut output, &view.origin);

    let data = &view.data;

    write_heading(&mut output, "Today's Marketing News");
    if data.news.is_empty() {
        let _ = writeln!(output, "No news today.");
    }
    for item in &data.news {
        let _ = writeln!(output, "[{}] {} ({})", item.category, item.title, item.source);
        let _ = writeln!(output, "    {}", item.summary);
        let _ = writeln!(
            output,
            "    {} | {}",
            format_short_datetime(&item.published_at, tz),
            item.url
        );
    }

    let _ = writeln!(output);
    write_heading(&mut output, "Live Marketing Trends");
    if data.trends.is_empty() {
        let _ = writeln!(output, "No trends reported.");
    }
    for trend in &data.trends {
        let _ = writeln!(
            output,
            "{} {} | search volume {} | {}",
            trend.keyword,
            trend.growth,
            format_count(trend.volume),
            trend.url
        );
    }

    let _ = writeln!(output);
    write_heading(&mut output, "Goals");
    let _ = writeln!(output, "Daily:   {}", data.goals.daily_goal);
    let _ = writeln!(output, "Weekly:  {}", data.goals.weekly_goal);
    let _ = writeln!(output, "Monthly: {}", data.goals.monthly_goal);

    let _ = writeln!(output);
    write_heading(&mut output, "Checklist");
    if data.goals.checklist.is_empty() {
        let _ = writeln!(output, "Nothing on the checklist.");
    }
    for item in &data.goals.checklist {
        let mark = if item.completed { "[x]" } else { "[ ]" };
        let _ = writeln!(output, "{mark} {}", item.task);
    }

    let _ = writeln!(output);
    write_heading(&mut output, "AI Marketing Feedback");
    if data.suggestions.is_empty() {
        let _ = writeln!(output, "No suggestions right now.");
    }
    for suggestion in &data.suggestions {
        let _ = writeln!(
            output,
            "[{}] {}: {}",
            priority_label(suggestion.priority),
            suggestion.kind,
            suggestion.message
        );
    }

    output
}
