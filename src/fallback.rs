//! Static sample payloads shown when a view's live fetch fails.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
    AiModelPerformance, AiSuggestion, ChecklistItem, DashboardData, DataQualityIssue, Goals,
    HomeData, MetricStatus, NewsItem, PipelineState, PipelineStatus, Priority, QualityMetric,
    Severity, TrendItem,
};

/// Complete placeholder data for one view.
pub trait FallbackData: Default {
    fn fallback() -> Self;
}

impl FallbackData for DashboardData {
    fn fallback() -> Self {
        DashboardData {
            pipelines: sample_pipelines(),
            metrics: sample_metrics(),
            models: sample_models(),
            issues: sample_issues(),
        }
    }
}

impl FallbackData for HomeData {
    fn fallback() -> Self {
        HomeData {
            news: sample_news(),
            trends: sample_trends(),
            goals: sample_goals(),
            suggestions: sample_suggestions(),
        }
    }
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

pub fn sample_pipelines() -> Vec<PipelineStatus> {
    vec![
        PipelineStatus {
            name: "SNS data collection".to_string(),
            status: PipelineState::Completed,
            last_run: at(10, 30),
            duration: 120,
            records_processed: 1500,
        },
        PipelineStatus {
            name: "Data cleansing".to_string(),
            status: PipelineState::Running,
            last_run: at(10, 35),
            duration: 45,
            records_processed: 1200,
        },
        PipelineStatus {
            name: "AI model training".to_string(),
            status: PipelineState::Completed,
            last_run: at(9, 0),
            duration: 1800,
            records_processed: 800,
        },
    ]
}

pub fn sample_metrics() -> Vec<QualityMetric> {
    let metric = |name: &str, value: f64, threshold: f64, status: MetricStatus| QualityMetric {
        name: name.to_string(),
        value,
        threshold,
        status,
    };

    vec![
        metric("Completeness", 0.95, 0.9, MetricStatus::Good),
        metric("Accuracy", 0.88, 0.9, MetricStatus::Warning),
        metric("Consistency", 0.92, 0.85, MetricStatus::Good),
        metric("Freshness", 0.78, 0.8, MetricStatus::Warning),
    ]
}

pub fn sample_models() -> Vec<AiModelPerformance> {
    vec![
        AiModelPerformance {
            name: "Engagement forecast".to_string(),
            accuracy: 0.85,
            precision: 0.82,
            recall: 0.88,
            f1_score: 0.85,
            last_trained: at(9, 0),
        },
        AiModelPerformance {
            name: "Trend forecast".to_string(),
            accuracy: 0.78,
            precision: 0.75,
            recall: 0.80,
            f1_score: 0.77,
            last_trained: at(8, 30),
        },
    ]
}

pub fn sample_issues() -> Vec<DataQualityIssue> {
    vec![DataQualityIssue {
        severity: Severity::Medium,
        category: "posts_accuracy".to_string(),
        description: "Accuracy of the posts table is below its threshold".to_string(),
        affected_records: 150,
        recommendation: "Tighten data format validation".to_string(),
    }]
}

pub fn sample_news() -> Vec<NewsItem> {
    vec![NewsItem {
        id: 1,
        title: "2024 digital marketing trends: AI and personalization lead".to_string(),
        summary: "AI-driven personalized marketing is emerging as the key trend of 2024."
            .to_string(),
        source: "Marketing Insight".to_string(),
        url: "https://www.marketinginsight.co.kr/2024-digital-marketing-trends".to_string(),
        published_at: at(10, 30),
        category: "Trend".to_string(),
    }]
}

pub fn sample_trends() -> Vec<TrendItem> {
    let trend = |keyword: &str, volume: u64, growth: &str, slug: &str| TrendItem {
        keyword: keyword.to_string(),
        volume,
        growth: growth.to_string(),
        url: format!("https://trends.google.com/trends/explore?q={slug}"),
    };

    vec![
        trend("SNS marketing", 24000, "+12%", "sns+marketing"),
        trend("AI automation", 18500, "+35%", "ai+automation"),
        trend("Viral campaign", 9200, "+8%", "viral+campaign"),
    ]
}

pub fn sample_goals() -> Goals {
    let task = |task: &str, completed: bool| ChecklistItem {
        task: task.to_string(),
        completed,
    };

    Goals {
        daily_goal: "30k+ views, 10+ reposts, 30+ comments".to_string(),
        weekly_goal: "Publish five short-form videos".to_string(),
        monthly_goal: "Grow followers by 10%".to_string(),
        checklist: vec![
            task("Review today's marketing news", true),
            task("Draft post copy", true),
            task("Schedule SNS posts", false),
            task("Check campaign performance", false),
        ],
    }
}

pub fn sample_suggestions() -> Vec<AiSuggestion> {
    let suggestion = |kind: &str, message: &str, priority: Priority| AiSuggestion {
        kind: kind.to_string(),
        message: message.to_string(),
        priority,
    };

    vec![
        suggestion(
            "Content",
            "Short videos are outperforming images this week; shift two posts to reels.",
            Priority::High,
        ),
        suggestion(
            "Timing",
            "Engagement peaks between 19:00 and 21:00; move scheduled posts.",
            Priority::Medium,
        ),
        suggestion(
            "Hashtags",
            "Trim hashtags to the five best performers.",
            Priority::Low,
        ),
    ]
}
