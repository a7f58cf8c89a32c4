use std::collections::HashSet;
use std::fmt;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::models::{
    AiModelPerformance, AiSuggestion, DashboardData, DataQualityIssue, Goals, HomeData, NewsItem,
    PipelineStatus, QualityMetric, TrendItem,
};

/// One logical unit of dashboard data, backed by one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    PipelineStatus,
    QualityMetrics,
    ModelPerformance,
    QualityIssues,
    NewsFeed,
    Trends,
    Goals,
    AiFeedback,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::PipelineStatus => "/pipeline/status",
            Resource::QualityMetrics => "/quality/metrics",
            Resource::ModelPerformance => "/ai/performance",
            Resource::QualityIssues => "/quality/issues",
            Resource::NewsFeed => "/feed/today",
            Resource::Trends => "/trend",
            Resource::Goals => "/goal",
            Resource::AiFeedback => "/ai/feedback",
        }
    }

    /// Response field holding the payload. `None` means the whole body.
    pub fn field(self) -> Option<&'static str> {
        match self {
            Resource::PipelineStatus => Some("pipelines"),
            Resource::QualityMetrics => Some("metrics"),
            Resource::ModelPerformance => Some("models"),
            Resource::QualityIssues => Some("issues"),
            Resource::NewsFeed => Some("news"),
            Resource::Trends => Some("trends"),
            Resource::Goals => None,
            Resource::AiFeedback => Some("suggestions"),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {resource} failed: {source}")]
    Transport {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },
    #[error("{resource} answered with HTTP {status}")]
    Status { resource: Resource, status: StatusCode },
    #[error("{resource} returned an unexpected body: {source}")]
    Decode {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
    #[error("fetch batch was cancelled")]
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("mark-dashboard/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: settings.base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, resource: Resource) -> String {
        format!("{}{}", self.base_url, resource.path())
    }

    async fn get_json(&self, resource: Resource) -> Result<Value, FetchError> {
        let url = self.url_for(resource);
        debug!(%url, "fetching resource");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { resource, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { resource, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { resource, source })?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { resource, source })
    }

    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        resource: Resource,
    ) -> Result<Vec<T>, FetchError> {
        let body = self.get_json(resource).await?;
        extract_list(resource, body)
    }

    pub async fn fetch_goals(&self) -> Result<Goals, FetchError> {
        let body = self.get_json(Resource::Goals).await?;
        serde_json::from_value(body).map_err(|source| FetchError::Decode {
            resource: Resource::Goals,
            source,
        })
    }

    /// Requests the four dashboard resources together. Any failure fails the batch.
    pub async fn fetch_dashboard(&self) -> Result<DashboardData, FetchError> {
        let (pipelines, metrics, models, issues) = tokio::try_join!(
            self.fetch_list::<PipelineStatus>(Resource::PipelineStatus),
            self.fetch_list::<QualityMetric>(Resource::QualityMetrics),
            self.fetch_list::<AiModelPerformance>(Resource::ModelPerformance),
            self.fetch_list::<DataQualityIssue>(Resource::QualityIssues),
        )?;

        Ok(DashboardData {
            pipelines,
            metrics,
            models,
            issues,
        })
    }

    /// Requests the four home resources together. Any failure fails the batch.
    pub async fn fetch_home(&self) -> Result<HomeData, FetchError> {
        let (news, trends, goals, suggestions) = tokio::try_join!(
            self.fetch_list::<NewsItem>(Resource::NewsFeed),
            self.fetch_list::<TrendItem>(Resource::Trends),
            self.fetch_goals(),
            self.fetch_list::<AiSuggestion>(Resource::AiFeedback),
        )?;

        Ok(HomeData {
            news: dedupe_news(news),
            trends,
            goals,
            suggestions,
        })
    }
}

/// Missing or null fields become an empty list.
fn extract_list<T: DeserializeOwned>(resource: Resource, mut body: Value) -> Result<Vec<T>, FetchError> {
    let field = resource.field().unwrap_or_default();
    match body.get_mut(field).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => {
            serde_json::from_value(value).map_err(|source| FetchError::Decode { resource, source })
        }
    }
}

/// Keeps the first item for each id.
pub fn dedupe_news(news: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    let total = news.len();
    let unique: Vec<NewsItem> = news.into_iter().filter(|item| seen.insert(item.id)).collect();
    if unique.len() != total {
        warn!(dropped = total - unique.len(), "news feed repeated item ids");
    }
    unique
}
