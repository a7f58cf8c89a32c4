//! Stub backend for exercising the client against real HTTP.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::config::Settings;

pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub backend address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub backend crashed");
    });
    format!("http://{addr}")
}

pub fn client_for(base: &str) -> ApiClient {
    let settings = Settings::with_base_url(base).expect("valid stub url");
    ApiClient::new(&settings).expect("http client")
}

fn bodies() -> Vec<(&'static str, Value)> {
    vec![
        (
            "/pipeline/status",
            json!({"pipelines": [
                {"name": "collect", "status": "completed", "lastRun": "2024-01-15T10:30:00Z", "duration": 120, "recordsProcessed": 1500},
                {"name": "clean", "status": "running", "lastRun": "2024-01-15T10:35:00Z", "duration": 45, "recordsProcessed": 1200}
            ]}),
        ),
        (
            "/quality/metrics",
            json!({"metrics": [
                {"name": "completeness", "value": 0.5, "threshold": 0.9, "status": "critical"}
            ]}),
        ),
        ("/ai/performance", json!({"models": []})),
        (
            "/quality/issues",
            json!({"issues": [
                {"severity": "high", "category": "posts_accuracy", "description": "accuracy below threshold", "affectedRecords": 150, "recommendation": "validate formats"}
            ]}),
        ),
        (
            "/feed/today",
            json!({"news": [
                {"id": 7, "title": "Live headline", "summary": "s", "source": "wire", "url": "https://example.com/7", "published_at": "2024-01-15T10:30:00Z", "category": "trend"}
            ]}),
        ),
        (
            "/trend",
            json!({"trends": [
                {"keyword": "short video", "volume": 12000, "growth": "+12%", "url": "https://example.com/t"}
            ]}),
        ),
        (
            "/goal",
            json!({
                "daily_goal": "publish two posts",
                "weekly_goal": "grow reach",
                "monthly_goal": "launch campaign",
                "checklist": [
                    {"task": "draft copy", "completed": true},
                    {"task": "schedule posts", "completed": false}
                ]
            }),
        ),
        ("/ai/feedback", json!({})),
    ]
}

/// Every endpoint with a small live payload.
pub fn stub_backend() -> Router {
    stub_backend_except(&[])
}

/// Every endpoint except `skipped`, which then answer 404.
pub fn stub_backend_except(skipped: &[&str]) -> Router {
    bodies()
        .into_iter()
        .filter(|(path, _)| !skipped.contains(path))
        .fold(Router::new(), |router, (path, body)| {
            router.route(path, get(move || async move { Json(body) }))
        })
}
