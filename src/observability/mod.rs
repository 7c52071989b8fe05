//! 可观测性模块
//!
//! 提供 Prometheus 指标、结构化日志和健康检查。

use axum::{Json, Router, response::IntoResponse, routing::get};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::Mutex;

// ===== Simple Metrics (using atomics for zero-dep implementation) =====

/// 简单应用指标
#[derive(Clone, Default)]
pub struct AppMetrics {
    pub http_requests_total: Arc<AtomicU64>,
    pub http_request_duration_sum: Arc<AtomicU64>,
    pub active_connections: Arc<AtomicUsize>,
    pub sessions_active: Arc<AtomicUsize>,
    pub messages_total: Arc<AtomicU64>,
    pub replies_total: Arc<AtomicU64>,
    pub emergencies_total: Arc<AtomicU64>,
    pub fallbacks_total: Arc<AtomicU64>,
    pub ws_connections: Arc<AtomicUsize>,
    pub errors_total: Arc<AtomicU64>,
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self, duration_ms: u64) {
        self.http_requests_total.fetch_add(1, Ordering::SeqCst);
        self.http_request_duration_sum
            .fetch_add(duration_ms, Ordering::SeqCst);
    }

    /// 记录活跃连接
    pub fn record_connection(&self, delta: isize) {
        self.active_connections
            .fetch_add(delta as usize, Ordering::SeqCst);
    }

    /// 记录活跃会话变化
    pub fn record_session(&self, delta: isize) {
        self.sessions_active
            .fetch_add(delta as usize, Ordering::SeqCst);
    }

    /// 记录收到的用户消息
    pub fn record_message(&self) {
        self.messages_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录已送达的辅导回复
    pub fn record_reply(&self) {
        self.replies_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录紧急模式触发
    pub fn record_emergency(&self) {
        self.emergencies_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录未分类消息（走兜底回复）
    pub fn record_fallback(&self) {
        self.fallbacks_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录 WebSocket 连接变化
    pub fn record_ws_connection(&self, delta: isize) {
        self.ws_connections.fetch_add(delta as usize, Ordering::SeqCst);
    }

    /// 记录错误
    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP http_request_duration_seconds HTTP request duration in seconds
# TYPE http_request_duration_seconds histogram
http_request_duration_seconds_sum {}
http_request_duration_seconds_count {}
# HELP active_connections Active HTTP connections
# TYPE active_connections gauge
active_connections {}
# HELP sessions_active Active chat sessions
# TYPE sessions_active gauge
sessions_active {}
# HELP messages_total Total user messages received
# TYPE messages_total counter
messages_total {}
# HELP replies_total Total counselor replies delivered
# TYPE replies_total counter
replies_total {}
# HELP emergencies_total Total emergency-mode activations
# TYPE emergencies_total counter
emergencies_total {}
# HELP fallbacks_total Total unclassified messages answered with a fallback
# TYPE fallbacks_total counter
fallbacks_total {}
# HELP ws_connections Active WebSocket connections
# TYPE ws_connections gauge
ws_connections {}
# HELP errors_total Total errors
# TYPE errors_total counter
errors_total {}
"#,
            self.http_requests_total.load(Ordering::SeqCst),
            self.http_request_duration_sum.load(Ordering::SeqCst) as f64 / 1000.0,
            self.http_requests_total.load(Ordering::SeqCst),
            self.active_connections.load(Ordering::SeqCst),
            self.sessions_active.load(Ordering::SeqCst),
            self.messages_total.load(Ordering::SeqCst),
            self.replies_total.load(Ordering::SeqCst),
            self.emergencies_total.load(Ordering::SeqCst),
            self.fallbacks_total.load(Ordering::SeqCst),
            self.ws_connections.load(Ordering::SeqCst),
            self.errors_total.load(Ordering::SeqCst),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
}

/// 健康检查结果
#[derive(Clone)]
pub struct HealthCheckResult {
    pub name: String,
    pub healthy: bool,
    pub message: String,
    pub latency_ms: u64,
}

/// 应用状态（用于健康检查）
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub health_checks: Arc<Mutex<Vec<HealthCheckResult>>>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String) -> Self {
        let metrics = Arc::new(AppMetrics::default());

        Self {
            metrics,
            health_checks: Arc::new(Mutex::new(Vec::new())),
            start_time: Utc::now(),
            version,
        }
    }

    /// 添加健康检查结果
    pub async fn add_health_check(&self, result: HealthCheckResult) {
        let mut checks = self.health_checks.lock().await;
        checks.push(result);
        if checks.len() > 10 {
            checks.remove(0);
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(
    state: axum::extract::State<Arc<ObservabilityState>>,
) -> impl IntoResponse {
    let checks = state.health_checks.lock().await;
    let all_healthy = checks.iter().all(|c| c.healthy);

    let health_status = HealthStatus {
        status: if all_healthy {
            "healthy".to_string()
        } else {
            "unhealthy".to_string()
        },
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks: checks
            .iter()
            .map(|c| HealthCheck {
                name: c.name.clone(),
                status: if c.healthy {
                    "healthy".to_string()
                } else {
                    "unhealthy".to_string()
                },
                message: Some(c.message.clone()),
                latency_ms: Some(c.latency_ms),
            })
            .collect(),
    };

    let status_code = if all_healthy {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查
pub async fn readiness(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = state.health_checks.lock().await;
    let all_healthy = checks.iter().all(|c| c.healthy);

    if all_healthy {
        (axum::http::StatusCode::OK, "Ready")
    } else {
        (axum::http::StatusCode::SERVICE_UNAVAILABLE, "Not Ready")
    }
}

/// Prometheus 指标端点
pub async fn metrics(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let output = state.metrics.gather();
    (axum::http::StatusCode::OK, output)
}

/// 版本信息端点
pub async fn version(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志
pub fn init_tracing(service_name: &str) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| format!("info,{}", service_name));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

// ===== Request Metrics Middleware =====

/// 记录请求指标的中间件
pub async fn metrics_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
    state: Arc<ObservabilityState>,
) -> Result<axum::response::Response, std::convert::Infallible> {
    let start = std::time::Instant::now();

    state.metrics.record_connection(1);

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    state.metrics.record_http_request(duration_ms);
    state.metrics.record_connection(-1);

    Ok(response)
}
