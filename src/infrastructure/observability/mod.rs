//! Observability infrastructure - Metrics

mod config;
mod metrics;

pub use self::config::MetricsConfig;
pub use self::metrics::{
    create_metrics_router, init_metrics, metric_path, record_http_request, record_prediction,
    record_prediction_rejected, PrometheusMetrics,
};
