//! Prometheus metrics for the invitation API.
//!
//! Requests are counted per route label (see `request::spans`). Subscribe
//! calls are also counted per outcome.

use std::sync::OnceLock;

use invites_app::domain::invites::{InvitesServiceError, SubscribeOutcome};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// How a subscribe call ended, as counted on `/metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubscriptionResult {
    /// Stored and mailed
    Subscribed,

    /// Already on the list
    AlreadyRegistered,

    /// Rejected before storage
    InvalidEmail,

    /// Stored, but the confirmation mail was not accepted
    MailFailed,

    /// Storage or other server-side failure
    Failed,
}

impl SubscriptionResult {
    pub(crate) fn of(result: &Result<SubscribeOutcome, InvitesServiceError>) -> Self {
        match result {
            Ok(SubscribeOutcome::Subscribed { .. }) => Self::Subscribed,
            Ok(SubscribeOutcome::AlreadyRegistered) | Err(InvitesServiceError::AlreadyExists) => {
                Self::AlreadyRegistered
            }
            Err(InvitesServiceError::InvalidEmail | InvitesServiceError::InvalidData) => {
                Self::InvalidEmail
            }
            Err(InvitesServiceError::Mail(_)) => Self::MailFailed,
            Err(InvitesServiceError::Sql(_)) => Self::Failed,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Subscribed => "subscribed",
            Self::AlreadyRegistered => "already_registered",
            Self::InvalidEmail => "invalid_email",
            Self::MailFailed => "mail_failed",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug)]
struct InvitesMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    subscriptions_total: IntCounterVec,
}

static INVITES_METRICS: OnceLock<Option<InvitesMetrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let Some(metrics) = metrics() else {
            return Self { tracked: false };
        };

        metrics.requests_in_flight.inc();

        Self { tracked: true }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

/// Records one finished request against its route label.
pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class(status_code)])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Counts one subscribe call.
pub(crate) fn record_subscription(result: SubscriptionResult) {
    if let Some(metrics) = metrics() {
        metrics
            .subscriptions_total
            .with_label_values(&[result.label()])
            .inc();
    }
}

#[cfg(test)]
pub(crate) fn subscription_count(result: SubscriptionResult) -> u64 {
    metrics().map_or(0, |metrics| {
        metrics
            .subscriptions_total
            .with_label_values(&[result.label()])
            .get()
    })
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(String::from_utf8_lossy(&encoded).into_owned());
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn metrics() -> Option<&'static InvitesMetrics> {
    INVITES_METRICS.get_or_init(build_metrics).as_ref()
}

fn register<M>(registry: &Registry, name: &str, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = metric
        .inspect_err(|source| error!(metric = name, "failed to create metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(metric.clone()))
        .inspect_err(|source| error!(metric = name, "failed to register metric: {source}"))
        .ok()?;

    Some(metric)
}

fn build_metrics() -> Option<InvitesMetrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        "requests_total",
        IntCounterVec::new(
            Opts::new(
                "invites_json_http_requests_total",
                "HTTP requests by method, route and status class.",
            ),
            &["method", "route", "status_class"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        "request_duration_seconds",
        HistogramVec::new(
            HistogramOpts::new(
                "invites_json_http_request_duration_seconds",
                "HTTP request duration in seconds by method and route.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        "requests_in_flight",
        IntGauge::with_opts(Opts::new(
            "invites_json_http_requests_in_flight",
            "HTTP requests currently being served.",
        )),
    )?;

    let subscriptions_total = register(
        &registry,
        "subscriptions_total",
        IntCounterVec::new(
            Opts::new(
                "invites_json_subscriptions_total",
                "Subscribe calls by outcome.",
            ),
            &["outcome"],
        ),
    )?;

    Some(InvitesMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        subscriptions_total,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use invites_app::mail::MailError;
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn metrics_endpoint_exposes_routes_and_subscription_outcomes() -> TestResult {
        observe_request("GET", "/api/public/invite", 200, 0.042);
        observe_request("POST", "/api/public/subscribe", 502, 0.123);
        record_subscription(SubscriptionResult::MailFailed);

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let response = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await?;

        assert!(
            response.contains(r#"route="/api/public/subscribe""#),
            "expected subscribe route label in response"
        );
        assert!(
            response.contains(r#"status_class="5xx""#),
            "expected status class label in response"
        );
        assert!(
            response.contains(r#"invites_json_subscriptions_total{outcome="mail_failed"}"#),
            "expected mail failure counter in response"
        );
        assert!(
            response.contains("invites_json_http_requests_in_flight"),
            "expected in-flight gauge in response"
        );

        Ok(())
    }

    #[test]
    fn record_subscription_increments_its_outcome() {
        let before = subscription_count(SubscriptionResult::AlreadyRegistered);

        record_subscription(SubscriptionResult::AlreadyRegistered);

        assert!(
            subscription_count(SubscriptionResult::AlreadyRegistered) > before,
            "already_registered counter did not move"
        );
    }

    #[test]
    fn service_results_map_to_outcomes() {
        let subscribed = Ok(SubscribeOutcome::Subscribed {
            invite_id: 1,
            mail_id: "<id@example.com>".to_string(),
        });
        let mail_failed = Err(InvitesServiceError::Mail(MailError::SendFailed(
            "relay refused".to_string(),
        )));

        assert_eq!(SubscriptionResult::of(&subscribed), SubscriptionResult::Subscribed);
        assert_eq!(
            SubscriptionResult::of(&Ok(SubscribeOutcome::AlreadyRegistered)),
            SubscriptionResult::AlreadyRegistered
        );
        assert_eq!(
            SubscriptionResult::of(&Err(InvitesServiceError::InvalidEmail)),
            SubscriptionResult::InvalidEmail
        );
        assert_eq!(SubscriptionResult::of(&mail_failed), SubscriptionResult::MailFailed);
    }

    #[test]
    fn status_codes_map_to_classes() {
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(403), "4xx");
        assert_eq!(status_class(502), "5xx");
        assert_eq!(status_class(42), "other");
    }
}
