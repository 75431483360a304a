//! Webhook delivery.
//!
//! The orchestrator only needs "send this payload once"; [`Transport`] is that seam.
//! [`WebhookTransport`] is the real HTTP implementation.

use async_trait::async_trait;
use reqwest::Url;

use leadform_common::OutboundPayload;

use crate::errors::TransportError;

/// What the sink answered. Reported for logging only; callers do not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportReceipt {
    pub status: u16,
}

/// Abstraction over payload delivery for testability.
/// Real implementation: `WebhookTransport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(&self, payload: &OutboundPayload) -> Result<TransportReceipt, TransportError>;
}

/// POSTs the payload as JSON to a fixed endpoint, without authentication.
#[derive(Debug, Clone)]
pub struct WebhookTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl WebhookTransport {
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: parse_endpoint(endpoint)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Parse and check a webhook endpoint URL.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, TransportError> {
    let url = Url::parse(endpoint).map_err(|e| TransportError::InvalidEndpoint {
        url: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(TransportError::UnsupportedScheme {
            url: endpoint.to_string(),
        }),
    }
}

#[async_trait]
impl Transport for WebhookTransport {
    async fn deliver(&self, payload: &OutboundPayload) -> Result<TransportReceipt, TransportError> {
        // No timeout: a dead endpoint holds the submission until the connection settles.
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TransportError::Unavailable(e.to_string())
                } else {
                    TransportError::Request(e)
                }
            })?;

        Ok(TransportReceipt {
            status: response.status().as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use chrono::{TimeZone, Utc};
    use leadform_common::{FormSnapshot, PageData, PayloadMetadata, TrackingSnapshot};
    use std::collections::BTreeMap;
    use tokio::sync::mpsc;

    fn payload() -> OutboundPayload {
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        OutboundPayload {
            timestamp: ts,
            form: FormSnapshot {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                phone: "+55 (11) 98765-4321".into(),
                phone_raw: "5511987654321".into(),
                accepted_policy: true,
            },
            tracking: TrackingSnapshot {
                utm: BTreeMap::new(),
                url_params: BTreeMap::new(),
                page: PageData {
                    url: "https://lp.example.com/".into(),
                    pathname: "/".into(),
                    hostname: "lp.example.com".into(),
                    referrer: None,
                    title: "Fast Friday".into(),
                    timestamp: ts,
                    user_agent: "test".into(),
                    language: "pt-BR".into(),
                    screen_resolution: "1920x1080".into(),
                    viewport: "1280x720".into(),
                },
            },
            metadata: PayloadMetadata {
                form_id: "fast-friday-whatsapp-group".into(),
                form_version: "1.0".into(),
                source: "landing-page".into(),
            },
        }
    }

    type Captured = (Option<String>, serde_json::Value);

    /// Spawn a webhook stub on an ephemeral port that forwards each request body.
    async fn spawn_webhook(status: StatusCode) -> (String, mpsc::UnboundedReceiver<Captured>) {
        let (tx, rx) = mpsc::unbounded_channel::<Captured>();
        let app = Router::new()
            .route(
                "/webhook/lp",
                post(
                    move |State(tx): State<mpsc::UnboundedSender<Captured>>,
                          headers: HeaderMap,
                          body: String| async move {
                        let content_type = headers
                            .get("content-type")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        let json = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
                        let _ = tx.send((content_type, json));
                        status
                    },
                ),
            )
            .with_state(tx);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/webhook/lp", addr), rx)
    }

    #[test]
    fn test_parse_endpoint_accepts_http_and_https() {
        assert!(parse_endpoint("https://hooks.example.com/webhook/lp").is_ok());
        assert!(parse_endpoint("http://127.0.0.1:8080/hook").is_ok());
    }

    #[test]
    fn test_webhook_transport_keeps_parsed_endpoint() {
        let transport = WebhookTransport::new("https://hooks.example.com/webhook/lp?x=1").unwrap();
        assert_eq!(transport.endpoint().host_str(), Some("hooks.example.com"));
        assert_eq!(transport.endpoint().path(), "/webhook/lp");
    }

    #[test]
    fn test_parse_endpoint_rejects_bad_urls() {
        assert!(matches!(
            parse_endpoint("hooks.example.com"),
            Err(TransportError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            parse_endpoint("ftp://hooks.example.com/x"),
            Err(TransportError::UnsupportedScheme { .. })
        ));
    }

    #[tokio::test]
    async fn test_deliver_posts_json_payload() {
        let (endpoint, mut rx) = spawn_webhook(StatusCode::OK).await;
        let transport = WebhookTransport::new(&endpoint).unwrap();

        let receipt = transport.deliver(&payload()).await.unwrap();
        assert_eq!(receipt.status, 200);

        let (content_type, body) = rx.recv().await.unwrap();
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body["form"]["phoneRaw"], "5511987654321");
        assert_eq!(body["metadata"]["formId"], "fast-friday-whatsapp-group");
        assert_eq!(body["timestamp"], "2026-10-19T09:00:00.000Z");
    }

    #[tokio::test]
    async fn test_deliver_reports_error_status_without_failing() {
        let (endpoint, _rx) = spawn_webhook(StatusCode::INTERNAL_SERVER_ERROR).await;
        let transport = WebhookTransport::new(&endpoint).unwrap();

        let receipt = transport.deliver(&payload()).await.unwrap();
        assert_eq!(receipt.status, 500);
    }

    #[tokio::test]
    async fn test_deliver_to_closed_port_is_unavailable() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = WebhookTransport::new(&format!("http://{}/hook", addr)).unwrap();
        let err = transport.deliver(&payload()).await.unwrap_err();
        assert!(matches!(err, TransportError::Unavailable(_)));
    }
}
