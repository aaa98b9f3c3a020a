use crate::config::toml_config::{GatewayConfig, TransportStrategy};
use crate::core::response::{is_domain_rejection, parse_gateway_response};
use crate::domain::model::{
    format_calendar_date, BookingIntent, BookingOutcome, FailureReason, GatewayPayload,
    AMBIGUOUS_RESPONSE_MESSAGE, DOMAIN_REJECTED_MESSAGE, TRANSPORT_FAILURE_MESSAGE,
};
use crate::domain::ports::BookingGatewayClient;
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Booking engine client over HTTP. The transport is fixed per instance by
/// `GatewayConfig::transport`.
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        if config.transport == TransportStrategy::Stub {
            return Err(BookingError::ConfigError {
                message: "stub transport has no HTTP client".to_string(),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn payload(&self, intent: &BookingIntent) -> GatewayPayload {
        GatewayPayload {
            propid: self.config.property_id,
            fromdate: format_calendar_date(intent.check_in),
            todate: format_calendar_date(intent.check_out),
            noofrooms: intent.room_count,
            apikey: self.config.access_key.clone(),
        }
    }

    async fn try_submit(&self, intent: &BookingIntent) -> Result<BookingOutcome> {
        let payload = self.payload(intent);

        let request = self.client.post(&self.config.endpoint);
        let request = match self.config.transport {
            TransportStrategy::JsonPost => request.json(&payload),
            TransportStrategy::FormPost => request.form(&payload),
            TransportStrategy::DispatchForm => {
                // 對方只收一個 apikey 欄位，值是整包 JSON
                let encoded = serde_json::to_string(&payload)?;
                request.form(&[("apikey", encoded)])
            }
            TransportStrategy::Stub => {
                return Err(BookingError::ConfigError {
                    message: "stub transport has no HTTP client".to_string(),
                })
            }
        };

        tracing::debug!(
            "📡 {:?} to {}: propid={} {} -> {} rooms={}",
            self.config.transport,
            self.config.endpoint,
            payload.propid,
            payload.fromdate,
            payload.todate,
            payload.noofrooms
        );

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 Booking engine response status: {}", status);

        if self.config.transport == TransportStrategy::DispatchForm {
            return Ok(BookingOutcome::Dispatched);
        }

        if !status.is_success() {
            // 401/403 之類的回應仍可能是網域被拒，先看內容
            let body = response.text().await.unwrap_or_default();
            if is_domain_rejection(&body) {
                tracing::warn!("⛔ Booking engine rejected this domain (HTTP {})", status);
                return Err(BookingError::GatewayRejected { message: body });
            }
            return Err(BookingError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(parse_gateway_response(
            &body,
            self.config.on_ambiguous_response,
        ))
    }
}

#[async_trait]
impl BookingGatewayClient for HttpGateway {
    async fn submit(&self, intent: &BookingIntent) -> BookingOutcome {
        match self.try_submit(intent).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("❌ Booking engine call failed: {}", e);
                outcome_for_error(&e)
            }
        }
    }
}

/// Maps a submission error onto the outcome reported to the guest.
pub fn outcome_for_error(err: &BookingError) -> BookingOutcome {
    match err {
        BookingError::HttpStatus { status } => BookingOutcome::failed(
            FailureReason::HttpStatus { status: *status },
            TRANSPORT_FAILURE_MESSAGE,
        ),
        BookingError::GatewayRejected { .. } => {
            BookingOutcome::failed(FailureReason::DomainRejected, DOMAIN_REJECTED_MESSAGE)
        }
        BookingError::AmbiguousResponse => {
            BookingOutcome::failed(FailureReason::Ambiguous, AMBIGUOUS_RESPONSE_MESSAGE)
        }
        _ => BookingOutcome::failed(FailureReason::Transport, TRANSPORT_FAILURE_MESSAGE),
    }
}

/// The error a failed outcome stands for, used for exit codes and logs.
pub fn error_for_outcome(outcome: &BookingOutcome) -> Option<BookingError> {
    match outcome {
        BookingOutcome::Failed { reason, message } => Some(match reason {
            FailureReason::HttpStatus { status } => BookingError::HttpStatus { status: *status },
            FailureReason::DomainRejected => BookingError::GatewayRejected {
                message: message.clone(),
            },
            FailureReason::Ambiguous => BookingError::AmbiguousResponse,
            FailureReason::Transport => BookingError::Unreachable {
                message: message.clone(),
            },
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::response::AmbiguousResponsePolicy;
    use crate::domain::model::parse_calendar_date;

    fn config(transport: TransportStrategy) -> GatewayConfig {
        GatewayConfig {
            endpoint: "https://bookings.example.com/bookapi".to_string(),
            property_id: 4021,
            access_key: "secret-key".to_string(),
            transport,
            on_ambiguous_response: AmbiguousResponsePolicy::AssumeSuccess,
            timeout_seconds: Some(5),
        }
    }

    #[test]
    fn test_payload_uses_wire_names_and_iso_dates() {
        let gateway = HttpGateway::new(config(TransportStrategy::JsonPost)).unwrap();
        let intent = BookingIntent {
            check_in: parse_calendar_date("2026-11-01").unwrap(),
            check_out: parse_calendar_date("2026-11-04").unwrap(),
            room_count: 2,
        };

        let json = serde_json::to_value(gateway.payload(&intent)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "propid": 4021,
                "fromdate": "2026-11-01",
                "todate": "2026-11-04",
                "noofrooms": 2,
                "apikey": "secret-key"
            })
        );
    }

    #[test]
    fn test_stub_transport_is_not_an_http_gateway() {
        assert!(matches!(
            HttpGateway::new(config(TransportStrategy::Stub)),
            Err(BookingError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_error_mapping() {
        let outcome = outcome_for_error(&BookingError::HttpStatus { status: 500 });
        assert_eq!(
            outcome,
            BookingOutcome::failed(
                FailureReason::HttpStatus { status: 500 },
                TRANSPORT_FAILURE_MESSAGE
            )
        );

        let outcome = outcome_for_error(&BookingError::GatewayRejected {
            message: "Incorrect Domain".to_string(),
        });
        assert!(matches!(
            outcome,
            BookingOutcome::Failed {
                reason: FailureReason::DomainRejected,
                ..
            }
        ));
    }
}
