//! Interpretation of booking-engine reply bodies.
//!
//! The engine has no documented reply format. Everything here is heuristic
//! and kept in one pure function so call sites never look at raw bodies.

use crate::domain::model::{
    BookingOutcome, FailureReason, AMBIGUOUS_RESPONSE_MESSAGE, DOMAIN_REJECTED_MESSAGE,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// What to report when a reply matches none of the known shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguousResponsePolicy {
    #[default]
    AssumeSuccess,
    AssumeFailure,
}

const DOMAIN_REJECTION_PHRASES: &[&str] = &[
    "incorrect domain",
    "invalid domain",
    "domain not authorized",
    "domain not authorised",
    "unauthorized domain",
    "unauthorised domain",
];

const URL_KEYS: &[&str] = &[
    "bookingUrl",
    "booking_url",
    "redirectUrl",
    "redirect_url",
    "paymentUrl",
    "payment_url",
    "url",
];

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}'];

static SCRIPT_REDIRECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"window\.location(?:\.href)?\s*=\s*["']([^"']+)["']"#)
        .expect("script redirect pattern")
});

static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s"'<>]+"#).expect("bare url pattern"));

/// 拒絕網域的回應可能搭配任何 HTTP 狀態碼
pub fn is_domain_rejection(body: &str) -> bool {
    let lowered = body.to_lowercase();
    DOMAIN_REJECTION_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

pub fn parse_gateway_response(body: &str, policy: AmbiguousResponsePolicy) -> BookingOutcome {
    if is_domain_rejection(body) {
        tracing::warn!("⛔ Booking engine rejected this domain");
        return BookingOutcome::failed(FailureReason::DomainRejected, DOMAIN_REJECTED_MESSAGE);
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(url) = find_url_in_json(&json) {
            tracing::debug!("🔗 Booking URL found in JSON reply: {}", url);
            return BookingOutcome::Confirmed {
                redirect_url: Some(url),
            };
        }
    }

    if let Some(caps) = SCRIPT_REDIRECT.captures(body) {
        let url = caps[1].to_string();
        tracing::debug!("🔗 Script redirect found in reply: {}", url);
        return BookingOutcome::Confirmed {
            redirect_url: Some(url),
        };
    }

    if let Some(m) = BARE_URL.find(body) {
        // 句尾標點與右括號不屬於網址
        let url = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        tracing::debug!("🔗 Bare URL found in reply: {}", url);
        return BookingOutcome::Confirmed {
            redirect_url: Some(url.to_string()),
        };
    }

    match policy {
        AmbiguousResponsePolicy::AssumeSuccess => {
            tracing::warn!(
                "🔶 Unrecognised booking engine reply ({} bytes), reporting success",
                body.len()
            );
            BookingOutcome::Confirmed { redirect_url: None }
        }
        AmbiguousResponsePolicy::AssumeFailure => {
            tracing::warn!(
                "🔶 Unrecognised booking engine reply ({} bytes), reporting failure",
                body.len()
            );
            BookingOutcome::failed(FailureReason::Ambiguous, AMBIGUOUS_RESPONSE_MESSAGE)
        }
    }
}

fn find_url_in_json(json: &serde_json::Value) -> Option<String> {
    let obj = json.as_object()?;
    let direct = URL_KEYS.iter().find_map(|key| {
        obj.get(*key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_string())
    });
    direct.or_else(|| obj.get("data").and_then(find_url_in_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS: AmbiguousResponsePolicy = AmbiguousResponsePolicy::AssumeSuccess;
    const FAILURE: AmbiguousResponsePolicy = AmbiguousResponsePolicy::AssumeFailure;

    #[test]
    fn test_script_redirect() {
        let body = "<script>window.location='https://pay.example/confirm/123'</script>";
        assert_eq!(
            parse_gateway_response(body, SUCCESS),
            BookingOutcome::Confirmed {
                redirect_url: Some("https://pay.example/confirm/123".to_string())
            }
        );

        let body = r#"<html><script>window.location.href = "https://pay.example/x?id=9";</script></html>"#;
        assert_eq!(
            parse_gateway_response(body, FAILURE).redirect_url(),
            Some("https://pay.example/x?id=9")
        );
    }

    #[test]
    fn test_domain_rejection() {
        match parse_gateway_response("Incorrect Domain", SUCCESS) {
            BookingOutcome::Failed { reason, message } => {
                assert_eq!(reason, FailureReason::DomainRejected);
                assert!(message.contains("domain"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_json_booking_url() {
        let body = r#"{"status":"ok","bookingUrl":"https://bookings.example/pay/77"}"#;
        assert_eq!(
            parse_gateway_response(body, FAILURE).redirect_url(),
            Some("https://bookings.example/pay/77")
        );

        let nested = r#"{"success":true,"data":{"redirect_url":"https://bookings.example/r/5"}}"#;
        assert_eq!(
            parse_gateway_response(nested, FAILURE).redirect_url(),
            Some("https://bookings.example/r/5")
        );
    }

    #[test]
    fn test_bare_url_in_text() {
        let body = "Please continue at https://bookings.example/continue/42 to pay.";
        assert_eq!(
            parse_gateway_response(body, FAILURE).redirect_url(),
            Some("https://bookings.example/continue/42")
        );

        let body = "Please continue at https://pay.example/confirm/123.";
        assert_eq!(
            parse_gateway_response(body, FAILURE).redirect_url(),
            Some("https://pay.example/confirm/123")
        );

        let body = "Booking received (see https://pay.example/confirm/123).";
        assert_eq!(
            parse_gateway_response(body, FAILURE).redirect_url(),
            Some("https://pay.example/confirm/123")
        );

        let body = "Pay here: https://pay.example/confirm?id=7&step=2, thank you!";
        assert_eq!(
            parse_gateway_response(body, FAILURE).redirect_url(),
            Some("https://pay.example/confirm?id=7&step=2")
        );
    }

    #[test]
    fn test_domain_rejection_phrase_detection() {
        assert!(is_domain_rejection("Error: INCORRECT DOMAIN"));
        assert!(is_domain_rejection("<p>Domain not authorised</p>"));
        assert!(!is_domain_rejection("Service temporarily unavailable"));
    }

    #[test]
    fn test_ambiguous_reply_follows_policy() {
        assert_eq!(
            parse_gateway_response("OK", SUCCESS),
            BookingOutcome::Confirmed { redirect_url: None }
        );
        assert_eq!(
            parse_gateway_response(r#"{"success":true}"#, SUCCESS),
            BookingOutcome::Confirmed { redirect_url: None }
        );

        match parse_gateway_response("OK", FAILURE) {
            BookingOutcome::Failed { reason, .. } => assert_eq!(reason, FailureReason::Ambiguous),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!parse_gateway_response("", FAILURE).is_success());
    }

    #[test]
    fn test_policy_deserializes_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: AmbiguousResponsePolicy,
        }
        let w: Wrapper = toml::from_str("policy = \"assume_failure\"").unwrap();
        assert_eq!(w.policy, AmbiguousResponsePolicy::AssumeFailure);
    }
}
