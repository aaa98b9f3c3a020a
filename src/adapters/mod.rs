// Adapters layer: concrete implementations for external systems (clock, booking engine, email relay).

pub mod clock;
pub mod email;
pub mod gateway;
pub mod stub;

use crate::config::toml_config::{GatewayConfig, TransportStrategy};
use crate::domain::ports::BookingGatewayClient;
use crate::utils::error::Result;

/// Picks the gateway implementation named by `config.transport`.
pub fn gateway_from_config(config: &GatewayConfig) -> Result<Box<dyn BookingGatewayClient>> {
    match config.transport {
        TransportStrategy::Stub => {
            tracing::warn!("🧪 Booking engine stub enabled; no request will leave this machine");
            Ok(Box::new(stub::StubGateway::default()))
        }
        _ => Ok(Box::new(gateway::HttpGateway::new(config.clone())?)),
    }
}
