use crate::config::toml_config::NotificationConfig;
use crate::core::enquiry::Recipient;
use crate::domain::model::EnquiryTemplate;
use crate::domain::ports::NotificationChannel;
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a EnquiryTemplate,
}

/// 透過 EmailJS REST API 寄送樣板郵件
pub struct EmailRelay {
    client: Client,
    config: NotificationConfig,
}

impl EmailRelay {
    pub fn new(config: NotificationConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn recipient(&self) -> Recipient {
        Recipient {
            name: self.config.recipient_name.clone(),
            email: self.config.recipient_email.clone(),
        }
    }
}

#[async_trait]
impl NotificationChannel for EmailRelay {
    async fn send(&self, template: &EnquiryTemplate) -> Result<()> {
        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: template,
        };

        tracing::debug!(
            "✉️ Sending template {} via {}",
            self.config.template_id,
            self.config.endpoint
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 200 {
            let text = response.text().await.unwrap_or_default();
            tracing::error!("❌ Email relay returned status {}: {}", status, text);
            return Err(BookingError::Notification {
                message: format!("relay returned status {}: {}", status.as_u16(), text),
            });
        }

        Ok(())
    }
}
