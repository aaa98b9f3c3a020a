use crate::domain::model::{BookingIntent, BookingOutcome, CalendarDate, EnquiryTemplate};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Clock: Send + Sync {
    /// 本地時間的今天（只取日期）
    fn today(&self) -> CalendarDate;
}

/// One outbound submission to the booking engine. Implementations convert
/// every failure into `BookingOutcome::Failed` instead of returning an error.
#[async_trait]
pub trait BookingGatewayClient: Send + Sync {
    async fn submit(&self, intent: &BookingIntent) -> BookingOutcome;
}

#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn send(&self, template: &EnquiryTemplate) -> Result<()>;
}
