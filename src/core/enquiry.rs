use crate::domain::model::{parse_calendar_date, Enquiry, EnquiryTemplate};
use crate::domain::ports::NotificationChannel;
use crate::utils::error::{Result, ValidationError};

/// 收件人資訊，來自設定檔
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

pub fn validate_enquiry(enquiry: &Enquiry) -> std::result::Result<(), ValidationError> {
    let required = [
        ("name", &enquiry.name),
        ("email", &enquiry.email),
        ("phone", &enquiry.phone),
        ("check_in", &enquiry.check_in),
        ("check_out", &enquiry.check_out),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: field.to_string(),
            });
        }
    }

    if !looks_like_email(enquiry.email.trim()) {
        return Err(ValidationError::InvalidEmail {
            value: enquiry.email.clone(),
        });
    }

    parse_calendar_date(&enquiry.check_in)?;
    parse_calendar_date(&enquiry.check_out)?;
    Ok(())
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

pub fn build_template(enquiry: &Enquiry, recipient: &Recipient) -> EnquiryTemplate {
    let special_requests = if enquiry.special_requests.trim().is_empty() {
        "None".to_string()
    } else {
        enquiry.special_requests.clone()
    };

    EnquiryTemplate {
        to_name: recipient.name.clone(),
        to_email: recipient.email.clone(),
        from_name: enquiry.name.clone(),
        from_email: enquiry.email.clone(),
        reply_to: enquiry.email.clone(),
        phone: enquiry.phone.clone(),
        check_in: enquiry.check_in.clone(),
        check_out: enquiry.check_out.clone(),
        guests: enquiry.guests.clone(),
        room_type: enquiry.room_type.clone(),
        special_requests,
    }
}

/// Validates the enquiry and hands it to the relay once.
pub async fn send_enquiry(
    channel: &dyn NotificationChannel,
    enquiry: &Enquiry,
    recipient: &Recipient,
) -> Result<()> {
    validate_enquiry(enquiry)?;
    let template = build_template(enquiry, recipient);

    tracing::info!(
        "✉️ Sending enquiry from {} for {} -> {}",
        template.from_name,
        template.check_in,
        template.check_out
    );
    channel.send(&template).await?;
    tracing::info!("✅ Enquiry sent to {}", template.to_email);
    Ok(())
}
