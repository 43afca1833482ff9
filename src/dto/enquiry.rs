use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::enquiry::Enquiry;

/// Outcome of a submission or a failed request.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            code: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            code: None,
        }
    }

    pub fn rejected(message: impl Into<String>, code: &'static str) -> Self {
        Self {
            code: Some(code),
            ..Self::failure(message)
        }
    }
}

/// Enquiry as exposed to API clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub city: String,
    pub requirement: String,
    pub created_at: DateTime<Utc>,
}

impl From<Enquiry> for EnquiryDto {
    fn from(enquiry: Enquiry) -> Self {
        Self {
            id: enquiry.id.get(),
            name: enquiry.name.into_inner(),
            phone: enquiry.phone.into_inner(),
            city: enquiry.city.into_inner(),
            requirement: enquiry.requirement.into_inner(),
            created_at: enquiry.created_at.and_utc(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EnquiryListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<EnquiryDto>,
}

impl From<Vec<Enquiry>> for EnquiryListResponse {
    fn from(enquiries: Vec<Enquiry>) -> Self {
        let data: Vec<EnquiryDto> = enquiries.into_iter().map(EnquiryDto::from).collect();
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn enquiry_serializes_with_camel_case_timestamp() {
        let created_at = NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_micro_opt(10, 0, 0, 123_456))
            .unwrap();
        let enquiry = Enquiry::try_new(
            3,
            "Ravi".to_string(),
            "9956413300".to_string(),
            "Sitapur".to_string(),
            "2 inch GI pipe".to_string(),
            created_at,
        )
        .unwrap();

        let value = serde_json::to_value(EnquiryListResponse::from(vec![enquiry])).unwrap();

        assert_eq!(
            value,
            json!({
                "success": true,
                "count": 1,
                "data": [{
                    "id": 3,
                    "name": "Ravi",
                    "phone": "9956413300",
                    "city": "Sitapur",
                    "requirement": "2 inch GI pipe",
                    "createdAt": "2026-10-19T10:00:00.123456Z"
                }]
            })
        );
    }

    #[test]
    fn success_message_omits_code() {
        let value = serde_json::to_value(MessageResponse::success("ok")).unwrap();
        assert_eq!(value, json!({"success": true, "message": "ok"}));
    }
}
