use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PatientInfo, Provider, ProviderAppointment, TimeSlot};

// ============================================================================
// Availability API Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub provider: Provider,
    pub slots: Vec<TimeSlot>,
}

// ============================================================================
// Booking API Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub slot_id: String,
    pub provider_id: String,
    pub patient: PatientInfo,
    pub reason: String,
}

// ============================================================================
// Error Types
// ============================================================================

/// The single error the API client surfaces: an HTTP call that failed,
/// carrying a human-readable message for display.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build an error from a non-2xx response body.
    ///
    /// The backend reports failures as JSON with a `detail` field; when the
    /// body is not JSON or has no `detail`, the per-operation fallback
    /// message is used instead.
    pub fn from_response_body(fallback: &str, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail);
        Self {
            message: detail.unwrap_or_else(|| fallback.to_string()),
        }
    }
}

/// Re-type the untyped provider appointment listing.
///
/// The endpoint's contract is not pinned down yet, so the client hands the
/// body over as raw JSON; this accepts either a bare array or an
/// `{"appointments": [...]}` wrapper.
pub fn provider_appointments_from_value(
    value: serde_json::Value,
) -> Result<Vec<ProviderAppointment>, RequestError> {
    let rows = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(mut map) => map
            .remove("appointments")
            .ok_or_else(|| RequestError::new("Unexpected appointment listing shape"))?,
        _ => return Err(RequestError::new("Unexpected appointment listing shape")),
    };
    serde_json::from_value(rows)
        .map_err(|e| RequestError::new(format!("Failed to parse appointments: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_uses_detail_field() {
        let err = RequestError::from_response_body(
            "Failed to create appointment",
            r#"{"detail":"Slot no longer available"}"#,
        );
        assert_eq!(err.message, "Slot no longer available");
        assert_eq!(err.to_string(), "Slot no longer available");
    }

    #[test]
    fn test_error_falls_back_on_non_json_body() {
        let err = RequestError::from_response_body("Failed to fetch providers", "<html>502</html>");
        assert_eq!(err.message, "Failed to fetch providers");
    }

    #[test]
    fn test_error_falls_back_when_detail_absent() {
        let err = RequestError::from_response_body(
            "Failed to fetch availability",
            r#"{"error":"boom"}"#,
        );
        assert_eq!(err.message, "Failed to fetch availability");
    }

    #[test]
    fn test_create_appointment_request_wire_shape() {
        let request = CreateAppointmentRequest {
            slot_id: "slot-1".to_string(),
            provider_id: "prov-1".to_string(),
            patient: PatientInfo {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0100".to_string(),
            },
            reason: "Annual checkup".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["slot_id"], "slot-1");
        assert_eq!(json["provider_id"], "prov-1");
        assert_eq!(json["patient"]["first_name"], "Ada");
        assert_eq!(json["reason"], "Annual checkup");
    }

    #[test]
    fn test_availability_response_deserializes() {
        let body = r#"{
            "provider": {"id": "prov-1", "name": "Dr. Chen", "specialty": "Dermatology", "bio": null},
            "slots": [
                {"id": "s1", "start_time": "2024-03-01T09:00:00", "end_time": "2024-03-01T09:30:00", "available": true}
            ]
        }"#;

        let parsed: AvailabilityResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.provider.name, "Dr. Chen");
        assert_eq!(parsed.slots.len(), 1);
        assert!(parsed.slots[0].available);
    }

    #[test]
    fn test_provider_appointment_status_optional() {
        let body = r#"{
            "id": "a1",
            "start_time": "2024-03-01T09:00:00",
            "end_time": "2024-03-01T09:30:00",
            "patient_name": "Ada Lovelace",
            "reason": "Annual checkup"
        }"#;

        let parsed: ProviderAppointment = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, None);
    }

    #[test]
    fn test_listing_accepts_bare_array() {
        let value = serde_json::json!([
            {
                "id": "a1",
                "start_time": "2024-03-01T09:00:00",
                "end_time": "2024-03-01T09:30:00",
                "patient_name": "Ada Lovelace",
                "reason": "Annual checkup",
                "status": "confirmed"
            }
        ]);

        let rows = provider_appointments_from_value(value).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].patient_name, "Ada Lovelace");
    }

    #[test]
    fn test_listing_accepts_wrapped_object() {
        let value = serde_json::json!({
            "appointments": [
                {
                    "id": "a1",
                    "start_time": "2024-03-01T09:00:00",
                    "end_time": "2024-03-01T09:30:00",
                    "patient_name": "Ada Lovelace",
                    "reason": "Follow-up"
                }
            ],
            "total": 1
        });

        let rows = provider_appointments_from_value(value).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].reason, "Follow-up");
    }

    #[test]
    fn test_listing_rejects_scalar() {
        assert!(provider_appointments_from_value(serde_json::json!(42)).is_err());
    }
}
