use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::api::{AvailabilityResponse, CreateAppointmentRequest, RequestError};
use shared::models::{Appointment, PatientInfo, Provider};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Typed client for the booking backend.
///
/// Each operation performs exactly one HTTP call: no retries, no caching,
/// no timeout beyond the browser's defaults. Non-2xx responses become a
/// `RequestError` carrying the backend's `detail` message when present.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Client configured from the compile-time `CLINIC_API_URL`, falling
    /// back to the local development backend.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("CLINIC_API_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }

    pub async fn get_providers(&self) -> Result<Vec<Provider>, RequestError> {
        const FALLBACK: &str = "Failed to fetch providers";

        let url = format!("{}/providers", self.base_url);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| transport_error(FALLBACK, e))?;
        parse_response(response, FALLBACK).await
    }

    pub async fn get_availability(
        &self,
        provider_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<AvailabilityResponse, RequestError> {
        const FALLBACK: &str = "Failed to fetch availability";

        let url = format!(
            "{}/availability?provider_id={}&start_date={}&end_date={}",
            self.base_url, provider_id, start_date, end_date
        );
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| transport_error(FALLBACK, e))?;
        parse_response(response, FALLBACK).await
    }

    pub async fn create_appointment(
        &self,
        slot_id: &str,
        provider_id: &str,
        patient: PatientInfo,
        reason: &str,
    ) -> Result<Appointment, RequestError> {
        const FALLBACK: &str = "Failed to create appointment";

        let url = format!("{}/appointments", self.base_url);
        let body = CreateAppointmentRequest {
            slot_id: slot_id.to_string(),
            provider_id: provider_id.to_string(),
            patient,
            reason: reason.to_string(),
        };
        let response = Request::post(&url)
            .json(&body)
            .map_err(|e| transport_error(FALLBACK, e))?
            .send()
            .await
            .map_err(|e| transport_error(FALLBACK, e))?;
        parse_response(response, FALLBACK).await
    }

    /// The listing endpoint's shape is backend-defined; the body is handed
    /// over as raw JSON for the caller to re-type.
    pub async fn get_provider_appointments(
        &self,
        provider_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<serde_json::Value, RequestError> {
        const FALLBACK: &str = "Failed to fetch appointments";

        let url = format!(
            "{}/providers/{}/appointments?start_date={}&end_date={}",
            self.base_url, provider_id, start_date, end_date
        );
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| transport_error(FALLBACK, e))?;
        parse_response(response, FALLBACK).await
    }
}

fn transport_error(fallback: &str, source: gloo_net::Error) -> RequestError {
    tracing::error!("Request failed: {:?}", source);
    RequestError::new(fallback)
}

async fn parse_response<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, RequestError> {
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(RequestError::from_response_body(fallback, &body));
    }
    response.json().await.map_err(|e| {
        tracing::error!("Failed to parse response: {:?}", e);
        RequestError::new(fallback)
    })
}
