use serde::{Deserialize, Serialize};
use validator::Validate;

/// A care provider offering bookable time slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub bio: Option<String>,
}

/// A discrete bookable time interval offered by a provider.
///
/// Timestamps are the backend's ISO-8601 strings and are kept verbatim
/// here; parsing happens at the grouping boundary (`crate::schedule`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub available: bool,
}

/// Patient contact details attached to a booking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PatientInfo {
    #[validate(length(min = 1, max = 200))]
    pub first_name: String,

    #[validate(length(min = 1, max = 200))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 50))]
    pub phone: String,
}

/// Time range embedded in a booked appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotTimes {
    pub start_time: String,
    pub end_time: String,
}

/// A booked appointment as returned by the booking endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub reference_number: String,
    pub status: String,
    pub slot: SlotTimes,
    pub provider: Provider,
    pub patient: PatientInfo,
    pub reason: String,
    pub created_at: String,
}

/// One row of a provider's appointment listing, as shown in the calendar
/// view. The listing endpoint is untyped at the client boundary; this is
/// the shape the calendar page re-types it into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAppointment {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub patient_name: String,
    pub reason: String,
    pub status: Option<String>,
}
