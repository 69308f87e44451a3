use chrono::{Duration, Local};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use shared::models::{Appointment, PatientInfo, Provider, TimeSlot};
use shared::schedule::{clock_label, day_header, day_key, parse_timestamp};

use crate::components::time_slot_picker::TimeSlotPicker;
use crate::services::api::ApiClient;

/// How far ahead the booking view looks for open slots.
const AVAILABILITY_WINDOW_DAYS: i64 = 7;

/// Patient-facing booking flow.
///
/// Pick a provider, pick an open slot in the coming week, fill in contact
/// details, confirm. Selecting a different provider discards the slot
/// selection and fetches a fresh window.
#[function_component(Book)]
pub fn book() -> Html {
    let providers = use_state(|| Vec::<Provider>::new());
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let selected_provider = use_state(|| None::<String>);
    let slots = use_state(|| Vec::<TimeSlot>::new());
    let slots_loading = use_state(|| false);
    let selected_slot = use_state(|| None::<TimeSlot>);

    let first_name = use_state(String::new);
    let last_name = use_state(String::new);
    let email = use_state(String::new);
    let phone = use_state(String::new);
    let reason = use_state(String::new);

    let submitting = use_state(|| false);
    let confirmation = use_state(|| None::<Appointment>);

    {
        let providers = providers.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::from_build_env().get_providers().await {
                    Ok(list) => {
                        providers.set(list);
                        loading.set(false);
                    }
                    Err(e) => {
                        tracing::error!("Failed to fetch providers: {:?}", e);
                        error.set(Some(e.to_string()));
                        loading.set(false);
                    }
                }
            });
            || ()
        });
    }

    {
        let slots = slots.clone();
        let slots_loading = slots_loading.clone();
        let selected_slot = selected_slot.clone();
        let error = error.clone();

        use_effect_with((*selected_provider).clone(), move |provider_id| {
            slots.set(Vec::new());
            selected_slot.set(None);
            if let Some(provider_id) = provider_id.clone() {
                slots_loading.set(true);
                wasm_bindgen_futures::spawn_local(async move {
                    let start = Local::now().date_naive();
                    let end = start + Duration::days(AVAILABILITY_WINDOW_DAYS);
                    match ApiClient::from_build_env()
                        .get_availability(&provider_id, &day_key(start), &day_key(end))
                        .await
                    {
                        Ok(response) => {
                            slots.set(response.slots);
                            slots_loading.set(false);
                        }
                        Err(e) => {
                            tracing::error!("Failed to fetch availability: {:?}", e);
                            error.set(Some(e.to_string()));
                            slots_loading.set(false);
                        }
                    }
                });
            }
            || ()
        });
    }

    let on_provider_change = {
        let selected_provider = selected_provider.clone();
        let error = error.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            error.set(None);
            selected_provider.set(if value.is_empty() { None } else { Some(value) });
        })
    };

    let on_slot_select = {
        let selected_slot = selected_slot.clone();
        Callback::from(move |slot: TimeSlot| selected_slot.set(Some(slot)))
    };

    let on_submit = {
        let selected_provider = selected_provider.clone();
        let selected_slot = selected_slot.clone();
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let email = email.clone();
        let phone = phone.clone();
        let reason = reason.clone();
        let submitting = submitting.clone();
        let confirmation = confirmation.clone();
        let error = error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let (provider_id, slot) =
                match ((*selected_provider).clone(), (*selected_slot).clone()) {
                    (Some(provider_id), Some(slot)) => (provider_id, slot),
                    _ => return,
                };

            let patient = PatientInfo {
                first_name: (*first_name).clone(),
                last_name: (*last_name).clone(),
                email: (*email).clone(),
                phone: (*phone).clone(),
            };
            let reason_text = (*reason).clone();

            let submitting = submitting.clone();
            let confirmation = confirmation.clone();
            let error = error.clone();

            submitting.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::from_build_env()
                    .create_appointment(&slot.id, &provider_id, patient, &reason_text)
                    .await
                {
                    Ok(appointment) => {
                        confirmation.set(Some(appointment));
                        submitting.set(false);
                    }
                    Err(e) => {
                        tracing::error!("Failed to create appointment: {:?}", e);
                        error.set(Some(e.to_string()));
                        submitting.set(false);
                    }
                }
            });
        })
    };

    if let Some(appointment) = (*confirmation).clone() {
        let slot_label = match parse_timestamp(&appointment.slot.start_time) {
            Some(at) => format!("{} at {}", day_header(at.date()), clock_label(at)),
            None => appointment.slot.start_time.clone(),
        };

        let on_book_another = {
            let selected_provider = selected_provider.clone();
            let first_name = first_name.clone();
            let last_name = last_name.clone();
            let email = email.clone();
            let phone = phone.clone();
            let reason = reason.clone();
            let confirmation = confirmation.clone();
            Callback::from(move |_| {
                confirmation.set(None);
                selected_provider.set(None);
                first_name.set(String::new());
                last_name.set(String::new());
                email.set(String::new());
                phone.set(String::new());
                reason.set(String::new());
            })
        };

        return html! {
            <div class="container">
                <div class="confirmation">
                    <h2>{ "Appointment Confirmed" }</h2>
                    <p class="reference-number">
                        { "Reference number: " }
                        <strong>{ &appointment.reference_number }</strong>
                    </p>
                    <p>{ format!("{} with {}", slot_label, appointment.provider.name) }</p>
                    <p class="appointment-reason">{ &appointment.reason }</p>
                    <button class="btn btn-primary" onclick={on_book_another}>
                        { "Book Another Appointment" }
                    </button>
                </div>
            </div>
        };
    }

    html! {
        <div class="container">
            <h2>{ "Book an Appointment" }</h2>

            if let Some(message) = (*error).clone() {
                <div class="error-banner">{ message }</div>
            }

            if *loading {
                <div class="loading">
                    <div class="spinner"></div>
                </div>
            } else {
                <div class="booking-form">
                    <label for="provider-select">{ "Provider" }</label>
                    <select id="provider-select" onchange={on_provider_change}>
                        <option value="" selected={(*selected_provider).is_none()}>
                            { "Select a provider" }
                        </option>
                        { for (*providers).iter().map(|provider| {
                            let is_selected =
                                (*selected_provider).as_deref() == Some(provider.id.as_str());
                            html! {
                                <option
                                    key={provider.id.clone()}
                                    value={provider.id.clone()}
                                    selected={is_selected}
                                >
                                    { format!("{} - {}", provider.name, provider.specialty) }
                                </option>
                            }
                        })}
                    </select>

                    if (*selected_provider).is_some() {
                        <h3>{ "Available Times" }</h3>
                        if *slots_loading {
                            <div class="loading">
                                <div class="spinner"></div>
                            </div>
                        } else {
                            <TimeSlotPicker
                                slots={(*slots).clone()}
                                selected={(*selected_slot).clone()}
                                on_select={on_slot_select}
                            />
                        }
                    }

                    if (*selected_slot).is_some() {
                        <form class="patient-form" onsubmit={on_submit}>
                            <h3>{ "Your Details" }</h3>
                            <div class="form-row">
                                <input
                                    type="text"
                                    placeholder="First name"
                                    required={true}
                                    value={(*first_name).clone()}
                                    oninput={bind_input(first_name.clone())}
                                />
                                <input
                                    type="text"
                                    placeholder="Last name"
                                    required={true}
                                    value={(*last_name).clone()}
                                    oninput={bind_input(last_name.clone())}
                                />
                            </div>
                            <div class="form-row">
                                <input
                                    type="email"
                                    placeholder="Email"
                                    required={true}
                                    value={(*email).clone()}
                                    oninput={bind_input(email.clone())}
                                />
                                <input
                                    type="tel"
                                    placeholder="Phone"
                                    required={true}
                                    value={(*phone).clone()}
                                    oninput={bind_input(phone.clone())}
                                />
                            </div>
                            <textarea
                                placeholder="Reason for visit"
                                required={true}
                                value={(*reason).clone()}
                                oninput={bind_textarea(reason.clone())}
                            />
                            <button type="submit" class="btn btn-primary" disabled={*submitting}>
                                { if *submitting { "Booking..." } else { "Confirm Appointment" } }
                            </button>
                        </form>
                    }
                </div>
            }
        </div>
    }
}

fn bind_input(state: UseStateHandle<String>) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

fn bind_textarea(state: UseStateHandle<String>) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        let area: HtmlTextAreaElement = e.target_unchecked_into();
        state.set(area.value());
    })
}
