use chrono::{Duration, Local};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use shared::api::provider_appointments_from_value;
use shared::models::{Provider, ProviderAppointment};
use shared::schedule::day_key;

use crate::components::doctor_calendar::DoctorCalendar;
use crate::services::api::ApiClient;

/// Listing window around today, wide enough to cover the months the
/// calendar can reasonably navigate to without a refetch.
const LOOKBACK_DAYS: i64 = 30;
const LOOKAHEAD_DAYS: i64 = 60;

/// Provider-facing schedule view: pick a provider, see their booked
/// appointments on a month calendar.
#[function_component(Calendar)]
pub fn calendar() -> Html {
    let providers = use_state(|| Vec::<Provider>::new());
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let selected_provider = use_state(|| None::<String>);
    let appointments = use_state(|| Vec::<ProviderAppointment>::new());
    let appointments_loading = use_state(|| false);

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
        let appointments = appointments.clone();
        let appointments_loading = appointments_loading.clone();
        let error = error.clone();

        use_effect_with((*selected_provider).clone(), move |provider_id| {
            appointments.set(Vec::new());
            if let Some(provider_id) = provider_id.clone() {
                appointments_loading.set(true);
                wasm_bindgen_futures::spawn_local(async move {
                    let today = Local::now().date_naive();
                    let start = today - Duration::days(LOOKBACK_DAYS);
                    let end = today + Duration::days(LOOKAHEAD_DAYS);
                    let result = ApiClient::from_build_env()
                        .get_provider_appointments(&provider_id, &day_key(start), &day_key(end))
                        .await
                        .and_then(provider_appointments_from_value);
                    match result {
                        Ok(list) => {
                            appointments.set(list);
                            appointments_loading.set(false);
                        }
                        Err(e) => {
                            tracing::error!("Failed to fetch appointments: {:?}", e);
                            error.set(Some(e.to_string()));
                            appointments_loading.set(false);
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

    html! {
        <div class="container">
            <h2>{ "Doctor Calendar" }</h2>

            if let Some(message) = (*error).clone() {
                <div class="error-banner">{ message }</div>
            }

            if *loading {
                <div class="loading">
                    <div class="spinner"></div>
                </div>
            } else {
                <div class="calendar-page">
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
                        if *appointments_loading {
                            <div class="loading">
                                <div class="spinner"></div>
                            </div>
                        } else {
                            <DoctorCalendar appointments={(*appointments).clone()} />
                        }
                    }
                </div>
            }
        </div>
    }
}
