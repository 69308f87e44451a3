use chrono::{Datelike, Local};
use yew::prelude::*;

use shared::models::ProviderAppointment;
use shared::schedule::{
    clock_label, day_header, month_days, parse_timestamp, start_clock_label, DaySchedule,
};

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Properties, PartialEq)]
pub struct DoctorCalendarProps {
    pub appointments: Vec<ProviderAppointment>,
}

/// Month calendar for a provider's schedule.
///
/// Days with appointments are highlighted; clicking a day shows its
/// appointments in the detail panel below. Any day may be selected,
/// including days with nothing scheduled.
// TODO: per-day appointment count badges on the calendar cells
#[function_component(DoctorCalendar)]
pub fn doctor_calendar(props: &DoctorCalendarProps) -> Html {
    let today = Local::now().date_naive();
    let selected_date = use_state(|| today);
    let view_month = use_state(|| (today.year(), today.month()));

    let schedule = DaySchedule::from_items(&props.appointments);
    let marked_dates = schedule.dates();

    let (year, month) = *view_month;

    let on_prev_month = {
        let view_month = view_month.clone();
        Callback::from(move |_| {
            let (y, m) = *view_month;
            view_month.set(if m == 1 { (y - 1, 12) } else { (y, m - 1) });
        })
    };

    let on_next_month = {
        let view_month = view_month.clone();
        Callback::from(move |_| {
            let (y, m) = *view_month;
            view_month.set(if m == 12 { (y + 1, 1) } else { (y, m + 1) });
        })
    };

    let days = month_days(year, month);
    let leading_blanks = days
        .first()
        .map(|d| d.weekday().num_days_from_monday() as usize)
        .unwrap_or(0);
    let month_label = days
        .first()
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default();

    let selected = *selected_date;
    let day_appointments = schedule.on(selected);

    html! {
        <div class="doctor-calendar">
            <h2>{ "Calendar View" }</h2>

            <div class="calendar-nav">
                <button class="nav-btn" onclick={on_prev_month}>{ "<" }</button>
                <span class="calendar-month">{ month_label }</span>
                <button class="nav-btn" onclick={on_next_month}>{ ">" }</button>
            </div>

            <div class="calendar-grid">
                { for WEEKDAY_LABELS.iter().map(|label| html! {
                    <div class="cal-weekday">{ *label }</div>
                })}
                { for (0..leading_blanks).map(|i| html! {
                    <div key={format!("blank-{}", i)} class="cal-day blank"></div>
                })}
                { for days.iter().map(|day| {
                    let day = *day;
                    let mut class = Classes::from("cal-day");
                    if marked_dates.contains(&day) {
                        class.push("has-appointments");
                    }
                    if day == selected {
                        class.push("selected");
                    }
                    if day == today {
                        class.push("today");
                    }

                    let selected_date = selected_date.clone();
                    let onclick = Callback::from(move |_| selected_date.set(day));

                    html! {
                        <div key={day.to_string()} {class} {onclick}>
                            { day.day() }
                        </div>
                    }
                })}
            </div>

            <div class="day-detail">
                <h3>{ day_header(selected) }</h3>

                { if day_appointments.is_empty() {
                    html! {
                        <p class="empty-state">{ "No appointments scheduled for this day" }</p>
                    }
                } else {
                    html! {
                        <div class="appointment-list">
                            { for day_appointments.iter().map(|apt| {
                                let status = apt
                                    .status
                                    .as_deref()
                                    .filter(|s| !s.is_empty())
                                    .unwrap_or("confirmed");
                                let end_label = parse_timestamp(&apt.end_time)
                                    .map(clock_label)
                                    .unwrap_or_else(|| apt.end_time.clone());

                                html! {
                                    <div key={apt.id.clone()} class="appointment-item">
                                        <div class="appointment-header">
                                            <span class="patient-name">{ &apt.patient_name }</span>
                                            <span class="status-badge">{ status }</span>
                                        </div>
                                        <p class="appointment-time">
                                            { format!("{} - {}", start_clock_label(apt), end_label) }
                                        </p>
                                        <p class="appointment-reason">{ &apt.reason }</p>
                                    </div>
                                }
                            })}
                        </div>
                    }
                }}
            </div>
        </div>
    }
}
