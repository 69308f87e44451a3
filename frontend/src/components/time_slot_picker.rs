use yew::prelude::*;

use shared::models::TimeSlot;
use shared::schedule::{day_header, start_clock_label, DaySchedule};

#[derive(Properties, PartialEq)]
pub struct TimeSlotPickerProps {
    pub slots: Vec<TimeSlot>,
    #[prop_or_default]
    pub selected: Option<TimeSlot>,
    pub on_select: Callback<TimeSlot>,
}

/// Grouped slot picker: one section per calendar day, one button per slot.
///
/// Selection state is owned by the caller; this component only reports
/// clicks on available slots through `on_select`.
#[function_component(TimeSlotPicker)]
pub fn time_slot_picker(props: &TimeSlotPickerProps) -> Html {
    let schedule = DaySchedule::from_items(&props.slots);

    if schedule.is_empty() {
        return html! {
            <div class="empty-state">
                <p>{ "No open slots in this date range." }</p>
            </div>
        };
    }

    html! {
        <div class="slot-picker">
            { for schedule.days().iter().map(|bucket| {
                html! {
                    <div key={bucket.key.clone()} class="slot-day">
                        <div class="slot-day-header">{ day_header(bucket.date) }</div>
                        <div class="slot-grid">
                            { for bucket.items.iter().map(|slot| {
                                let is_selected = props
                                    .selected
                                    .as_ref()
                                    .map(|s| s.id == slot.id)
                                    .unwrap_or(false);

                                let on_select = props.on_select.clone();
                                let clicked = slot.clone();
                                let onclick = Callback::from(move |_| on_select.emit(clicked.clone()));

                                html! {
                                    <button
                                        key={slot.id.clone()}
                                        class={if is_selected { "slot-btn selected" } else { "slot-btn" }}
                                        disabled={!slot.available}
                                        {onclick}
                                    >
                                        { start_clock_label(slot) }
                                    </button>
                                }
                            })}
                        </div>
                    </div>
                }
            })}
        </div>
    }
}
