use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{ "Clinic Scheduler" }</h1>
                <nav>
                    <Link<Route> to={Route::Book}>{ "Book Appointment" }</Link<Route>>
                    { " | " }
                    <Link<Route> to={Route::Calendar}>{ "Doctor Calendar" }</Link<Route>>
                </nav>
            </div>
        </header>
    }
}
