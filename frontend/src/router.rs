use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{book::Book, calendar::Calendar, not_found::NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Book,
    #[at("/calendar")]
    Calendar,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Book => html! { <Book /> },
        Route::Calendar => html! { <Calendar /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
