//! ClassDesk frontend application entry point.

mod api;
mod components;
mod pages;
mod utils;

use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    html! {
        <pages::dashboard::DashboardPage />
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
