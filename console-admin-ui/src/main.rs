use dioxus::prelude::*;

use console::ApiClient;
use pages::{AddGroup, Groups};
use widgets::sidebar::Sidebar;

mod pages;
mod widgets;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Groups {},
    #[route("/groups/add")]
    AddGroup {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // Load environment variables from .env file (if exists)
    match dotenvy::dotenv() {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(ApiClient::new);

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// Sidebar plus the routed page.
#[component]
fn Shell() -> Element {
    rsx! {
        div { class: "app-shell",
            Sidebar {}
            main { class: "app-main", Outlet::<Route> {} }
        }
    }
}
