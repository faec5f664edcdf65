use console::ApiClient;
use dioxus::prelude::*;

#[derive(Clone, PartialEq)]
enum Health {
    Checking,
    Up(String),
    Down,
}

#[component]
pub fn ServerStatus() -> Element {
    let api = use_context::<ApiClient>();
    let server = api.config().http_server.clone();
    let health = use_resource(move || {
        let api = api.clone();
        async move {
            match api.check_health().await {
                Ok(health) => Health::Up(health.message),
                Err(_) => Health::Down,
            }
        }
    });

    let (dot_class, label) = match health.read().clone().unwrap_or(Health::Checking) {
        Health::Checking => ("status-dot loading", "Checking...".to_string()),
        Health::Up(message) => ("status-dot healthy", message),
        Health::Down => ("status-dot error", "Down".to_string()),
    };

    rsx! {
        div { class: "server-status", title: "{server}",
            span { class: "{dot_class}" }
            span { "API: {label}" }
        }
    }
}
