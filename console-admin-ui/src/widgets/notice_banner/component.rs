use console::Notice;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

const AUTO_DISMISS_MS: u32 = 8_000;

/// Error banner for a mutation the backend rejected. Dismisses itself.
#[component]
pub fn NoticeBanner(notice: Notice, on_dismiss: EventHandler<()>) -> Element {
    use_future(move || async move {
        TimeoutFuture::new(AUTO_DISMISS_MS).await;
        on_dismiss.call(());
    });

    rsx! {
        div { class: "notice error", role: "alert",
            span { class: "notice-message", "{notice}" }
            button {
                class: "notice-dismiss",
                r#type: "button",
                aria_label: "Dismiss",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}
