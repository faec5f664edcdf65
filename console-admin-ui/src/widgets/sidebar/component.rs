use crate::widgets::server_status::ServerStatus;
use dioxus::prelude::*;

#[component]
pub fn Sidebar() -> Element {
    let route = use_route::<crate::Route>();
    let current_path = route.to_string();

    rsx! {
        aside { class: "sidebar",
            div { class: "sidebar-header",
                h2 { "Access Console" }
            }
            nav { class: "sidebar-nav",
                Link {
                    to: crate::Route::Groups {},
                    class: if current_path == "/" { "nav-item active" } else { "nav-item" },
                    "Groups"
                }
                Link {
                    to: crate::Route::AddGroup {},
                    class: if current_path.contains("add") { "nav-item active" } else { "nav-item" },
                    "Add group"
                }
            }
            div { class: "sidebar-footer",
                ServerStatus {}
            }
        }
    }
}
