use console::groups::MemberCount;
use console::groups::list::load_member_count;
use console::{ApiClient, LoadHandle, cancellable};
use dioxus::prelude::*;
use std::rc::Rc;

/// Lazily counted members of one row. Unmounting the row cancels the count.
#[component]
pub fn MemberCountCell(group_id: String) -> Element {
    let api = use_context::<ApiClient>();
    let mut count = use_signal(|| MemberCount::Loading);

    let _load: Rc<LoadHandle> = use_hook(move || {
        let (handle, load) = cancellable(async move { load_member_count(&api, &group_id).await });
        spawn(async move {
            if let Some(loaded) = load.await {
                count.set(loaded);
            }
        });
        Rc::new(handle)
    });

    rsx! {
        span { class: "member-count", "{count}" }
    }
}
