use crate::layout::global_context::AppGlobalContext;
use crate::layout::registry::render_page;
use leptos::prelude::*;

/// Content area showing the active page
#[component]
pub fn Center() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div data-zone="center" class="app-content" style="flex: 1; overflow: auto;">
            {move || match ctx.active.get() {
                Some(key) => render_page(&key),
                None => view! { <div class="placeholder">{"Select a page"}</div> }.into_any(),
            }}
        </div>
    }
}
