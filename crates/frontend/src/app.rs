use crate::layout::global_context::AppGlobalContext;
use crate::layout::registry::{is_known_page, DEFAULT_PAGE};
use crate::layout::Shell;
use crate::shared::config::load_config;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    let ctx = AppGlobalContext::new();
    provide_context(ctx);

    // Settings read once at startup; list pages pick them up from context
    provide_context(load_config());

    ctx.init_router_integration(DEFAULT_PAGE, is_known_page);

    view! { <Shell /> }
}
