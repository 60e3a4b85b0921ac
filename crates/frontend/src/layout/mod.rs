pub mod center;
pub mod global_context;
pub mod left;
pub mod registry;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Main application shell.
///
/// ```text
/// +------------------------------+
/// |           top bar            |
/// +------------------------------+
/// |  Navbar  |  active page      |
/// +------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-layout">
            <div class="top-header">
                <button
                    class="top-header__icon-btn"
                    title=move || if ctx.left_open.get() { "Hide navigation" } else { "Show navigation" }
                    on:click=move |_| ctx.toggle_left()
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"POS Admin"</span>
            </div>

            <div class="app-body">
                <left::Left>
                    <left::Navbar />
                </left::Left>
                <div class="app-main">
                    <center::Center />
                </div>
            </div>
        </div>
    }
}
