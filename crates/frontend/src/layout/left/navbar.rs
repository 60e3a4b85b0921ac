use crate::layout::global_context::AppGlobalContext;
use crate::layout::registry::pages;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <nav class="main-nav-bar">
            <ul>
                {pages().into_iter().map(|(key, title, icon_name)| {
                    let is_active = move || ctx.active.with(|a| a.as_deref() == Some(key));
                    view! {
                        <li class:active=is_active on:click=move |_| ctx.open_page(key)>
                            {icon(icon_name)}
                            <span>{title}</span>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </nav>
    }
}
