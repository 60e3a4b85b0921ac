use crate::shared::icons::icon;
use crate::shared::record_manager::{page_count, DEFAULT_PAGE_SIZES};
use leptos::prelude::*;

/// First and last item number shown on a page, 1-based; `(0, 0)` for an empty list
pub fn shown_range(current_page: usize, items_per_page: usize, total_items: usize) -> (usize, usize) {
    if total_items == 0 || items_per_page == 0 {
        return (0, 0);
    }
    let first = (current_page.max(1) - 1) * items_per_page + 1;
    let last = (first + items_per_page - 1).min(total_items);
    (first.min(total_items), last)
}

/// Pager shown above every list. Pages are 1-based.
#[component]
pub fn PaginationControls(
    #[prop(into)]
    current_page: Signal<usize>,

    #[prop(into)]
    items_per_page: Signal<usize>,

    /// Number of items after filtering
    #[prop(into)]
    total_items: Signal<usize>,

    on_page_change: Callback<usize>,

    on_page_size_change: Callback<usize>,

    /// Page size options (defaults to 10, 20, 50, 100)
    #[prop(optional)]
    page_sizes: Option<Vec<usize>>,
) -> impl IntoView {
    let page_sizes = page_sizes.unwrap_or_else(|| DEFAULT_PAGE_SIZES.to_vec());
    let total_pages = move || page_count(total_items.get(), items_per_page.get());
    let on_first = move || current_page.get() <= 1;
    let on_last = move || current_page.get() >= total_pages();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=on_first
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=on_first
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    let (first, last) =
                        shown_range(current_page.get(), items_per_page.get(), total_items.get());
                    format!(
                        "{}-{} of {} (page {} / {})",
                        first,
                        last,
                        total_items.get(),
                        current_page.get(),
                        total_pages()
                    )
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=on_last
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages())
                disabled=on_last
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || items_per_page.get().to_string()
            >
                {page_sizes.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || items_per_page.get() == size>
                            {format!("{} / page", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shown_range() {
        assert_eq!(shown_range(1, 10, 0), (0, 0));
        assert_eq!(shown_range(1, 10, 23), (1, 10));
        assert_eq!(shown_range(3, 10, 23), (21, 23));
        assert_eq!(shown_range(2, 10, 20), (11, 20));
    }
}
