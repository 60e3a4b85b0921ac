//! Helpers for list pages: search input and match highlighting
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::ops::Range;

/// Delay before a typed query is applied
const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Byte ranges of `text`, each flagged when it matches `query` (case-insensitive).
///
/// Text whose lowercase form changes length is returned unsplit.
pub fn match_ranges(text: &str, query: &str) -> Vec<(Range<usize>, bool)> {
    let query = query.trim().to_lowercase();
    let lower = text.to_lowercase();
    if query.is_empty() || lower.len() != text.len() {
        return vec![(0..text.len(), false)];
    }

    let mut parts = Vec::new();
    let mut last = 0;
    while let Some(pos) = lower[last..].find(&query) {
        let start = last + pos;
        let end = start + query.len();
        if start > last {
            parts.push((last..start, false));
        }
        parts.push((start..end, true));
        last = end;
    }
    if last < text.len() || parts.is_empty() {
        parts.push((last..text.len(), false));
    }
    parts
}

/// Render `text` with every occurrence of `query` highlighted
pub fn highlight_matches(text: &str, query: &str) -> AnyView {
    let parts = match_ranges(text, query)
        .into_iter()
        .map(|(range, hit)| {
            let chunk = text[range].to_string();
            if hit {
                view! { <mark class="search-match">{chunk}</mark> }.into_any()
            } else {
                view! { <span>{chunk}</span> }.into_any()
            }
        })
        .collect::<Vec<_>>();
    view! { <>{parts}</> }.into_any()
}

/// Text input that reports its value after the user stops typing
#[component]
pub fn SearchInput(
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };
    // bumped on every keystroke; a pending timer only fires if it is still current
    let generation = StoredValue::new(0u64);

    let handle_input = move |text: String| {
        generation.update_value(|g| *g += 1);
        let mine = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if generation.try_get_value() == Some(mine) {
                on_change.run(text);
            }
        });
    };

    let clear = move |_| {
        generation.update_value(|g| *g += 1);
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class="search-input__field"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !value.get().is_empty()>
                <button class="search-input__clear" title="Clear" on:click=clear>
                    "×"
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pieces(text: &str, query: &str) -> Vec<(String, bool)> {
        match_ranges(text, query)
            .into_iter()
            .map(|(r, hit)| (text[r].to_string(), hit))
            .collect()
    }

    #[test]
    fn test_match_ranges_case_insensitive() {
        assert_eq!(
            pieces("Super Supplies", "sup"),
            vec![
                ("Sup".to_string(), true),
                ("er ".to_string(), false),
                ("Sup".to_string(), true),
                ("plies".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_match_ranges_without_hits() {
        assert_eq!(pieces("Acme", "zz"), vec![("Acme".to_string(), false)]);
        assert_eq!(pieces("Acme", "  "), vec![("Acme".to_string(), false)]);
        assert_eq!(pieces("", "a"), vec![(String::new(), false)]);
    }

    #[test]
    fn test_match_at_end() {
        assert_eq!(
            pieces("PO-0012", "12"),
            vec![("PO-00".to_string(), false), ("12".to_string(), true)]
        );
    }
}
