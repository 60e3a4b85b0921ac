use crate::shared::list_utils::SearchInput;
use crate::shared::record_manager::{FilterSpec, Predicate, ALL};
use leptos::prelude::*;

/// One input of a list page filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterControl {
    /// Case-insensitive "contains" on a text field; matches are highlighted
    Search {
        field: &'static str,
        placeholder: &'static str,
    },
    /// Dropdown with an "All" entry
    Choice {
        field: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    },
    /// Inclusive from/to dates
    DateRange {
        field: &'static str,
        label: &'static str,
    },
}

impl FilterControl {
    pub const fn search(field: &'static str, placeholder: &'static str) -> Self {
        Self::Search { field, placeholder }
    }

    pub const fn choice(
        field: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self::Choice {
            field,
            label,
            options,
        }
    }

    pub const fn date_range(field: &'static str, label: &'static str) -> Self {
        Self::DateRange { field, label }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::Search { field, .. }
            | Self::Choice { field, .. }
            | Self::DateRange { field, .. } => field,
        }
    }

    /// Predicate this control starts with; it lets every record through
    fn empty_predicate(&self) -> Predicate {
        match self {
            Self::Search { .. } => Predicate::Contains {
                query: String::new(),
            },
            Self::Choice { .. } => Predicate::Choice {
                selected: ALL.to_string(),
            },
            Self::DateRange { .. } => Predicate::DateRange {
                from: None,
                to: None,
            },
        }
    }
}

/// FilterSpec with one pass-everything filter per control, in panel order
pub fn initial_spec(controls: &[FilterControl]) -> FilterSpec {
    controls
        .iter()
        .fold(FilterSpec::new(), |spec, c| spec.with(c.field(), c.empty_predicate()))
}

/// Current search text for a field
pub fn search_query(spec: &FilterSpec, field: &str) -> String {
    match spec.predicate(field) {
        Some(Predicate::Contains { query }) => query.clone(),
        _ => String::new(),
    }
}

fn choice_value(spec: &FilterSpec, field: &str) -> String {
    match spec.predicate(field) {
        Some(Predicate::Choice { selected }) if !selected.is_empty() => selected.clone(),
        _ => ALL.to_string(),
    }
}

fn range_value(spec: &FilterSpec, field: &str) -> (String, String) {
    match spec.predicate(field) {
        Some(Predicate::DateRange { from, to }) => (
            from.clone().unwrap_or_default(),
            to.clone().unwrap_or_default(),
        ),
        _ => (String::new(), String::new()),
    }
}

/// Update one bound of a date range, keeping the other
pub fn with_range_bound(spec: &mut FilterSpec, field: &str, is_from: bool, value: String) {
    let (mut from, mut to) = range_value(spec, field);
    if is_from {
        from = value;
    } else {
        to = value;
    }
    let bound = |s: String| (!s.trim().is_empty()).then_some(s);
    spec.set(
        field,
        Predicate::DateRange {
            from: bound(from),
            to: bound(to),
        },
    );
}

#[component]
pub fn FilterBar(spec: RwSignal<FilterSpec>, controls: Vec<FilterControl>) -> impl IntoView {
    controls
        .into_iter()
        .map(|control| match control {
            FilterControl::Search { field, placeholder } => view! {
                <div class="filter-panel__item">
                    <SearchInput
                        value=Signal::derive(move || spec.with(|s| search_query(s, field)))
                        on_change=Callback::new(move |query: String| {
                            spec.update(|s| s.set(field, Predicate::Contains { query }))
                        })
                        placeholder=placeholder
                    />
                </div>
            }
            .into_any(),
            FilterControl::Choice {
                field,
                label,
                options,
            } => view! {
                <div class="filter-panel__item">
                    <label class="filter-panel__label">{label}</label>
                    <select
                        class="filter-panel__select"
                        prop:value=move || spec.with(|s| choice_value(s, field))
                        on:change=move |ev| {
                            let selected = event_target_value(&ev);
                            spec.update(|s| s.set(field, Predicate::Choice { selected }));
                        }
                    >
                        <option value=ALL>{ALL}</option>
                        {options
                            .iter()
                            .map(|option| view! { <option value=*option>{*option}</option> })
                            .collect_view()}
                    </select>
                </div>
            }
            .into_any(),
            FilterControl::DateRange { field, label } => view! {
                <div class="filter-panel__item">
                    <label class="filter-panel__label">{label}</label>
                    <input
                        type="date"
                        prop:value=move || spec.with(|s| range_value(s, field).0)
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            spec.update(|s| with_range_bound(s, field, true, value));
                        }
                    />
                    <span class="filter-panel__separator">"–"</span>
                    <input
                        type="date"
                        prop:value=move || spec.with(|s| range_value(s, field).1)
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            spec.update(|s| with_range_bound(s, field, false, value));
                        }
                    />
                </div>
            }
            .into_any(),
        })
        .collect_view()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTROLS: &[FilterControl] = &[
        FilterControl::search("supplierName", "Supplier..."),
        FilterControl::choice("status", "Status", &["Pending", "Received"]),
        FilterControl::date_range("orderDate", "Order date"),
    ];

    #[test]
    fn test_initial_spec_is_inactive() {
        let spec = initial_spec(CONTROLS);
        assert_eq!(spec.filters().len(), 3);
        assert_eq!(spec.active_count(), 0);
        assert_eq!(choice_value(&spec, "status"), ALL);
        assert_eq!(search_query(&spec, "supplierName"), "");
    }

    #[test]
    fn test_range_bounds_update_independently() {
        let mut spec = initial_spec(CONTROLS);
        with_range_bound(&mut spec, "orderDate", true, "2024-01-01".into());
        with_range_bound(&mut spec, "orderDate", false, "2024-01-31".into());
        assert_eq!(
            spec.predicate("orderDate"),
            Some(&Predicate::DateRange {
                from: Some("2024-01-01".into()),
                to: Some("2024-01-31".into()),
            })
        );
        with_range_bound(&mut spec, "orderDate", true, String::new());
        assert_eq!(
            range_value(&spec, "orderDate"),
            (String::new(), "2024-01-31".to_string())
        );
        assert_eq!(spec.active_count(), 1);
    }
}
