//! Generic admin list page: filter panel, pager, table and add/edit dialog
//!
//! Each entity page only lists its columns and filter inputs; loading,
//! filtering, paging, editing and deleting are shared.

pub mod confirm;
pub mod filter_bar;
pub mod record_form;
pub mod state;

use self::confirm::BrowserConfirmer;
use self::filter_bar::{initial_spec, search_query, FilterBar, FilterControl};
use self::record_form::RecordForm;
use self::state::ListViewState;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::{api_base, HttpGateway};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::AppConfig;
use crate::shared::icons::icon;
use crate::shared::list_utils::highlight_matches;
use crate::shared::record_manager::gateway::{delete_record, load, save_draft};
use crate::shared::record_manager::{LoadOutcome, TabularRecordManager};
use contracts::shared::record::{Record, RecordId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use thaw::*;

/// Manager for a freshly opened page. In local mode it starts with the
/// record type's sample list, since nothing is ever fetched.
pub fn initial_manager<R: Record>(config: &AppConfig) -> TabularRecordManager<R> {
    let manager = TabularRecordManager::with_settings(
        config.list.page_size,
        &config.list.page_sizes,
        config.edit.numeric_input,
    );
    if config.is_remote() {
        manager
    } else {
        manager.with_records(R::sample_records())
    }
}

fn column_label<R: Record>(field: &str) -> String {
    match R::field_def(field) {
        Some(def) => def.label.to_string(),
        None if field == "id" => "ID".to_string(),
        None => field.to_string(),
    }
}

#[component]
pub fn RecordListPage<R>(
    /// Key of the page; also keys the remembered filters and paging
    page_key: &'static str,
    /// Field names shown as table columns
    columns: &'static [&'static str],
    /// Inputs of the filter panel
    filters: Vec<FilterControl>,
    /// Numeric fields summed over the filtered list
    #[prop(optional)]
    totals: &'static [&'static str],
    /// Record type marker, filled in by `<RecordListPage<R> .../>`
    #[prop(optional)]
    record_type: PhantomData<R>,
) -> impl IntoView
where
    R: Record + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let _ = record_type;
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let config = use_context::<AppConfig>().unwrap_or_default();

    let manager = RwSignal::new(initial_manager::<R>(&config));
    let page_sizes = manager.with_untracked(|m| m.paginator().page_sizes().to_vec());

    // None in local mode: changes stay in the browser
    let remote_base = StoredValue::new(
        config
            .is_remote()
            .then(|| api_base(&config.api.base_url)),
    );
    let gateway = move || remote_base.get_value().map(HttpGateway::<R>::new);

    let search_fields: Vec<&'static str> = filters
        .iter()
        .filter(|c| matches!(c, FilterControl::Search { .. }))
        .map(|c| c.field())
        .collect();

    // Restore what the page showed last time
    let filter_spec = RwSignal::new(initial_spec(&filters));
    let controls = StoredValue::new(filters);
    let pending_page = StoredValue::new(None::<usize>);
    if let Some(saved) = ctx
        .get_form_state(page_key)
        .and_then(|v| serde_json::from_value::<ListViewState>(v).ok())
    {
        filter_spec.set(saved.filters.clone());
        let restored = manager.try_update(|m| saved.restore(m));
        if restored != Some(true) {
            pending_page.set_value(Some(saved.page_number));
        }
    }

    let (is_filter_expanded, set_is_filter_expanded) = signal(false);
    let (saving, set_saving) = signal(false);
    let form_error = RwSignal::new(None::<String>);
    let action_error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let spec = filter_spec.get();
        manager.update(|m| m.set_filters(spec));
    });

    Effect::new(move |_| {
        let state = manager.with(ListViewState::capture);
        match serde_json::to_value(&state) {
            Ok(value) => ctx.set_form_state(page_key.to_string(), value),
            Err(e) => log::warn!("{}: could not save list state: {}", page_key, e),
        }
    });

    let reload = move || {
        action_error.set(None);
        spawn_local(async move {
            let Some(gateway) = gateway() else {
                log::debug!("{}: local mode, nothing to load", R::collection_name());
                return;
            };
            match load::<R, _, _>(&manager, &gateway).await {
                Ok(LoadOutcome::Applied(_)) => {
                    if let Some(page) = pending_page.try_update_value(|p| p.take()).flatten() {
                        manager.update(|m| {
                            let _ = m.go_to_page(page);
                        });
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("{}: {}", R::collection_name(), e),
            }
        });
    };
    reload();

    let open_create = move || {
        form_error.set(None);
        manager.update(|m| m.open_create());
    };

    let open_edit = move |id: RecordId| {
        form_error.set(None);
        let opened = manager.try_update(|m| m.open_edit(id));
        if let Some(Err(e)) = opened {
            action_error.set(Some(e.to_string()));
        }
    };

    let remove = move |id: RecordId| {
        action_error.set(None);
        spawn_local(async move {
            let gateway = gateway();
            if let Err(e) = delete_record::<R, _, _, _>(&manager, gateway.as_ref(), &BrowserConfirmer, id).await {
                action_error.set(Some(e.to_string()));
            }
        });
    };

    let save = Callback::new(move |_: ()| {
        if saving.get_untracked() {
            return;
        }
        set_saving.set(true);
        form_error.set(None);
        spawn_local(async move {
            let gateway = gateway();
            if let Err(e) = save_draft::<R, _, _>(&manager, gateway.as_ref()).await {
                form_error.set(Some(e.to_string()));
            }
            set_saving.set(false);
        });
    });

    let active_filters_count = Signal::derive(move || filter_spec.with(|s| s.active_count()));
    let search_terms = move || {
        filter_spec.with(|s| {
            search_fields
                .iter()
                .map(|f| (*f, search_query(s, f)))
                .collect::<Vec<_>>()
        })
    };

    let header_cells = columns
        .iter()
        .map(|c| view! { <th class="table__header-cell">{column_label::<R>(c)}</th> })
        .collect_view();

    let rows = move || {
        let records = manager.with(|m| m.page_records().into_iter().cloned().collect::<Vec<R>>());
        if records.is_empty() {
            let text = if manager.with(|m| m.is_loading()) {
                "Loading..."
            } else {
                "No records found"
            };
            return view! {
                <tr><td class="table__empty" colspan={(columns.len() + 1).to_string()}>{text}</td></tr>
            }
            .into_any();
        }
        let terms = search_terms();
        records
            .into_iter()
            .map(|record| {
                let id = record.id();
                let cells = columns
                    .iter()
                    .map(|c| {
                        let text = record.get(c).map(|v| v.to_string()).unwrap_or_default();
                        let cell = match terms.iter().find(|(field, _)| field == c) {
                            Some((_, query)) => highlight_matches(&text, query),
                            None => text.into_any(),
                        };
                        view! { <td class="table__cell">{cell}</td> }
                    })
                    .collect_view();
                view! {
                    <tr class="table__row">
                        {cells}
                        <td class="table__cell table__cell--actions">
                            <button class="button button--icon" title="Edit" on:click=move |_| open_edit(id)>
                                {icon("pencil")}
                            </button>
                            <button class="button button--icon button--danger" title="Delete" on:click=move |_| remove(id)>
                                {icon("trash")}
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    let totals_row = move || {
        (!totals.is_empty()).then(|| {
            let cells = columns
                .iter()
                .map(|c| {
                    let value = totals
                        .contains(c)
                        .then(|| format!("{:.2}", manager.with(|m| m.filtered_total(c))))
                        .unwrap_or_default();
                    view! { <td class="table__cell table__cell--total">{value}</td> }
                })
                .collect_view();
            view! { <tr class="table__totals">{cells}<td></td></tr> }
        })
    };

    view! {
        <div id=format!("{}--list", page_key) class="page" data-page-category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{R::list_name()}</h1>
                    <span class="badge badge--primary">
                        {move || manager.with(|m| m.store().len()).to_string()}
                    </span>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_create()>
                        {format!("Add {}", R::element_name())}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div
                            class="filter-panel-header__left"
                            on:click=move |_| set_is_filter_expanded.update(|e| *e = !*e)
                        >
                            <span class="filter-panel__title">"Filters"</span>
                            {move || {
                                let count = active_filters_count.get();
                                (count > 0).then(|| view! { <span class="filter-panel__badge">{count}</span> })
                            }}
                        </div>

                        <div class="filter-panel-header__center">
                            <PaginationControls
                                current_page=Signal::derive(move || manager.with(|m| m.window().page_number))
                                items_per_page=Signal::derive(move || manager.with(|m| m.window().page_size))
                                total_items=Signal::derive(move || manager.with(|m| m.filtered_count()))
                                on_page_change=Callback::new(move |page: usize| {
                                    manager.update(|m| {
                                        let _ = m.go_to_page(page);
                                    })
                                })
                                on_page_size_change=Callback::new(move |size: usize| {
                                    manager.update(|m| {
                                        let _ = m.set_page_size(size);
                                    })
                                })
                                page_sizes=page_sizes
                            />
                        </div>

                        <div class="filter-panel-header__right">
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| filter_spec.set(controls.with_value(|c| initial_spec(c)))
                                disabled=Signal::derive(move || active_filters_count.get() == 0)
                            >
                                "Clear filters"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| reload()
                                disabled=Signal::derive(move || manager.with(|m| m.is_loading()))
                            >
                                {move || if manager.with(|m| m.is_loading()) { "Loading..." } else { "Refresh" }}
                            </Button>
                        </div>
                    </div>

                    <Show when=move || is_filter_expanded.get()>
                        <div class="filter-panel-content">
                            <FilterBar spec=filter_spec controls=controls.get_value() />
                        </div>
                    </Show>
                </div>

                {move || manager.with(|m| m.error().map(str::to_string)).map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}
                {move || action_error.get().map(|err| view! {
                    <div class="alert alert--warning">{err}</div>
                })}

                <div class="table-wrapper">
                    <table class="table">
                        <thead>
                            <tr>
                                {header_cells}
                                <th class="table__header-cell table__header-cell--actions"></th>
                            </tr>
                        </thead>
                        <tbody>{rows}</tbody>
                        <tfoot>{totals_row}</tfoot>
                    </table>
                </div>
            </div>

            <Show when=move || manager.with(|m| m.session().is_open())>
                <RecordForm
                    manager=manager
                    on_save=save
                    saving=saving
                    error=form_error
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_purchase_order::aggregate::PurchaseOrder;

    fn local_config() -> AppConfig {
        AppConfig::from_toml(Some("[persistence]\nmode = \"local\"")).unwrap()
    }

    #[test]
    fn test_local_mode_starts_with_sample_records() {
        let m = initial_manager::<PurchaseOrder>(&local_config());
        let samples = PurchaseOrder::sample_records();
        assert!(!samples.is_empty());
        assert_eq!(m.store().len(), samples.len());
        assert_eq!(m.filtered_count(), samples.len());
        assert_eq!(m.window().page_number, 1);
        assert!(!m.is_loading());
    }

    #[test]
    fn test_remote_mode_starts_empty() {
        let m = initial_manager::<PurchaseOrder>(&AppConfig::default());
        assert!(m.store().is_empty());
        assert_eq!(m.window().page_size, AppConfig::default().list.page_size);
    }

    #[test]
    fn test_props_carry_record_type() {
        let _props = RecordListPageProps::<PurchaseOrder>::builder()
            .page_key("a002_purchase_order")
            .columns(&["orderNumber", "total"])
            .filters(Vec::new())
            .build();
        assert_eq!(column_label::<PurchaseOrder>("total"), "Total");
        assert_eq!(column_label::<PurchaseOrder>("id"), "ID");
    }
}
