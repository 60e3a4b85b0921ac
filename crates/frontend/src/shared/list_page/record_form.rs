use crate::shared::modal::Modal;
use crate::shared::record_manager::{SessionMode, TabularRecordManager};
use contracts::shared::record::{FieldDef, FieldKind, Record};
use leptos::prelude::*;
use thaw::*;

fn field_input<R>(manager: RwSignal<TabularRecordManager<R>>, def: &'static FieldDef) -> AnyView
where
    R: Record + Send + Sync + 'static,
{
    let name = def.name;
    let value = move || {
        manager.with(|m| {
            m.session()
                .draft()
                .and_then(|d| d.get(name))
                .map(|v| v.to_string())
                .unwrap_or_default()
        })
    };
    let on_change = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        manager.update(|m| {
            if let Err(e) = m.set_field(name, &raw) {
                log::debug!("{}.{}: {}", R::collection_name(), name, e);
            }
        });
    };

    if def.read_only {
        return view! {
            <input class="form__input form__input--readonly" type="text" prop:value=value disabled=true />
        }
        .into_any();
    }

    match def.kind {
        FieldKind::Choice(options) => view! {
            <select class="form__select" prop:value=value on:change=on_change>
                {options
                    .iter()
                    .map(|option| view! { <option value=*option>{*option}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::Number => view! {
            <input class="form__input" type="number" step="any" prop:value=value on:change=on_change />
        }
        .into_any(),
        FieldKind::Date => view! {
            <input class="form__input" type="date" prop:value=value on:change=on_change />
        }
        .into_any(),
        FieldKind::Text => view! {
            <input class="form__input" type="text" prop:value=value on:change=on_change />
        }
        .into_any(),
    }
}

/// Add/edit dialog for the manager's open session
#[component]
pub fn RecordForm<R>(
    manager: RwSignal<TabularRecordManager<R>>,
    on_save: Callback<()>,
    #[prop(into)] saving: Signal<bool>,
    /// Error not tied to a single field (server rejected the save)
    #[prop(into)]
    error: Signal<Option<String>>,
) -> impl IntoView
where
    R: Record + Send + Sync + 'static,
{
    let title = Signal::derive(move || match manager.with(|m| m.session().mode()) {
        SessionMode::Editing(id) => format!("Edit {} #{}", R::element_name(), id),
        _ => format!("Add {}", R::element_name()),
    });
    let close = Callback::new(move |_| manager.update(|m| m.cancel_edit()));

    let rows = R::fields()
        .iter()
        .map(|def| {
            let name = def.name;
            let field_error = move || manager.with(|m| m.session().field_error(name));
            view! {
                <div class="form__group">
                    <label class="form__label">
                        {def.label}
                        {def.required.then_some(view! { <span class="form__required">" *"</span> })}
                    </label>
                    {field_input(manager, def)}
                    {move || field_error().map(|msg| view! { <div class="form__error">{msg}</div> })}
                </div>
            }
        })
        .collect_view();

    view! {
        <Modal title=title on_close=close>
            {move || error.get().map(|msg| view! { <div class="alert alert--error">{msg}</div> })}
            <div class="form">{rows}</div>
            <div class="form__actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| close.run(())>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_save.run(())
                    disabled=saving
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
            </div>
        </Modal>
    }
}
