use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Shell state shared by every page
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    /// Key of the page shown in the content area
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
    /// Per-page view state (filters, paging), restored when a page is revisited
    pub form_states: RwSignal<HashMap<String, serde_json::Value>>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
            form_states: RwSignal::new(HashMap::new()),
        }
    }

    pub fn get_form_state(&self, form_key: &str) -> Option<serde_json::Value> {
        self.form_states
            .with_untracked(|states| states.get(form_key).cloned())
    }

    pub fn set_form_state(&self, form_key: String, state: serde_json::Value) {
        self.form_states.update(|states| {
            states.insert(form_key, state);
        });
    }

    /// Open the page named by `?active=` (or `fallback`) and keep the URL in sync
    pub fn init_router_integration(&self, fallback: &str, is_known: fn(&str) -> bool) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let key = active_from_query(&search)
            .filter(|key| is_known(key))
            .unwrap_or_else(|| fallback.to_string());
        self.open_page(&key);

        let this = *self;
        Effect::new(move |_| {
            if let Some(active_key) = this.active.get() {
                let new_url = format!("?{}", query_for(&active_key));
                let current_search = window()
                    .and_then(|w| w.location().search().ok())
                    .unwrap_or_default();

                // Only update URL if it actually changed
                if current_search != new_url {
                    if let Some(w) = window() {
                        if let Ok(history) = w.history() {
                            let _ = history.replace_state_with_url(
                                &wasm_bindgen::JsValue::NULL,
                                "",
                                Some(&new_url),
                            );
                        }
                    }
                }
            }
        });
    }

    pub fn open_page(&self, key: &str) {
        log::debug!("open_page: {}", key);
        self.active.set(Some(key.to_string()));
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

/// Page key from a `?active=...` query string
pub fn active_from_query(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").filter(|k| !k.is_empty()).cloned()
}

pub fn query_for(active_key: &str) -> String {
    serde_qs::to_string(&HashMap::from([("active", active_key)])).unwrap_or_default()
}
