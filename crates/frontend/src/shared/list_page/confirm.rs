use crate::shared::record_manager::gateway::Confirmer;
use async_trait::async_trait;

/// Native `window.confirm` dialog
pub struct BrowserConfirmer;

#[async_trait(?Send)]
impl Confirmer for BrowserConfirmer {
    async fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
