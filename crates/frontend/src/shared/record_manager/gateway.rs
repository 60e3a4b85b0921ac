//! Async orchestration between a list manager and the remote API
//!
//! State lives in a reactive signal on the page, so the manager is reached
//! through a [`ManagerHandle`] for short synchronous steps. No borrow of the
//! manager is held while a gateway call is in flight.

use super::edit_session::{CommitError, PreparedCommit};
use super::store::{LoadOutcome, StoreError};
use super::TabularRecordManager;
use async_trait::async_trait;
use contracts::shared::api::ApiError;
use contracts::shared::record::{Record, RecordId};
use leptos::prelude::{RwSignal, Update};
use std::cell::RefCell;
use thiserror::Error;

/// Remote persistence for one entity
#[async_trait(?Send)]
pub trait RecordGateway<R: Record> {
    async fn fetch_all(&self) -> Result<Vec<R>, ApiError>;

    /// Create (`is_new`) or update; returns the record as stored by the server
    async fn save(&self, record: &R, is_new: bool) -> Result<R, ApiError>;

    async fn delete(&self, id: RecordId) -> Result<(), ApiError>;
}

/// Asks the user to confirm a destructive action
#[async_trait(?Send)]
pub trait Confirmer {
    async fn confirm(&self, message: &str) -> bool;
}

/// Short mutable access to a manager owned elsewhere.
/// Returns `None` when the owner is gone (page closed).
pub trait ManagerHandle<R> {
    fn with_mut<T>(&self, f: impl FnOnce(&mut TabularRecordManager<R>) -> T) -> Option<T>;
}

impl<R: Record> ManagerHandle<R> for RefCell<TabularRecordManager<R>> {
    fn with_mut<T>(&self, f: impl FnOnce(&mut TabularRecordManager<R>) -> T) -> Option<T> {
        let mut manager = self.try_borrow_mut().ok()?;
        Some(f(&mut manager))
    }
}

impl<R> ManagerHandle<R> for RwSignal<TabularRecordManager<R>>
where
    R: Record + Send + Sync + 'static,
{
    fn with_mut<T>(&self, f: impl FnOnce(&mut TabularRecordManager<R>) -> T) -> Option<T> {
        self.try_update(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("The list was closed before the request finished")]
    Detached,
}

/// Fetch the whole list and replace the store, unless a newer load already landed
pub async fn load<R, H, G>(handle: &H, gateway: &G) -> Result<LoadOutcome, ManagerError>
where
    R: Record,
    H: ManagerHandle<R> + ?Sized,
    G: RecordGateway<R> + ?Sized,
{
    let ticket = handle
        .with_mut(|m| m.begin_load())
        .ok_or(ManagerError::Detached)?;
    let result = gateway.fetch_all().await;
    handle
        .with_mut(|m| m.finish_load(ticket, result))
        .ok_or(ManagerError::Detached)
}

/// Validate the open draft and store it.
///
/// With a gateway the server write comes first and the local list only
/// changes once it succeeded; on failure the form stays open with the draft.
/// Without a gateway the draft is stored locally.
pub async fn save_draft<R, H, G>(handle: &H, gateway: Option<&G>) -> Result<RecordId, ManagerError>
where
    R: Record,
    H: ManagerHandle<R> + ?Sized,
    G: RecordGateway<R> + ?Sized,
{
    let prepared = handle
        .with_mut(|m| m.prepare_commit())
        .ok_or(ManagerError::Detached)??;

    let (prepared, keep_remote_id) = match gateway {
        Some(gateway) => {
            let saved = gateway.save(&prepared.record, prepared.is_new()).await?;
            let prepared = PreparedCommit {
                record: saved,
                ..prepared
            };
            (prepared, true)
        }
        None => (prepared, false),
    };

    let id = handle
        .with_mut(|m| m.finish_commit(prepared, keep_remote_id))
        .ok_or(ManagerError::Detached)??;
    log::info!("{}: saved record {}", R::collection_name(), id);
    Ok(id)
}

/// Ask for confirmation, then delete remotely (when a gateway is given) and locally.
/// Returns `false` when the user declined.
pub async fn delete_record<R, H, G, C>(
    handle: &H,
    gateway: Option<&G>,
    confirmer: &C,
    id: RecordId,
) -> Result<bool, ManagerError>
where
    R: Record,
    H: ManagerHandle<R> + ?Sized,
    G: RecordGateway<R> + ?Sized,
    C: Confirmer + ?Sized,
{
    let exists = handle
        .with_mut(|m| m.get(id).is_some())
        .ok_or(ManagerError::Detached)?;
    if !exists {
        return Err(StoreError::StaleReference(id).into());
    }

    let message = format!(
        "Are you sure you want to delete this {}?",
        R::element_name().to_lowercase()
    );
    if !confirmer.confirm(&message).await {
        return Ok(false);
    }

    if let Some(gateway) = gateway {
        gateway.delete(id).await?;
    }

    handle
        .with_mut(|m| m.remove(id))
        .ok_or(ManagerError::Detached)??;
    log::info!("{}: deleted record {}", R::collection_name(), id);
    Ok(true)
}
