//! Resource views: fetch one collection when mounted, then hold the
//! outcome for rendering.

pub mod edit;
pub mod table;
pub mod users;

use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiClient, ApiError, Resource};

pub use edit::{DraftField, EditFlow, EditState, SaveRequest};
pub use table::{build_table, Cell, DateStyle, Table, TableRow, Tabular, Tone};
pub use users::UsersView;

/// Lifecycle of a resource view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn records(&self) -> Option<&[T]> {
        match self {
            ViewState::Loaded(records) => Some(records),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One entity collection and the state of its one-shot load.
///
/// Clones share state, so a spawned load task can publish into the view the
/// dashboard is drawing. Results are only applied while the view is mounted.
pub struct ResourceView<T> {
    resource: Resource,
    state: Arc<Mutex<ViewState<T>>>,
    mounted: CancellationToken,
}

impl<T> Clone for ResourceView<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource,
            state: Arc::clone(&self.state),
            mounted: self.mounted.clone(),
        }
    }
}

impl<T> ResourceView<T> {
    /// A mounted view in the loading state. Nothing is fetched yet.
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            state: Arc::new(Mutex::new(ViewState::Loading)),
            mounted: CancellationToken::new(),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Run `f` against the current state without cloning records
    pub fn with_state<R>(&self, f: impl FnOnce(&ViewState<T>) -> R) -> R {
        f(&lock(&self.state))
    }

    pub fn is_mounted(&self) -> bool {
        !self.mounted.is_cancelled()
    }

    /// Detach the view; in-flight loads stop and late results are dropped
    pub fn unmount(&self) {
        tracing::debug!("Unmounting {} view", self.resource);
        self.mounted.cancel();
    }

    pub(crate) fn cancelled(&self) -> &CancellationToken {
        &self.mounted
    }

    /// Settle the view with a fetch outcome. Returns false when the view was
    /// unmounted and the outcome was discarded.
    pub fn apply(&self, result: Result<Vec<T>, ApiError>) -> bool {
        if !self.is_mounted() {
            tracing::warn!("Dropping {} result for unmounted view", self.resource);
            return false;
        }

        let next = match result {
            Ok(records) => {
                tracing::info!("Loaded {} {}", records.len(), self.resource);
                ViewState::Loaded(records)
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {}", self.resource, e);
                ViewState::Failed(e.to_string())
            }
        };

        *lock(&self.state) = next;
        true
    }
}

impl<T: Clone> ResourceView<T> {
    pub fn snapshot(&self) -> ViewState<T> {
        lock(&self.state).clone()
    }
}

impl<T> ResourceView<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Fetch the collection once and settle the view.
    pub async fn load(&self, client: &ApiClient) -> bool {
        let result = tokio::select! {
            _ = self.mounted.cancelled() => return false,
            result = client.list::<T>(self.resource) => result,
        };

        self.apply(result)
    }

    /// Create the view and start its load on `runtime`
    pub fn mount(resource: Resource, client: ApiClient, runtime: &Handle) -> Self {
        let view = Self::new(resource);
        let task = view.clone();

        runtime.spawn(async move {
            task.load(&client).await;
        });

        view
    }
}
