use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;

use super::edit::{EditFlow, SaveRequest};
use super::{lock, ResourceView, ViewState};
use crate::api::{ApiClient, ApiError, Resource};
use crate::models::{Team, User};

/// Users list plus the team choices and edit modal that go with it
#[derive(Clone)]
pub struct UsersView {
    list: ResourceView<User>,
    teams: Arc<Mutex<Vec<Team>>>,
    edit: Arc<Mutex<EditFlow>>,
}

impl Default for UsersView {
    fn default() -> Self {
        Self::new()
    }
}

impl UsersView {
    pub fn new() -> Self {
        Self {
            list: ResourceView::new(Resource::Users),
            teams: Arc::new(Mutex::new(Vec::new())),
            edit: Arc::new(Mutex::new(EditFlow::new())),
        }
    }

    /// Create the view and start loading users and teams on `runtime`
    pub fn mount(client: ApiClient, runtime: &Handle) -> Self {
        let view = Self::new();
        let task = view.clone();

        runtime.spawn(async move {
            task.load(&client).await;
        });

        view
    }

    pub fn list(&self) -> &ResourceView<User> {
        &self.list
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&ViewState<User>) -> R) -> R {
        self.list.with_state(f)
    }

    pub fn with_edit<R>(&self, f: impl FnOnce(&mut EditFlow) -> R) -> R {
        f(&mut lock(&self.edit))
    }

    /// Team names offered for the draft, led by the "no team" choice
    pub fn team_choices(&self) -> Vec<String> {
        std::iter::once(String::new())
            .chain(
                lock(&self.teams)
                    .iter()
                    .map(|t| t.display_name().to_string())
                    .filter(|name| !name.is_empty()),
            )
            .collect()
    }

    pub fn unmount(&self) {
        self.list.unmount();
    }

    /// Load users and teams together. A failed teams fetch only empties the
    /// team choices.
    pub async fn load(&self, client: &ApiClient) -> bool {
        let (users, teams) = tokio::select! {
            _ = self.list.cancelled().cancelled() => return false,
            pair = async {
                tokio::join!(
                    client.list::<User>(Resource::Users),
                    client.list::<Team>(Resource::Teams),
                )
            } => pair,
        };

        if !self.list.is_mounted() {
            return false;
        }

        let teams = teams.unwrap_or_else(|e| {
            tracing::warn!("Could not load teams for the edit form: {}", e);
            Vec::new()
        });
        *lock(&self.teams) = teams;

        self.list.apply(users)
    }

    /// Open the editor for the user at `index` in the loaded list
    pub fn open_edit(&self, index: usize) -> bool {
        let user = self
            .list
            .with_state(|state| state.records().and_then(|users| users.get(index).cloned()));

        match user {
            Some(user) => self.with_edit(|flow| flow.open(&user)),
            None => false,
        }
    }

    /// Open the editor for the user with identifier `id`
    pub fn open_edit_by_id(&self, id: &str) -> bool {
        let index = self.list.with_state(|state| {
            state
                .records()
                .and_then(|users| users.iter().position(|u| u.id.as_deref() == Some(id)))
        });

        index.map_or(false, |index| self.open_edit(index))
    }

    /// Submit the draft: PATCH the user, then re-fetch the whole list.
    ///
    /// The list is only replaced, and the modal only closed, once both calls
    /// succeed. Any failure leaves the modal open with the message.
    pub async fn save(&self, client: &ApiClient) -> Result<(), String> {
        let Some(SaveRequest {
            save_id,
            user_id,
            draft,
        }) = self.with_edit(EditFlow::begin_save)
        else {
            let message = self
                .with_edit(|flow| flow.error().map(str::to_string))
                .unwrap_or_else(|| "Nothing to save".to_string());
            return Err(message);
        };

        let outcome = Self::patch_and_refetch(client, &user_id, &draft).await;

        let result = match outcome {
            Ok(users) => {
                self.list.apply(Ok(users));
                Ok(())
            }
            Err(e) => Err(e.to_string()),
        };

        if self.list.is_mounted() {
            self.with_edit(|flow| flow.finish_save(save_id, result.clone()));
        }

        result
    }

    async fn patch_and_refetch(
        client: &ApiClient,
        user_id: &str,
        draft: &crate::models::UserUpdate,
    ) -> Result<Vec<User>, ApiError> {
        client.update_user(user_id, draft).await?;
        client.list::<User>(Resource::Users).await
    }

    /// Start [`UsersView::save`] in the background
    pub fn spawn_save(&self, client: ApiClient, runtime: &Handle) {
        let task = self.clone();
        runtime.spawn(async move {
            let _ = task.save(&client).await;
        });
    }
}
