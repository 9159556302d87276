//! Edit-profile modal for a single user.
//!
//! `Closed → Editing → Saving → (Closed | Editing with error)`. The flow
//! never touches the network itself: [`EditFlow::begin_save`] hands out the
//! request and [`EditFlow::finish_save`] takes the outcome, so the same state
//! machine drives both the dashboard modal and the `users edit` command.

use crate::models::{User, UserUpdate};

/// Editable field of the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Email,
    Team,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [DraftField::Name, DraftField::Email, DraftField::Team];

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Name => "Name",
            DraftField::Email => "Email",
            DraftField::Team => "Team",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DraftField::Name => DraftField::Email,
            DraftField::Email => DraftField::Team,
            DraftField::Team => DraftField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DraftField::Name => DraftField::Team,
            DraftField::Email => DraftField::Name,
            DraftField::Team => DraftField::Email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Closed,
    Editing {
        user_id: Option<String>,
        user_name: String,
        draft: UserUpdate,
        error: Option<String>,
    },
    Saving {
        save_id: u64,
        user_id: String,
        user_name: String,
        draft: UserUpdate,
    },
}

/// What to send when a save starts. `save_id` must be handed back to
/// [`EditFlow::finish_save`] with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub save_id: u64,
    pub user_id: String,
    pub draft: UserUpdate,
}

#[derive(Debug, Clone)]
pub struct EditFlow {
    state: EditState,
    last_save_id: u64,
}

impl Default for EditFlow {
    fn default() -> Self {
        Self {
            state: EditState::Closed,
            last_save_id: 0,
        }
    }
}

impl EditFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, EditState::Closed)
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.state, EditState::Saving { .. })
    }

    pub fn draft(&self) -> Option<&UserUpdate> {
        match &self.state {
            EditState::Closed => None,
            EditState::Editing { draft, .. } | EditState::Saving { draft, .. } => Some(draft),
        }
    }

    /// Name of the user being edited, as it was when the modal opened
    pub fn target_name(&self) -> Option<&str> {
        match &self.state {
            EditState::Closed => None,
            EditState::Editing { user_name, .. } | EditState::Saving { user_name, .. } => {
                Some(user_name)
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Start editing `user` with a fresh draft. Re-opening while already
    /// editing replaces the draft; opening during a save is refused.
    pub fn open(&mut self, user: &User) -> bool {
        if self.is_saving() {
            tracing::debug!("Ignoring edit request while a save is in flight");
            return false;
        }

        tracing::debug!("Opening editor for user {:?}", user.id);
        self.state = EditState::Editing {
            user_id: user.id.clone().filter(|id| !id.is_empty()),
            user_name: user.display_name().to_string(),
            draft: UserUpdate::from(user),
            error: None,
        };
        true
    }

    /// Mutable access to one draft field while editing
    pub fn field_mut(&mut self, field: DraftField) -> Option<&mut String> {
        match &mut self.state {
            EditState::Editing { draft, .. } => Some(match field {
                DraftField::Name => &mut draft.name,
                DraftField::Email => &mut draft.email,
                DraftField::Team => &mut draft.team,
            }),
            _ => None,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> bool {
        match self.field_mut(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Discard the draft. Never touches the network.
    pub fn cancel(&mut self) {
        if self.is_open() {
            tracing::debug!("Edit cancelled");
        }
        self.state = EditState::Closed;
    }

    /// Move to `Saving` and return the PATCH to issue. Returns `None` when
    /// not editing, or when the target has no identifier (the error is
    /// recorded on the draft instead).
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        let EditState::Editing {
            user_id,
            user_name,
            draft,
            error,
        } = &mut self.state
        else {
            return None;
        };

        let Some(id) = user_id.clone() else {
            *error = Some("This user has no identifier and cannot be updated".to_string());
            return None;
        };

        let user_name = std::mem::take(user_name);
        let draft = std::mem::take(draft);

        self.last_save_id += 1;
        let request = SaveRequest {
            save_id: self.last_save_id,
            user_id: id.clone(),
            draft: draft.clone(),
        };

        self.state = EditState::Saving {
            save_id: self.last_save_id,
            user_id: id,
            user_name,
            draft,
        };

        Some(request)
    }

    /// Settle the save started as `save_id`. Success closes the modal;
    /// failure reopens the draft with the message. Outcomes of any other
    /// save (cancelled, or superseded by a later session) are ignored.
    pub fn finish_save(&mut self, save_id: u64, outcome: Result<(), String>) {
        let (user_id, user_name, draft) =
            match std::mem::replace(&mut self.state, EditState::Closed) {
                EditState::Saving {
                    save_id: current,
                    user_id,
                    user_name,
                    draft,
                } if current == save_id => (user_id, user_name, draft),
                other => {
                    tracing::debug!("Ignoring outcome of stale save #{}", save_id);
                    self.state = other;
                    return;
                }
            };

        match outcome {
            Ok(()) => {
                tracing::info!("Saved user {}", user_id);
            }
            Err(message) => {
                tracing::warn!("Saving user {} failed: {}", user_id, message);
                let message = if message.trim().is_empty() {
                    "Save failed".to_string()
                } else {
                    message
                };
                self.state = EditState::Editing {
                    user_id: Some(user_id),
                    user_name,
                    draft,
                    error: Some(message),
                };
            }
        }
    }
}
