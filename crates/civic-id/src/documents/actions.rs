use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{DocumentRecord, DocumentStatus, ViewMode};

/// Dialog text shown when a read-only consumer taps a mutating control.
pub const READ_ONLY_DIALOG: &str = "This action is not available in read-only mode.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentAction {
    View,
    Print,
    Delete,
    Renew,
}

impl DocumentAction {
    pub const ALL: [DocumentAction; 4] = [
        DocumentAction::View,
        DocumentAction::Print,
        DocumentAction::Delete,
        DocumentAction::Renew,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DocumentAction::View => "view",
            DocumentAction::Print => "print",
            DocumentAction::Delete => "delete",
            DocumentAction::Renew => "renew",
        }
    }
}

/// How a control is presented. Controls missing from an [`ActionSet`] are hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum ActionState {
    Enabled,
    /// Visible but inert.
    Disabled,
    /// Visible; activating it opens a rejection dialog.
    Rejected { dialog: &'static str },
}

/// Controls exposed on a document card, keyed by action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSet {
    controls: BTreeMap<DocumentAction, ActionState>,
}

impl ActionSet {
    pub fn state(&self, action: DocumentAction) -> Option<ActionState> {
        self.controls.get(&action).copied()
    }

    pub fn is_permitted(&self, action: DocumentAction) -> bool {
        matches!(self.state(action), Some(ActionState::Enabled))
    }

    pub fn is_visible(&self, action: DocumentAction) -> bool {
        self.controls.contains_key(&action)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocumentAction, ActionState)> + '_ {
        self.controls.iter().map(|(action, state)| (*action, *state))
    }

    pub fn views(&self) -> Vec<ActionView> {
        self.iter()
            .map(|(action, state)| ActionView { action, state })
            .collect()
    }

    fn set(&mut self, action: DocumentAction, state: ActionState) {
        self.controls.insert(action, state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionView {
    pub action: DocumentAction,
    #[serde(flatten)]
    pub state: ActionState,
}

/// Compute the controls a card exposes for the given view mode.
///
/// Read-only consumers may only inspect active credentials, and they see every
/// mutating control as a rejection dialog rather than having it hidden.
pub fn permitted_actions(record: &DocumentRecord, mode: ViewMode) -> ActionSet {
    let status = record.effective_status();
    let mut actions = ActionSet::default();

    let view = if mode == ViewMode::Readonly && status != DocumentStatus::Active {
        ActionState::Disabled
    } else {
        ActionState::Enabled
    };
    actions.set(DocumentAction::View, view);

    if mode == ViewMode::Readonly {
        let rejected = ActionState::Rejected {
            dialog: READ_ONLY_DIALOG,
        };
        actions.set(DocumentAction::Print, rejected);
        actions.set(DocumentAction::Delete, rejected);
        actions.set(DocumentAction::Renew, rejected);
        return actions;
    }

    if matches!(status, DocumentStatus::Active | DocumentStatus::Expired) {
        actions.set(DocumentAction::Print, ActionState::Enabled);
    }

    if mode == ViewMode::Service {
        if matches!(status, DocumentStatus::Active | DocumentStatus::Pending) {
            actions.set(DocumentAction::Delete, ActionState::Enabled);
        }
        if status == DocumentStatus::Expired {
            actions.set(DocumentAction::Renew, ActionState::Enabled);
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_views_serialize_with_flattened_state() {
        let view = ActionView {
            action: DocumentAction::Delete,
            state: ActionState::Rejected {
                dialog: READ_ONLY_DIALOG,
            },
        };
        let value = serde_json::to_value(view).expect("serializes");
        assert_eq!(value["action"], "delete");
        assert_eq!(value["state"], "rejected");
        assert_eq!(value["dialog"], READ_ONLY_DIALOG);
    }
}
