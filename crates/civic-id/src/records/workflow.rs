use std::fmt::Debug;

/// Explicit transition table for a tracked status. Re-applying the current status is
/// always accepted as a no-op.
pub trait StatusWorkflow: Copy + Eq + Debug + 'static {
    fn allowed_next(self) -> &'static [Self];
    fn label(self) -> &'static str;

    fn can_transition_to(self, next: Self) -> bool {
        self == next || self.allowed_next().contains(&next)
    }

    fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot move from '{from}' to '{to}'")]
pub struct TransitionError {
    pub from: &'static str,
    pub to: &'static str,
}

pub fn transition<S: StatusWorkflow>(from: S, to: S) -> Result<S, TransitionError> {
    if from.can_transition_to(to) {
        Ok(to)
    } else {
        Err(TransitionError {
            from: from.label(),
            to: to.label(),
        })
    }
}
