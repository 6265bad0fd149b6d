use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where an order currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderLifecycle {
    /// In the orders table, shown on the dashboard
    Active,
    /// In the orders table with the defective flag set
    Defective,
    /// Moved to the trash table
    Trashed,
}

impl OrderLifecycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderLifecycle::Active => "active",
            OrderLifecycle::Defective => "defective",
            OrderLifecycle::Trashed => "trashed",
        }
    }

    /// Validate `action` against the current state.
    ///
    /// This is the only place that decides which moves are legal.
    pub fn apply(self, action: &LifecycleAction) -> Result<Transition, LifecycleError> {
        use LifecycleAction::*;
        use OrderLifecycle::*;

        let next = match (self, action) {
            (_, Purge) | (Defective, PurgeDefective) => return Ok(Transition::Gone),
            (Active, MoveToTrash) => Trashed,
            (Trashed, RestoreFromTrash) => Active,
            (Active | Defective, MarkDefective { .. }) => Defective,
            (Defective, EditDefectiveNote { .. }) => Defective,
            (Defective, ClearDefective) => Active,
            (from, action) => {
                return Err(LifecycleError::InvalidTransition {
                    from,
                    action: action.name(),
                })
            }
        };
        Ok(Transition::To(next))
    }
}

impl std::fmt::Display for OrderLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested lifecycle change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LifecycleAction {
    MoveToTrash,
    RestoreFromTrash,
    MarkDefective { note: Option<String> },
    EditDefectiveNote { note: Option<String> },
    ClearDefective,
    Purge,
    /// Permanent delete issued from the defective list
    PurgeDefective,
}

impl LifecycleAction {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleAction::MoveToTrash => "move to trash",
            LifecycleAction::RestoreFromTrash => "restore from trash",
            LifecycleAction::MarkDefective { .. } => "mark defective",
            LifecycleAction::EditDefectiveNote { .. } => "edit defective note",
            LifecycleAction::ClearDefective => "restore from defective",
            LifecycleAction::Purge => "delete permanently",
            LifecycleAction::PurgeDefective => "delete as defective",
        }
    }
}

/// Outcome of a valid transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    To(OrderLifecycle),
    /// Row removed for good
    Gone,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("cannot {action} an order that is {from}")]
    InvalidTransition {
        from: OrderLifecycle,
        action: &'static str,
    },
}
