//! Per-call execution state machine.
//!
//! ```text
//! Validating --InputRejected--> Failed
//! Validating --InputAccepted--> Attempting(0)
//! Attempting(k) --AttemptSucceeded--> Succeeded
//! Attempting(k) --AttemptFailed(Transient), k < max--> Attempting(k+1)
//! Attempting(k) --AttemptFailed(Transient), k == max--> Failed
//! Attempting(k) --AttemptFailed(Permanent)--> Failed
//! ```

use super::{FailureClass, InvalidTransition};

/// Where a single call is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionState {
    /// Input is being checked against the schema.
    Validating,
    /// Capability attempt `attempt` (zero based) is in flight.
    Attempting {
        /// Zero-based attempt index; equals the retries performed so far.
        attempt: u32,
    },
    /// Terminal: the capability produced a payload.
    Succeeded {
        /// Retries performed before success.
        retry_count: u32,
    },
    /// Terminal: validation failed, a permanent error occurred, or retries
    /// were exhausted.
    Failed {
        /// Retries performed before giving up.
        retry_count: u32,
    },
}

/// Input to [`ExecutionState::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttemptEvent {
    /// Input satisfied the schema.
    InputAccepted,
    /// Input violated the schema.
    InputRejected,
    /// The capability call returned a payload.
    AttemptSucceeded,
    /// The capability call failed with the given classification.
    AttemptFailed(FailureClass),
}

impl ExecutionState {
    /// Applies `event`, given the configured retry cap.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] for events that do not apply to the
    /// current state, including any event applied to a terminal state.
    pub const fn transition(
        self,
        event: AttemptEvent,
        max_retries: u32,
    ) -> Result<Self, InvalidTransition> {
        match (self, event) {
            (Self::Validating, AttemptEvent::InputAccepted) => Ok(Self::Attempting { attempt: 0 }),
            (Self::Validating, AttemptEvent::InputRejected) => Ok(Self::Failed { retry_count: 0 }),
            (Self::Attempting { attempt }, AttemptEvent::AttemptSucceeded) => {
                Ok(Self::Succeeded {
                    retry_count: attempt,
                })
            }
            (Self::Attempting { attempt }, AttemptEvent::AttemptFailed(FailureClass::Transient))
                if attempt < max_retries =>
            {
                Ok(Self::Attempting {
                    attempt: attempt.saturating_add(1),
                })
            }
            (Self::Attempting { attempt }, AttemptEvent::AttemptFailed(_)) => Ok(Self::Failed {
                retry_count: attempt,
            }),
            (from, _) => Err(InvalidTransition { from, event }),
        }
    }

    /// Returns `true` for `Succeeded` and `Failed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }

    /// Returns the retries performed so far.
    #[must_use]
    pub const fn retry_count(self) -> u32 {
        match self {
            Self::Validating => 0,
            Self::Attempting { attempt } => attempt,
            Self::Succeeded { retry_count } | Self::Failed { retry_count } => retry_count,
        }
    }
}
