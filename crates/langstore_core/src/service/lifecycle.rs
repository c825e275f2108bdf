//! Manager lifecycle state machine.
//!
//! # Invariants
//! - Only `Initialized` admits key/locale operations.
//! - `Destroyed` guards like `Uninitialized` and may be re-initialized.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Initialized,
    Destroyed,
}

impl LifecycleState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Destroyed => "destroyed",
        }
    }
}

/// Operation attempted outside the `Initialized` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleError {
    pub state: LifecycleState,
}

impl Display for LifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "language manager is not initialized (state: {})", self.state.as_str())
    }
}

impl Error for LifecycleError {}

/// Guarded lifecycle holder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == LifecycleState::Initialized
    }

    /// Moves to `Initialized`. Returns `false` when already there.
    pub fn init(&mut self) -> bool {
        if self.is_initialized() {
            return false;
        }
        self.state = LifecycleState::Initialized;
        true
    }

    /// Moves to `Destroyed`. Returns `false` when not initialized.
    pub fn destroy(&mut self) -> bool {
        if !self.is_initialized() {
            return false;
        }
        self.state = LifecycleState::Destroyed;
        true
    }

    pub fn ensure_initialized(&self) -> Result<(), LifecycleError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(LifecycleError { state: self.state })
        }
    }
}
