//! Session identity resolution and the one-time rebind rule.

use uuid::Uuid;

/// Resolve the session identifier for a process run.
///
/// A non-empty explicit id is used verbatim (e.g. a correlation id propagated
/// from an orchestrating process); otherwise a fresh UUID is generated. Pure
/// aside from the RNG; never touches logger state and is callable any number
/// of times.
pub fn resolve_session_id(explicit: Option<&str>) -> String {
    match explicit {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

/// Lock state of a [`SessionBinding`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindState {
    /// The id may still be replaced once
    Open,
    /// The id is final for the remainder of the process
    Locked,
}

/// The session identity held by a logger, enforcing the one-time rebind rule.
///
/// A binding starts out holding a fallback UUID so [`current`](Self::current)
/// is always answerable, even before the logger is initialized.
/// [`adopt`](Self::adopt) installs the caller's id during first
/// initialization without locking; [`seal`](Self::seal) performs the single
/// post-initialization rebind and irreversibly locks the binding.
#[derive(Debug)]
pub struct SessionBinding {
    id: String,
    state: BindState,
}

impl SessionBinding {
    /// Create an unlocked binding holding a fresh fallback id.
    pub fn new() -> Self {
        Self {
            id: resolve_session_id(None),
            state: BindState::Open,
        }
    }

    /// The session id currently in force.
    pub fn current(&self) -> &str {
        &self.id
    }

    /// Whether the id can no longer change.
    pub fn is_locked(&self) -> bool {
        self.state == BindState::Locked
    }

    /// Install a caller-supplied id before the logger is initialized.
    ///
    /// Keeps the fallback id when `explicit` is absent or empty. Does not
    /// lock; no-op once locked.
    pub fn adopt(&mut self, explicit: Option<&str>) {
        if self.state == BindState::Locked {
            return;
        }
        if let Some(id) = explicit {
            if !id.is_empty() {
                self.id = id.to_string();
            }
        }
    }

    /// Attempt the one-time rebind, then lock.
    ///
    /// `candidate` is accepted only if the binding is still open and the id
    /// actually differs; the binding is locked on exit regardless, so only
    /// the first seal after initialization can ever change the id. Returns
    /// whether the id changed.
    pub fn seal(&mut self, candidate: Option<&str>) -> bool {
        if self.state == BindState::Locked {
            return false;
        }
        self.state = BindState::Locked;
        match candidate {
            Some(id) if !id.is_empty() && id != self.id => {
                self.id = id.to_string();
                true
            }
            _ => false,
        }
    }
}

impl Default for SessionBinding {
    fn default() -> Self {
        Self::new()
    }
}
