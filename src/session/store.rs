//! Shared session handle
//!
//! Holds the current session value for the server. Transitions run under
//! the lock and replace the stored value.

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use super::CalculatorSession;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session state lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Cloneable handle to one calculator session
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<CalculatorSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, CalculatorSession>> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Copy of the current session
    pub fn snapshot(&self) -> StoreResult<CalculatorSession> {
        Ok(self.lock()?.clone())
    }

    /// Replace the session with the result of a transition
    ///
    /// Returns the previous and the new session.
    pub fn apply<F>(&self, f: F) -> StoreResult<(CalculatorSession, CalculatorSession)>
    where
        F: FnOnce(&CalculatorSession) -> CalculatorSession,
    {
        let mut guard = self.lock()?;
        let next = f(&guard);
        let previous = std::mem::replace(&mut *guard, next.clone());
        Ok((previous, next))
    }
}
