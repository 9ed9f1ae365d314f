//! Tracks which forms have a price lookup in flight.
//!
//! A form may only have one lookup pending at a time. The submit button is
//! disabled on the client while a request is pending, and this guard enforces
//! the same rule on the server for clients that submit anyway.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Error, price_check::FormId};

/// The set of forms that are currently waiting on the price table.
#[derive(Debug, Clone, Default)]
pub struct PendingLookups {
    form_ids: Arc<Mutex<HashSet<FormId>>>,
}

impl PendingLookups {
    /// Mark `form_id` as having a lookup in flight.
    ///
    /// The form is released when the returned guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns [Error::LookupPending] if the form already has a lookup in flight.
    pub fn try_begin(&self, form_id: FormId) -> Result<PendingLookupGuard, Error> {
        if !self.lock().insert(form_id) {
            return Err(Error::LookupPending);
        }

        Ok(PendingLookupGuard {
            form_id,
            form_ids: self.form_ids.clone(),
        })
    }

    /// Whether `form_id` has a lookup in flight.
    #[cfg(test)]
    pub fn is_pending(&self, form_id: FormId) -> bool {
        self.lock().contains(&form_id)
    }

    // A poisoned set of IDs is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashSet<FormId>> {
        self.form_ids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases a form's pending lookup when dropped.
#[derive(Debug)]
pub struct PendingLookupGuard {
    form_id: FormId,
    form_ids: Arc<Mutex<HashSet<FormId>>>,
}

impl Drop for PendingLookupGuard {
    fn drop(&mut self) {
        self.form_ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.form_id);
    }
}
