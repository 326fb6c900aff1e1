//! Pro entitlement flag
//!
//! A single persisted boolean. It gates nothing in the core; the CLI only
//! reports it.

use tracing::info;

use crate::storage::{Persistence, ENTITLEMENT_SLOT};

pub struct Entitlement {
    is_pro: bool,
    persistence: Persistence,
}

impl Entitlement {
    /// Load the `isPro` slot, defaulting to free
    pub fn load(persistence: Persistence) -> Self {
        let is_pro = persistence.load(ENTITLEMENT_SLOT, false);
        Self {
            is_pro,
            persistence,
        }
    }

    pub fn is_pro(&self) -> bool {
        self.is_pro
    }

    /// Grant pro; idempotent, and always re-saves the slot
    pub fn upgrade(&mut self) {
        if !self.is_pro {
            info!("Upgraded to pro");
        }
        self.is_pro = true;
        self.persistence.save(ENTITLEMENT_SLOT, &self.is_pro);
    }
}
