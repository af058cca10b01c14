//! Scoped registrations for global pointer events.
//!
//! While a drag or resize is in progress the owning overlay must keep
//! receiving pointer-move and pointer-up events even when the pointer leaves
//! its bounds. An overlay asks [`PointerListeners`] for a
//! [`PointerSubscription`]; the composition root forwards global pointer
//! events to every current subscriber. Dropping the subscription
//! unregisters it, so a gesture that ends for any reason (release, cancel,
//! element destroyed mid-drag) leaves nothing behind.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::overlay::OverlayId;

#[derive(Debug, Default)]
struct Registry {
    next_token: u64,
    active: BTreeMap<u64, OverlayId>,
}

/// Registry of overlays currently listening for global pointer events.
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct PointerListeners {
    inner: Rc<RefCell<Registry>>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `owner` until the returned guard is dropped.
    pub fn subscribe(&self, owner: OverlayId) -> PointerSubscription {
        let mut registry = self.inner.borrow_mut();
        let token = registry.next_token;
        registry.next_token += 1;
        tracing::trace!(overlay = %owner, token, "pointer listener attached");
        registry.active.insert(token, owner);
        PointerSubscription {
            token,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Overlays that should receive the next global pointer event, in
    /// subscription order.
    pub fn subscribers(&self) -> Vec<OverlayId> {
        self.inner.borrow().active.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Live registration in a [`PointerListeners`] registry.
#[derive(Debug)]
pub struct PointerSubscription {
    token: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Some(owner) = registry.borrow_mut().active.remove(&self.token) {
                tracing::trace!(overlay = %owner, token = self.token, "pointer listener detached");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_lifetime_bounds_registration() {
        let listeners = PointerListeners::new();
        let sub = listeners.subscribe(OverlayId::new("a"));
        assert_eq!(listeners.subscribers(), vec![OverlayId::new("a")]);
        drop(sub);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_repeated_subscriptions_do_not_accumulate() {
        let listeners = PointerListeners::new();
        for _ in 0..10 {
            let _sub = listeners.subscribe(OverlayId::new("a"));
            assert_eq!(listeners.len(), 1);
        }
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_subscription_outliving_registry_is_harmless() {
        let listeners = PointerListeners::new();
        let sub = listeners.subscribe(OverlayId::new("a"));
        drop(listeners);
        drop(sub);
    }

    #[test]
    fn test_independent_owners() {
        let listeners = PointerListeners::new();
        let a = listeners.subscribe(OverlayId::new("a"));
        let b = listeners.subscribe(OverlayId::new("b"));
        drop(a);
        assert_eq!(listeners.subscribers(), vec![OverlayId::new("b")]);
        drop(b);
        assert!(listeners.is_empty());
    }
}
