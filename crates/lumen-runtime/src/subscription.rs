//! Scoped input subscriptions.
//!
//! The host dispatches pointer and resize notifications into an [`InputHub`].
//! Each mounted engine holds a [`Subscription`]: a mailbox that keeps only
//! the latest pointer state and the latest viewport (no queue, last write
//! wins). Dropping the subscription unregisters it, so a torn-down engine
//! never receives another event and remounts never accumulate handlers.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use lumen_core::{InputEvent, Ndc, Viewport};

/// Latest input observed since the last drain.
#[derive(Debug, Default)]
struct Mailbox {
    /// `Some(None)` records that the pointer left the surface.
    pointer: Cell<Option<Option<Ndc>>>,
    viewport: Cell<Option<Viewport>>,
}

#[derive(Debug, Default)]
struct HubInner {
    next_id: u64,
    slots: Vec<(u64, Rc<Mailbox>)>,
}

/// Fan-out point for host input notifications.
///
/// Cloning yields another handle to the same hub.
#[derive(Debug, Clone, Default)]
pub struct InputHub {
    inner: Rc<RefCell<HubInner>>,
}

impl InputHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new mailbox. It stays registered until the returned
    /// handle is dropped.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let mailbox = Rc::new(Mailbox::default());
        inner.slots.push((id, Rc::clone(&mailbox)));
        Subscription {
            id,
            mailbox,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every live subscription. Returns how many
    /// subscriptions received it.
    pub fn dispatch(&self, event: InputEvent) -> usize {
        let inner = self.inner.borrow();
        for (_, mailbox) in &inner.slots {
            match event {
                InputEvent::PointerMove(ndc) => mailbox.pointer.set(Some(Some(ndc))),
                InputEvent::PointerLeave => mailbox.pointer.set(Some(None)),
                InputEvent::Resize(vp) => mailbox.viewport.set(Some(vp)),
            }
        }
        inner.slots.len()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }
}

/// Registration handle; unregisters on drop.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    mailbox: Rc<Mailbox>,
    hub: Weak<RefCell<HubInner>>,
}

impl Subscription {
    /// Take the latest pointer update, if one arrived since the last take.
    pub fn take_pointer(&self) -> Option<Option<Ndc>> {
        self.mailbox.pointer.take()
    }

    /// Take the latest viewport, if a resize arrived since the last take.
    pub fn take_viewport(&self) -> Option<Viewport> {
        self.mailbox.viewport.take()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().slots.retain(|(id, _)| *id != self.id);
        }
    }
}
