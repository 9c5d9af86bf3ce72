//! Folder lifecycle events and their dispatcher.
//!
//! Delivery is synchronous and in subscription order. Listeners only see a
//! shared reference to the event, so they cannot call back into the
//! coordinator; follow-up actions go through [`crate::deferred::DeferredQueue`].

use std::collections::VecDeque;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use indexmap::IndexMap;

use crate::button::FolderButton;
use crate::error::FolderError;
use crate::folder::{Folder, FolderId};

/// Discriminant used to subscribe to a class of [`FolderEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderEventKind {
    Created,
    Activated,
    Deactivated,
    Deleted,
    Clicked,
    Renamed,
}

impl FolderEventKind {
    pub const ALL: [FolderEventKind; 6] = [
        FolderEventKind::Created,
        FolderEventKind::Activated,
        FolderEventKind::Deactivated,
        FolderEventKind::Deleted,
        FolderEventKind::Clicked,
        FolderEventKind::Renamed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FolderEventKind::Created => "FOLDER_CREATED",
            FolderEventKind::Activated => "FOLDER_ACTIVATED",
            FolderEventKind::Deactivated => "FOLDER_DEACTIVATED",
            FolderEventKind::Deleted => "FOLDER_DELETED",
            FolderEventKind::Clicked => "FOLDER_CLICKED",
            FolderEventKind::Renamed => "FOLDER_RENAMED",
        }
    }
}

impl fmt::Display for FolderEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pointer button that produced a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Events published by the coordinator.
#[derive(Debug, Clone)]
pub enum FolderEvent {
    /// Storage created a new folder.
    Created { folder: Folder },

    /// A folder became the active one.
    Activated {
        folder: Folder,
        button: FolderButton,
    },

    /// The active folder was toggled off or replaced by nothing.
    Deactivated { folder: Folder },

    /// A folder was removed. Only the pre-deletion identity survives.
    Deleted { id: FolderId, name: String },

    /// A button was clicked, before any state change it causes.
    Clicked {
        button: FolderButton,
        pointer: PointerButton,
    },

    /// A folder was replaced by its renamed value.
    Renamed { previous_name: String, folder: Folder },
}

impl FolderEvent {
    pub fn kind(&self) -> FolderEventKind {
        match self {
            FolderEvent::Created { .. } => FolderEventKind::Created,
            FolderEvent::Activated { .. } => FolderEventKind::Activated,
            FolderEvent::Deactivated { .. } => FolderEventKind::Deactivated,
            FolderEvent::Deleted { .. } => FolderEventKind::Deleted,
            FolderEvent::Clicked { .. } => FolderEventKind::Clicked,
            FolderEvent::Renamed { .. } => FolderEventKind::Renamed,
        }
    }

    /// The folder id this event concerns, if any.
    pub fn folder_id(&self) -> Option<FolderId> {
        match self {
            FolderEvent::Created { folder }
            | FolderEvent::Activated { folder, .. }
            | FolderEvent::Deactivated { folder }
            | FolderEvent::Renamed { folder, .. } => Some(folder.id()),
            FolderEvent::Deleted { id, .. } => Some(*id),
            FolderEvent::Clicked { button, .. } => button.folder_id(),
        }
    }
}

/// What a listener reports back. Errors are logged, never propagated.
pub type ListenerResult = Result<(), String>;

/// Listener failures kept before the oldest are dropped.
pub const MAX_RECORDED_FAULTS: usize = 64;

type Listener = Box<dyn FnMut(&FolderEvent) -> ListenerResult>;

/// Handle returned by [`EventDispatcher::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Subscription {
    kind: FolderEventKind,
    listener: Listener,
}

/// Typed publish/subscribe bus for folder events.
pub struct EventDispatcher {
    /// Insertion order is delivery order.
    subscriptions: IndexMap<SubscriptionId, Subscription>,
    next_id: u64,
    faults: VecDeque<FolderError>,
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscriptions", &self.subscriptions.len())
            .field("faults", &self.faults.len())
            .finish()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            subscriptions: IndexMap::new(),
            next_id: 1,
            faults: VecDeque::new(),
        }
    }

    /// Register `listener` for events of `kind`.
    pub fn subscribe<F>(&mut self, kind: FolderEventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&FolderEvent) -> ListenerResult + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.insert(
            id,
            Subscription {
                kind,
                listener: Box::new(listener),
            },
        );
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.shift_remove(&id).is_some()
    }

    pub fn subscriber_count(&self, kind: FolderEventKind) -> usize {
        self.subscriptions
            .values()
            .filter(|s| s.kind == kind)
            .count()
    }

    /// Deliver `event` to every matching listener, in subscription order.
    ///
    /// A listener that returns an error or panics is logged and recorded in
    /// [`EventDispatcher::faults`]; the remaining listeners still run.
    /// Returns the number of listeners that completed successfully.
    pub fn publish(&mut self, event: &FolderEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;

        for (id, subscription) in self.subscriptions.iter_mut() {
            if subscription.kind != kind {
                continue;
            }

            let listener = &mut subscription.listener;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener(event)));
            let message = match outcome {
                Ok(Ok(())) => {
                    delivered += 1;
                    continue;
                }
                Ok(Err(message)) => message,
                Err(payload) => panic_message(payload.as_ref()),
            };

            tracing::warn!("listener {:?} failed on {}: {}", id, kind, message);
            if self.faults.len() == MAX_RECORDED_FAULTS {
                self.faults.pop_front();
            }
            self.faults.push_back(FolderError::ListenerFault { kind, message });
        }

        tracing::trace!("{} delivered to {} listeners", kind, delivered);
        delivered
    }

    /// Listener failures recorded since the last [`EventDispatcher::take_faults`],
    /// oldest first. Only the newest [`MAX_RECORDED_FAULTS`] are kept.
    pub fn faults(&self) -> &VecDeque<FolderError> {
        &self.faults
    }

    pub fn take_faults(&mut self) -> Vec<FolderError> {
        self.faults.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn created(id: u32) -> FolderEvent {
        FolderEvent::Created {
            folder: Folder::new(FolderId(id), "Ores"),
        }
    }

    #[test]
    fn test_delivery_in_subscription_order() {
        let mut dispatcher = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let log = log.clone();
            dispatcher.subscribe(FolderEventKind::Created, move |_| {
                log.borrow_mut().push(tag);
                Ok(())
            });
        }

        assert_eq!(dispatcher.publish(&created(1)), 3);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_kind_filtering() {
        let mut dispatcher = EventDispatcher::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        dispatcher.subscribe(FolderEventKind::Deleted, move |event| {
            if let FolderEvent::Deleted { id, name } = event {
                assert_eq!(*id, FolderId(2));
                assert_eq!(name, "Old");
            }
            *counter.borrow_mut() += 1;
            Ok(())
        });

        dispatcher.publish(&created(1));
        assert_eq!(*hits.borrow(), 0);

        dispatcher.publish(&FolderEvent::Deleted {
            id: FolderId(2),
            name: "Old".into(),
        });
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_faulty_listeners_are_contained() {
        let mut dispatcher = EventDispatcher::new();
        let reached = Rc::new(RefCell::new(false));

        dispatcher.subscribe(FolderEventKind::Created, |_| Err("disk full".into()));
        dispatcher.subscribe(FolderEventKind::Created, |_| panic!("listener bug"));
        let flag = reached.clone();
        dispatcher.subscribe(FolderEventKind::Created, move |_| {
            *flag.borrow_mut() = true;
            Ok(())
        });

        assert_eq!(dispatcher.publish(&created(1)), 1);
        assert!(*reached.borrow());

        let faults = dispatcher.take_faults();
        assert_eq!(faults.len(), 2);
        assert!(faults.iter().all(FolderError::is_listener_fault));
        assert_eq!(
            faults[1],
            FolderError::ListenerFault {
                kind: FolderEventKind::Created,
                message: "panicked: listener bug".into(),
            }
        );
        assert!(dispatcher.faults().is_empty());
    }

    #[test]
    fn test_fault_log_keeps_newest() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.subscribe(FolderEventKind::Created, |event| {
            Err(format!("rejected {:?}", event.folder_id()))
        });

        for id in 0..(MAX_RECORDED_FAULTS as u32 + 10) {
            dispatcher.publish(&created(id));
        }

        let faults = dispatcher.faults();
        assert_eq!(faults.len(), MAX_RECORDED_FAULTS);
        assert_eq!(
            faults.front(),
            Some(&FolderError::ListenerFault {
                kind: FolderEventKind::Created,
                message: "rejected Some(FolderId(10))".into(),
            })
        );
    }

    #[test]
    fn test_unsubscribe_preserves_order() {
        let mut dispatcher = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ids = Vec::new();
        for tag in 0..4 {
            let log = log.clone();
            ids.push(dispatcher.subscribe(FolderEventKind::Created, move |_| {
                log.borrow_mut().push(tag);
                Ok(())
            }));
        }

        assert!(dispatcher.unsubscribe(ids[1]));
        assert!(!dispatcher.unsubscribe(ids[1]));
        dispatcher.publish(&created(1));
        assert_eq!(*log.borrow(), vec![0, 2, 3]);
        assert_eq!(dispatcher.subscriber_count(FolderEventKind::Created), 3);
    }
}
