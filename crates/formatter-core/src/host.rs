use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::geometry::{Rect, Size};

/// Handle to an embedded node in the host document. The formatter never owns
/// the node; it reads and writes attributes, inline style and geometry
/// through this interface.
pub trait HostElement {
    /// Lowercase tag name of the underlying node ("img", "iframe", ...).
    fn tag(&self) -> &str;

    fn attr(&self, name: &str) -> Option<String>;
    fn set_attr(&mut self, name: &str, value: &str);
    fn remove_attr(&mut self, name: &str);

    fn style(&self, property: &str) -> Option<String>;
    /// `None` clears the property.
    fn set_style(&mut self, property: &str, value: Option<&str>);

    /// Bounding box in viewport coordinates.
    fn bounds(&self) -> Rect;

    /// Intrinsic size of the media, if known (e.g. a loaded image).
    fn natural_size(&self) -> Option<Size>;

    /// False once the node has been removed from the document.
    fn is_attached(&self) -> bool;
}

pub type ElementHandle = Rc<RefCell<dyn HostElement>>;

/// Events the host delivers to geometry subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A scrollable ancestor of the editor scrolled.
    Scroll,
    /// The window or the editor container was resized.
    Resize,
    /// The document content changed.
    DocumentChanged,
}

pub type Listener = Rc<dyn Fn()>;

/// The editor surface the formatter is attached to.
pub trait HostEditor {
    /// Bounds of the positioned ancestor that anchors the overlay, in
    /// viewport coordinates.
    fn container_bounds(&self) -> Rect;

    /// Whether that ancestor is attached and able to anchor absolutely
    /// positioned children.
    fn overlay_anchor_ready(&self) -> bool;

    fn subscribe(&self, event: HostEvent, listener: Listener) -> Subscription;
}

pub type EditorHandle = Rc<dyn HostEditor>;

/// Owns a registered listener. Dropping the subscription unregisters it.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Keep the listener registered for the lifetime of the host.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

/// Listener registry host implementations can embed to back
/// [`HostEditor::subscribe`].
#[derive(Default)]
pub struct EventHub {
    listeners: RefCell<Vec<(u64, HostEvent, Listener)>>,
    next_id: Cell<u64>,
}

impl EventHub {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn subscribe(self: &Rc<Self>, event: HostEvent, listener: Listener) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, event, listener));

        let hub: Weak<EventHub> = Rc::downgrade(self);
        Subscription::new(move || {
            if let Some(hub) = hub.upgrade() {
                hub.listeners.borrow_mut().retain(|(lid, _, _)| *lid != id);
            }
        })
    }

    pub fn emit(&self, event: HostEvent) {
        // Snapshot so listeners may subscribe/unsubscribe while running.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, ev, _)| *ev == event)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}
