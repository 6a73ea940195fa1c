use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::geometry::{Rect, Size};
use crate::host::{
    ElementHandle, EventHub, HostEditor, HostElement, HostEvent, Listener, Subscription,
};

/// In-memory [`HostElement`] for tests and embedding experiments.
///
/// Emulates just enough reflow to make interaction observable: writing
/// `width`/`height` attributes, or inline styles with an `Npx` value,
/// updates the element's bounds.
pub struct MemoryElement {
    tag: String,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    bounds: Rect,
    natural_size: Option<Size>,
    attached: bool,
}

impl MemoryElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            styles: BTreeMap::new(),
            bounds: Rect::default(),
            natural_size: None,
            attached: true,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_natural_size(mut self, size: Size) -> Self {
        self.natural_size = Some(size);
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn handle(self) -> ElementHandle {
        Rc::new(RefCell::new(self))
    }

    /// Simulate the node being removed from the document.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Simulate a layout shift (scroll, reflow).
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

fn parse_px(value: &str) -> Option<f32> {
    value.strip_suffix("px")?.trim().parse().ok()
}

impl HostElement for MemoryElement {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attrs.get(name).cloned()
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        if let Ok(px) = value.parse::<f32>() {
            match name {
                "width" => self.bounds.size.width = px,
                "height" => self.bounds.size.height = px,
                _ => {}
            }
        }
        self.attrs.insert(name.to_string(), value.to_string());
    }

    fn remove_attr(&mut self, name: &str) {
        self.attrs.remove(name);
    }

    fn style(&self, property: &str) -> Option<String> {
        self.styles.get(property).cloned()
    }

    fn set_style(&mut self, property: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                if let Some(px) = parse_px(value) {
                    match property {
                        "width" => self.bounds.size.width = px,
                        "height" => self.bounds.size.height = px,
                        _ => {}
                    }
                }
                self.styles.insert(property.to_string(), value.to_string());
            }
            None => {
                self.styles.remove(property);
            }
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn natural_size(&self) -> Option<Size> {
        self.natural_size
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

/// In-memory [`HostEditor`] backed by an [`EventHub`].
pub struct MemoryEditor {
    container: Cell<Rect>,
    anchor_ready: Cell<bool>,
    hub: Rc<EventHub>,
}

impl MemoryEditor {
    pub fn new(container: Rect) -> Rc<Self> {
        Rc::new(Self {
            container: Cell::new(container),
            anchor_ready: Cell::new(true),
            hub: EventHub::new(),
        })
    }

    pub fn set_container_bounds(&self, container: Rect) {
        self.container.set(container);
    }

    pub fn set_anchor_ready(&self, ready: bool) {
        self.anchor_ready.set(ready);
    }

    pub fn emit(&self, event: HostEvent) {
        self.hub.emit(event);
    }

    pub fn listener_count(&self) -> usize {
        self.hub.listener_count()
    }
}

impl HostEditor for MemoryEditor {
    fn container_bounds(&self) -> Rect {
        self.container.get()
    }

    fn overlay_anchor_ready(&self) -> bool {
        self.anchor_ready.get()
    }

    fn subscribe(&self, event: HostEvent, listener: Listener) -> Subscription {
        self.hub.subscribe(event, listener)
    }
}
