use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use blot_formatter_core::{
    EditorHandle, ElementHandle, HostEditor, HostEvent, Options, OverlayOptions, Point, Rect,
    ResizeOptions, StyleMap, Subscription, point,
};

/// Where a handle sits on the tracking rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlePlacement {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl HandlePlacement {
    pub fn all() -> [HandlePlacement; 8] {
        [
            HandlePlacement::TopLeft,
            HandlePlacement::Top,
            HandlePlacement::TopRight,
            HandlePlacement::Right,
            HandlePlacement::BottomRight,
            HandlePlacement::Bottom,
            HandlePlacement::BottomLeft,
            HandlePlacement::Left,
        ]
    }

    pub fn corners() -> [HandlePlacement; 4] {
        [
            HandlePlacement::TopLeft,
            HandlePlacement::TopRight,
            HandlePlacement::BottomRight,
            HandlePlacement::BottomLeft,
        ]
    }

    /// Sign of the width/height change for a positive pointer delta on each
    /// axis. Zero means the axis is unaffected.
    pub fn axes(self) -> (i8, i8) {
        match self {
            HandlePlacement::TopLeft => (-1, -1),
            HandlePlacement::Top => (0, -1),
            HandlePlacement::TopRight => (1, -1),
            HandlePlacement::Right => (1, 0),
            HandlePlacement::BottomRight => (1, 1),
            HandlePlacement::Bottom => (0, 1),
            HandlePlacement::BottomLeft => (-1, 1),
            HandlePlacement::Left => (-1, 0),
        }
    }

    pub fn is_corner(self) -> bool {
        let (x, y) = self.axes();
        x != 0 && y != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    pub placement: HandlePlacement,
    /// Container-relative hit box.
    pub rect: Rect,
}

/// Derived, ephemeral overlay geometry in container-relative coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlayFrame {
    pub rect: Rect,
    pub visible: bool,
    pub handles: Vec<Handle>,
}

/// Precondition failure: the overlay cannot anchor itself.
#[derive(Debug, Clone)]
pub struct OverlayError {
    message: String,
}

impl OverlayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Tracking rectangle plus resize handles, kept in sync with the target's
/// bounding box against scroll and container resize.
pub struct Overlay {
    editor: EditorHandle,
    options: OverlayOptions,
    handle_class_name: String,
    handle_style: Option<StyleMap>,
    handle_size: f32,
    edge_handles: bool,
    frame: Rc<RefCell<OverlayFrame>>,
    target: Option<ElementHandle>,
    subscriptions: Vec<Subscription>,
}

impl Overlay {
    pub fn new(editor: EditorHandle, options: &Options) -> Self {
        Self {
            editor,
            options: options.overlay.clone(),
            handle_class_name: options.resize.handle_class_name.clone(),
            handle_style: options.resize.handle_style.clone(),
            handle_size: handle_size_from(&options.resize),
            edge_handles: options.resize.edge_handles,
            frame: Rc::new(RefCell::new(OverlayFrame::default())),
            target: None,
            subscriptions: Vec::new(),
        }
    }

    /// Bind the overlay to a target and start tracking it. Re-showing on a
    /// different target drops every listener bound to the previous one.
    pub fn show(&mut self, target: &ElementHandle) -> Result<(), OverlayError> {
        if !self.editor.overlay_anchor_ready() {
            return Err(OverlayError::new("overlay container is not attached"));
        }
        self.hide();

        self.frame.borrow_mut().visible = true;
        recompute(
            &self.frame,
            &*self.editor,
            target,
            self.edge_handles,
            self.handle_size,
        );

        for event in [HostEvent::Scroll, HostEvent::Resize] {
            let frame = Rc::clone(&self.frame);
            let editor = Rc::downgrade(&self.editor);
            let target = Rc::clone(target);
            let edge_handles = self.edge_handles;
            let handle_size = self.handle_size;
            let subscription = self.editor.subscribe(
                event,
                Rc::new(move || {
                    if let Some(editor) = editor.upgrade() {
                        recompute(&frame, &*editor, &target, edge_handles, handle_size);
                    }
                }),
            );
            self.subscriptions.push(subscription);
        }

        self.target = Some(Rc::clone(target));
        Ok(())
    }

    pub fn hide(&mut self) {
        self.subscriptions.clear();
        self.target = None;
        let mut frame = self.frame.borrow_mut();
        frame.visible = false;
        frame.handles.clear();
    }

    /// Recompute geometry without changing visibility.
    pub fn refresh(&self) {
        if let Some(target) = &self.target {
            recompute(
                &self.frame,
                &*self.editor,
                target,
                self.edge_handles,
                self.handle_size,
            );
        }
    }

    pub fn frame(&self) -> OverlayFrame {
        self.frame.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.frame.borrow().visible
    }

    /// Handle under a container-relative point, if any.
    pub fn handle_at(&self, p: Point) -> Option<HandlePlacement> {
        let frame = self.frame.borrow();
        if !frame.visible {
            return None;
        }
        frame
            .handles
            .iter()
            .find(|handle| handle.rect.contains(p))
            .map(|handle| handle.placement)
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    pub fn handle_class_name(&self) -> &str {
        &self.handle_class_name
    }

    pub fn handle_style(&self) -> Option<&StyleMap> {
        self.handle_style.as_ref()
    }
}

fn handle_size_from(resize: &ResizeOptions) -> f32 {
    resize
        .handle_style
        .as_ref()
        .and_then(|style| style.get("width").or_else(|| style.get("height")))
        .and_then(|value| value.strip_suffix("px"))
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(12.0)
}

fn recompute(
    frame: &Rc<RefCell<OverlayFrame>>,
    editor: &dyn HostEditor,
    target: &ElementHandle,
    edge_handles: bool,
    handle_size: f32,
) {
    let el = target.borrow();
    if !el.is_attached() {
        return;
    }
    let container = editor.container_bounds();
    let bounds = el.bounds();
    let rect = Rect::new(
        point(
            bounds.origin.x - container.origin.x,
            bounds.origin.y - container.origin.y,
        ),
        bounds.size,
    );

    let mut frame = frame.borrow_mut();
    frame.rect = rect;
    frame.handles = layout_handles(rect, edge_handles, handle_size);
}

fn layout_handles(rect: Rect, edge_handles: bool, handle_size: f32) -> Vec<Handle> {
    let placements: Vec<HandlePlacement> = if edge_handles {
        HandlePlacement::all().to_vec()
    } else {
        HandlePlacement::corners().to_vec()
    };

    placements
        .into_iter()
        .map(|placement| {
            let center = handle_center(rect, placement);
            Handle {
                placement,
                rect: Rect::from_xywh(
                    center.x - handle_size / 2.0,
                    center.y - handle_size / 2.0,
                    handle_size,
                    handle_size,
                ),
            }
        })
        .collect()
}

fn handle_center(rect: Rect, placement: HandlePlacement) -> Point {
    let mid = rect.center();
    match placement {
        HandlePlacement::TopLeft => point(rect.left(), rect.top()),
        HandlePlacement::Top => point(mid.x, rect.top()),
        HandlePlacement::TopRight => point(rect.right(), rect.top()),
        HandlePlacement::Right => point(rect.right(), mid.y),
        HandlePlacement::BottomRight => point(rect.right(), rect.bottom()),
        HandlePlacement::Bottom => point(mid.x, rect.bottom()),
        HandlePlacement::BottomLeft => point(rect.left(), rect.bottom()),
        HandlePlacement::Left => point(rect.left(), mid.y),
    }
}
