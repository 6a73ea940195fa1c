use blot_formatter_core::{BlotSpec, HostElement, Point, ResizeOptions, Size, size};

use crate::overlay::HandlePlacement;

/// Captured at pointer-down on a handle; lives for the duration of the drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    handle: HandlePlacement,
    start_pointer: Point,
    start_size: Size,
    /// Width over height to preserve, or `None` when the lock is off or no
    /// usable reference exists.
    ratio: Option<f32>,
}

impl DragSession {
    pub fn handle(&self) -> HandlePlacement {
        self.handle
    }

    pub fn start_size(&self) -> Size {
        self.start_size
    }

    pub fn ratio(&self) -> Option<f32> {
        self.ratio
    }
}

/// Drag state machine: Idle -> Dragging -> Idle. Converts pointer deltas
/// into clamped width/height writes on the target.
pub struct ResizeController {
    options: ResizeOptions,
    session: Option<DragSession>,
}

impl ResizeController {
    pub fn new(options: &ResizeOptions) -> Self {
        Self {
            options: options.clone(),
            session: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Idle -> Dragging. The aspect-ratio reference prefers the natural
    /// size; an unloaded blot falls back to the displayed box, and a
    /// degenerate box disables the lock.
    pub fn begin(
        &mut self,
        handle: HandlePlacement,
        pointer: Point,
        spec: &dyn BlotSpec,
        el: &dyn HostElement,
    ) {
        let sizes = spec.sizes(el);
        let ratio = if self.options.lock_aspect_ratio {
            sizes
                .natural
                .and_then(|natural| natural.ratio())
                .or_else(|| sizes.displayed.ratio())
        } else {
            None
        };
        self.session = Some(DragSession {
            handle,
            start_pointer: pointer,
            start_size: sizes.displayed,
            ratio,
        });
    }

    /// Pointer move while Dragging. Applies the new size to the target
    /// immediately (live resize) and returns it.
    pub fn update(
        &mut self,
        pointer: Point,
        spec: &dyn BlotSpec,
        el: &mut dyn HostElement,
    ) -> Option<Size> {
        let session = self.session.as_ref()?;
        let next = self.project(session, pointer);
        spec.set_size(el, next);
        Some(next)
    }

    /// Dragging -> Idle, committing the final size.
    pub fn end(&mut self, spec: &dyn BlotSpec, el: &mut dyn HostElement) -> Option<Size> {
        self.session.take()?;
        let committed = spec.sizes(el).displayed;
        spec.set_size(el, committed);
        Some(committed)
    }

    /// Dragging -> Idle, reverting to the size captured at drag start.
    pub fn cancel(&mut self, spec: &dyn BlotSpec, el: &mut dyn HostElement) -> Option<Size> {
        let session = self.session.take()?;
        spec.set_size(el, session.start_size);
        Some(session.start_size)
    }

    /// Dragging -> Idle without touching the element (it is already gone).
    pub fn abandon(&mut self) {
        self.session = None;
    }

    fn project(&self, session: &DragSession, pointer: Point) -> Size {
        let (sx, sy) = session.handle.axes();
        let dx = pointer.x - session.start_pointer.x;
        let dy = pointer.y - session.start_pointer.y;

        let mut width = session.start_size.width;
        let mut height = session.start_size.height;
        if sx != 0 {
            width += dx * f32::from(sx);
        }
        if sy != 0 {
            height += dy * f32::from(sy);
        }

        match session.ratio {
            // Corner and horizontal drags drive from width, vertical edges
            // from height; the other axis follows the locked ratio.
            Some(ratio) if sx != 0 => {
                let mut width = self.clamp_axis(width);
                let mut height = width / ratio;
                if height < self.options.min_size {
                    height = self.options.min_size;
                    width = self.clamp_axis(height * ratio);
                } else if let Some(max) = self.options.max_size {
                    if height > max {
                        height = max;
                        width = self.clamp_axis(height * ratio);
                    }
                }
                size(width, height)
            }
            Some(ratio) => {
                let mut height = self.clamp_axis(height);
                let mut width = height * ratio;
                if width < self.options.min_size {
                    width = self.options.min_size;
                    height = self.clamp_axis(width / ratio);
                } else if let Some(max) = self.options.max_size {
                    if width > max {
                        width = max;
                        height = self.clamp_axis(width / ratio);
                    }
                }
                size(width, height)
            }
            None => size(
                if sx != 0 { self.clamp_axis(width) } else { width },
                if sy != 0 { self.clamp_axis(height) } else { height },
            ),
        }
    }

    fn clamp_axis(&self, value: f32) -> f32 {
        // Invalid arithmetic collapses to the floor rather than reaching the
        // element.
        if !value.is_finite() {
            return self.options.min_size;
        }
        let mut value = value.max(self.options.min_size);
        if let Some(max) = self.options.max_size {
            value = value.min(max);
        }
        value
    }
}
