use std::rc::Rc;

use blot_formatter_core::{
    ActionBehavior, ActionError, ActionKind, ActionSpec, Aligner, BlotSpec, ConfigError,
    EditorHandle, ElementHandle, Options, Point, SpecRegistry,
};

use crate::link::{self, LinkEditor, LinkOutcome};
use crate::overlay::Overlay;
use crate::resize::ResizeController;
use crate::toolbar::{Toolbar, ToolbarButton};

struct ActiveBlot {
    element: ElementHandle,
    spec: usize,
}

/// The orchestrator: owns the NoSelection <-> Active state machine and wires
/// specs, overlay, toolbar, resize controller and link editor together. All
/// pointer coordinates are container-relative, the same space as
/// [`crate::OverlayFrame`].
pub struct BlotFormatter {
    options: Options,
    specs: SpecRegistry,
    aligner: Aligner,
    overlay: Overlay,
    toolbar: Toolbar,
    resize: ResizeController,
    link: LinkEditor,
    active: Option<ActiveBlot>,
}

impl BlotFormatter {
    /// Fails fast on malformed configuration; nothing is deferred to
    /// interaction time.
    pub fn new(
        editor: EditorHandle,
        specs: SpecRegistry,
        options: Options,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let aligner = Aligner::new(&options.align);
        let overlay = Overlay::new(Rc::clone(&editor), &options);
        let toolbar = Toolbar::new(&options.align.toolbar);
        let resize = ResizeController::new(&options.resize);
        Ok(Self {
            options,
            specs,
            aligner,
            overlay,
            toolbar,
            resize,
            link: LinkEditor::new(),
            active: None,
        })
    }

    pub fn with_default_specs(editor: EditorHandle, options: Options) -> Result<Self, ConfigError> {
        Self::new(editor, SpecRegistry::default_specs(), options)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_element(&self) -> Option<ElementHandle> {
        self.active.as_ref().map(|active| Rc::clone(&active.element))
    }

    pub fn is_dragging(&self) -> bool {
        self.resize.is_dragging()
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn toolbar_buttons(&self) -> Vec<ToolbarButton> {
        self.toolbar.buttons()
    }

    pub fn aligner(&self) -> &Aligner {
        &self.aligner
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn link_editor(&self) -> &LinkEditor {
        &self.link
    }

    /// A host click landed on the given node. A node no spec claims is not
    /// an error; it simply deactivates any current target.
    pub fn handle_click(&mut self, el: &ElementHandle) {
        match self.specs.resolve(&*el.borrow()) {
            Some(spec_ix) => self.activate(el, spec_ix),
            None => self.deactivate(),
        }
    }

    /// Host selection change; `None` means the selection left every node.
    pub fn selection_changed(&mut self, el: Option<&ElementHandle>) {
        match el {
            Some(el) => self.handle_click(el),
            None => self.deactivate(),
        }
    }

    /// NoSelection -> Active, with full teardown of any previous target
    /// first. A failed overlay precondition keeps the formatter in
    /// NoSelection.
    fn activate(&mut self, el: &ElementHandle, spec_ix: usize) {
        self.deactivate();

        if self.overlay.show(el).is_err() {
            return;
        }
        let actions = {
            let Some(spec) = self.specs.get(spec_ix) else {
                self.overlay.hide();
                return;
            };
            self.actions_for(spec)
        };
        self.toolbar.show(actions, &*el.borrow());
        self.active = Some(ActiveBlot {
            element: Rc::clone(el),
            spec: spec_ix,
        });
    }

    /// Active -> NoSelection: aborts any in-flight drag, closes the link
    /// editor and releases every listener before the binding is dropped.
    pub fn deactivate(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        if self.resize.is_dragging() {
            if active.element.borrow().is_attached() {
                if let Some(spec) = self.specs.get(active.spec) {
                    self.resize.cancel(spec, &mut *active.element.borrow_mut());
                } else {
                    self.resize.abandon();
                }
            } else {
                self.resize.abandon();
            }
        }
        if self.link.is_open() {
            self.link.cancel();
        }
        self.toolbar.hide();
        self.overlay.hide();
    }

    /// Pointer-down in container-relative coordinates. Returns true when a
    /// resize handle was grabbed and a drag began.
    pub fn pointer_down(&mut self, pointer: Point) -> bool {
        let Some((element, spec_ix)) = self.active_parts() else {
            return false;
        };
        let Some(placement) = self.overlay.handle_at(pointer) else {
            return false;
        };
        let Some(spec) = self.specs.get(spec_ix) else {
            return false;
        };
        self.resize.begin(placement, pointer, spec, &*element.borrow());
        true
    }

    /// Pointer move while dragging: live-resizes the target and keeps the
    /// overlay tracking it.
    pub fn pointer_move(&mut self, pointer: Point) {
        if !self.resize.is_dragging() {
            return;
        }
        let Some((element, spec_ix)) = self.active_parts() else {
            return;
        };
        if !element.borrow().is_attached() {
            self.resize.abandon();
            self.deactivate();
            return;
        }
        let Some(spec) = self.specs.get(spec_ix) else {
            return;
        };
        self.resize.update(pointer, spec, &mut *element.borrow_mut());
        self.overlay.refresh();
    }

    /// Pointer-up: commits the size through the spec and ends the drag.
    pub fn pointer_up(&mut self) {
        if !self.resize.is_dragging() {
            return;
        }
        let Some((element, spec_ix)) = self.active_parts() else {
            self.resize.abandon();
            return;
        };
        if !element.borrow().is_attached() {
            self.resize.abandon();
            self.deactivate();
            return;
        }
        let Some(spec) = self.specs.get(spec_ix) else {
            self.resize.abandon();
            return;
        };
        self.resize.end(spec, &mut *element.borrow_mut());
        self.overlay.refresh();
    }

    /// Abort the drag (Escape, lost pointer capture): restores the size
    /// captured at drag start without committing.
    pub fn cancel_drag(&mut self) {
        if !self.resize.is_dragging() {
            return;
        }
        let Some((element, spec_ix)) = self.active_parts() else {
            self.resize.abandon();
            return;
        };
        if !element.borrow().is_attached() {
            self.resize.abandon();
            self.deactivate();
            return;
        }
        let Some(spec) = self.specs.get(spec_ix) else {
            self.resize.abandon();
            return;
        };
        self.resize.cancel(spec, &mut *element.borrow_mut());
        self.overlay.refresh();
    }

    /// Dispatch a toolbar action by id, then re-sync toolbar and overlay
    /// (actions like alignment change the element's box).
    pub fn invoke_action(&mut self, id: &str) -> Result<(), ActionError> {
        let Some((element, _)) = self.active_parts() else {
            return Err(ActionError::new("no active blot"));
        };
        let Some(action) = self.toolbar.action(id) else {
            return Err(ActionError::new(format!("unknown action: {id}")));
        };
        let behavior = action.behavior.clone();
        match behavior {
            ActionBehavior::Mutate(apply) => apply(&mut *element.borrow_mut())?,
            ActionBehavior::OpenLinkEditor => self.link.open(&*element.borrow()),
        }
        self.toolbar.refresh(&*element.borrow());
        self.overlay.refresh();
        Ok(())
    }

    /// Host change notification. A removed target is an implicit
    /// deactivation; an in-flight drag is discarded without committing.
    pub fn document_changed(&mut self) {
        let Some((element, _)) = self.active_parts() else {
            return;
        };
        if !element.borrow().is_attached() {
            self.resize.abandon();
            self.deactivate();
            return;
        }
        self.overlay.refresh();
        self.toolbar.refresh(&*element.borrow());
    }

    /// Mirror of the link editor's input field.
    pub fn set_link_draft(&mut self, draft: impl Into<String>) {
        self.link.set_draft(draft);
    }

    /// Apply the link editor's pending value to the active blot.
    pub fn submit_link(&mut self) -> Option<LinkOutcome> {
        let outcome = self.link.submit()?;
        if let Some((element, _)) = self.active_parts() {
            if element.borrow().is_attached() {
                link::apply_outcome(&mut *element.borrow_mut(), &outcome);
                self.toolbar.refresh(&*element.borrow());
            }
        }
        Some(outcome)
    }

    pub fn cancel_link(&mut self) {
        self.link.cancel();
    }

    fn active_parts(&self) -> Option<(ElementHandle, usize)> {
        self.active
            .as_ref()
            .map(|active| (Rc::clone(&active.element), active.spec))
    }

    fn actions_for(&self, spec: &dyn BlotSpec) -> Vec<ActionSpec> {
        let kinds = spec.actions();
        let mut actions: Vec<ActionSpec> = self
            .aligner
            .actions()
            .into_iter()
            .filter(|action| kinds.contains(&action.kind))
            .collect();
        if kinds.contains(&ActionKind::SetLink) {
            actions.push(link::link_action(&self.options.align.icons.set_link));
        }
        actions
    }
}
