use std::rc::Rc;

use crate::align::Alignment;
use crate::host::HostElement;

#[derive(Debug, Clone)]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Which toolbar operation an action represents. `Align` actions are
/// mutually exclusive; others are independent toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Align(Alignment),
    SetLink,
}

#[derive(Clone)]
pub enum ActionBehavior {
    /// Mutates the element directly.
    Mutate(Rc<dyn Fn(&mut dyn HostElement) -> Result<(), ActionError>>),
    /// Opens the link editor; the outcome is applied by the formatter.
    OpenLinkEditor,
}

/// A toolbar-exposed operation on the active blot.
#[derive(Clone)]
pub struct ActionSpec {
    pub id: String,
    pub icon: String,
    pub kind: ActionKind,
    pub behavior: ActionBehavior,
    /// Whether the toolbar button should render as selected for the given
    /// element.
    pub selected: Rc<dyn Fn(&dyn HostElement) -> bool>,
}

impl ActionSpec {
    pub fn new(
        id: impl Into<String>,
        icon: impl Into<String>,
        kind: ActionKind,
        behavior: ActionBehavior,
        selected: impl Fn(&dyn HostElement) -> bool + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            icon: icon.into(),
            kind,
            behavior,
            selected: Rc::new(selected),
        }
    }
}
