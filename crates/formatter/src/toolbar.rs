use serde::{Deserialize, Serialize};

use blot_formatter_core::{ActionSpec, HostElement, ToolbarOptions};

/// View model for one toolbar button. The host renders these; clicking one
/// feeds the id back into `BlotFormatter::invoke_action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarButton {
    pub id: String,
    pub icon: String,
    pub class_name: String,
    pub selected: bool,
}

/// Holds the actions applicable to the active blot and their selected state.
pub struct Toolbar {
    options: ToolbarOptions,
    actions: Vec<ActionSpec>,
    selected: Vec<bool>,
    visible: bool,
}

impl Toolbar {
    pub fn new(options: &ToolbarOptions) -> Self {
        Self {
            options: options.clone(),
            actions: Vec::new(),
            selected: Vec::new(),
            visible: false,
        }
    }

    pub fn show(&mut self, actions: Vec<ActionSpec>, el: &dyn HostElement) {
        self.actions = actions;
        self.visible = true;
        self.refresh(el);
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.actions.clear();
        self.selected.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Recompute per-button selected state from the element.
    pub fn refresh(&mut self, el: &dyn HostElement) {
        self.selected = self
            .actions
            .iter()
            .map(|action| (action.selected)(el))
            .collect();
    }

    pub fn action(&self, id: &str) -> Option<&ActionSpec> {
        self.actions.iter().find(|action| action.id == id)
    }

    pub fn buttons(&self) -> Vec<ToolbarButton> {
        if !self.visible {
            return Vec::new();
        }
        self.actions
            .iter()
            .zip(&self.selected)
            .map(|(action, &selected)| ToolbarButton {
                id: action.id.clone(),
                icon: action.icon.clone(),
                class_name: if selected {
                    format!("{} is-selected", self.options.button_class_name)
                } else {
                    self.options.button_class_name.clone()
                },
                selected,
            })
            .collect()
    }

    pub fn options(&self) -> &ToolbarOptions {
        &self.options
    }
}
