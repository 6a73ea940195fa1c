use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::action::{ActionBehavior, ActionKind, ActionSpec};
use crate::host::HostElement;
use crate::options::AlignOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn all() -> [Alignment; 3] {
        [Alignment::Left, Alignment::Center, Alignment::Right]
    }

    pub fn name(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Owns the alignment state machine: exactly one alignment (or none) holds
/// at a time, persisted as an attribute on the element.
#[derive(Debug, Clone)]
pub struct Aligner {
    attribute: String,
    apply_style: bool,
    allow_deselect: bool,
    icons: [(Alignment, String); 3],
}

impl Aligner {
    pub fn new(options: &AlignOptions) -> Self {
        Self {
            attribute: options.attribute.clone(),
            apply_style: options.apply_style,
            allow_deselect: options.toolbar.allow_deselect,
            icons: [
                (Alignment::Left, options.icons.left.clone()),
                (Alignment::Center, options.icons.center.clone()),
                (Alignment::Right, options.icons.right.clone()),
            ],
        }
    }

    /// Clears any previous alignment, then applies the new one.
    pub fn apply(&self, el: &mut dyn HostElement, alignment: Alignment) {
        self.clear(el);
        el.set_attr(&self.attribute, alignment.name());
        if !self.apply_style {
            return;
        }
        match alignment {
            Alignment::Left => self.set_layout(el, "inline", Some("left"), "0 1em 1em 0"),
            Alignment::Center => self.set_layout(el, "block", None, "auto"),
            Alignment::Right => self.set_layout(el, "inline", Some("right"), "0 0 1em 1em"),
        }
    }

    /// Removes the attribute and all alignment-related style properties.
    pub fn clear(&self, el: &mut dyn HostElement) {
        el.remove_attr(&self.attribute);
        if self.apply_style {
            el.set_style("display", None);
            el.set_style("float", None);
            el.set_style("margin", None);
        }
    }

    /// Reads the stored attribute only; never inferred from style, so
    /// external style edits cannot desynchronize the state.
    pub fn is_aligned(&self, el: &dyn HostElement, alignment: Alignment) -> bool {
        el.attr(&self.attribute).as_deref() == Some(alignment.name())
    }

    pub fn alignment_of(&self, el: &dyn HostElement) -> Option<Alignment> {
        let value = el.attr(&self.attribute)?;
        Alignment::all()
            .into_iter()
            .find(|alignment| alignment.name() == value)
    }

    /// The three alignments as toolbar actions. Re-selecting the active
    /// alignment is a no-op, or clears it when deselection is allowed.
    pub fn actions(&self) -> Vec<ActionSpec> {
        self.icons
            .iter()
            .map(|(alignment, icon)| {
                let alignment = *alignment;
                let apply = {
                    let aligner = self.clone();
                    Rc::new(move |el: &mut dyn HostElement| {
                        if aligner.is_aligned(el, alignment) {
                            if aligner.allow_deselect {
                                aligner.clear(el);
                            }
                            return Ok(());
                        }
                        aligner.apply(el, alignment);
                        Ok(())
                    })
                };
                let selected = {
                    let aligner = self.clone();
                    move |el: &dyn HostElement| aligner.is_aligned(el, alignment)
                };
                ActionSpec::new(
                    format!("align.{}", alignment.name()),
                    icon.clone(),
                    ActionKind::Align(alignment),
                    ActionBehavior::Mutate(apply),
                    selected,
                )
            })
            .collect()
    }

    fn set_layout(
        &self,
        el: &mut dyn HostElement,
        display: &str,
        float: Option<&str>,
        margin: &str,
    ) {
        el.set_style("display", Some(display));
        el.set_style("float", float);
        el.set_style("margin", Some(margin));
    }
}
