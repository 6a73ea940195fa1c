use blot_formatter_core::{ActionBehavior, ActionKind, ActionSpec, HostElement};

/// Attribute persisting a blot's link.
pub const LINK_ATTRIBUTE: &str = "data-link";

const EMPTY_DRAFT: &str = "https://";

/// Result of a link editing session. Only the formatter applies it to the
/// element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Saved(String),
    Removed,
    Cancelled,
}

/// The link popup as a self-owned state component: created once with the
/// formatter, reused across activations, never re-wired.
#[derive(Debug, Default)]
pub struct LinkEditor {
    open: bool,
    draft: String,
}

impl LinkEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Open for the given element, seeding the draft with its current link
    /// or the placeholder.
    pub fn open(&mut self, el: &dyn HostElement) {
        self.draft = el
            .attr(LINK_ATTRIBUTE)
            .unwrap_or_else(|| EMPTY_DRAFT.to_string());
        self.open = true;
    }

    /// Mirror of the input field while the editor is open.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        if self.open {
            self.draft = draft.into();
        }
    }

    /// Whether the save button is active. The untouched placeholder never
    /// saves; an empty draft saves as a removal.
    pub fn can_save(&self) -> bool {
        self.open && self.draft != EMPTY_DRAFT
    }

    pub fn save_label(&self) -> &'static str {
        if self.draft.is_empty() {
            "Remove Link"
        } else {
            "Save Link"
        }
    }

    /// Close with a result, or stay open when saving is not allowed.
    pub fn submit(&mut self) -> Option<LinkOutcome> {
        if !self.can_save() {
            return None;
        }
        let draft = std::mem::take(&mut self.draft);
        self.open = false;
        Some(if draft.is_empty() {
            LinkOutcome::Removed
        } else {
            LinkOutcome::Saved(draft)
        })
    }

    pub fn cancel(&mut self) -> LinkOutcome {
        self.open = false;
        self.draft.clear();
        LinkOutcome::Cancelled
    }
}

pub(crate) fn link_action(icon: &str) -> ActionSpec {
    ActionSpec::new(
        "link.edit",
        icon,
        ActionKind::SetLink,
        ActionBehavior::OpenLinkEditor,
        |el: &dyn HostElement| el.attr(LINK_ATTRIBUTE).is_some(),
    )
}

pub(crate) fn apply_outcome(el: &mut dyn HostElement, outcome: &LinkOutcome) {
    match outcome {
        LinkOutcome::Saved(url) => el.set_attr(LINK_ATTRIBUTE, url),
        LinkOutcome::Removed => el.remove_attr(LINK_ATTRIBUTE),
        LinkOutcome::Cancelled => {}
    }
}
