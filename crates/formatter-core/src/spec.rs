use std::collections::HashSet;

use crate::action::ActionKind;
use crate::align::Alignment;
use crate::geometry::Size;
use crate::host::HostElement;
use crate::options::ConfigError;

/// Current and intrinsic dimensions reported by a spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlotSizes {
    /// Displayed dimensions right now.
    pub displayed: Size,
    /// Unscaled dimensions, when obtainable (e.g. a loaded image).
    pub natural: Option<Size>,
}

/// Per-blot-type strategy: detection, size accessors and the toolbar
/// actions that apply.
pub trait BlotSpec {
    fn id(&self) -> &'static str;

    /// Whether this spec owns the given node.
    fn matches(&self, el: &dyn HostElement) -> bool;

    fn sizes(&self, el: &dyn HostElement) -> BlotSizes {
        BlotSizes {
            displayed: el.bounds().size,
            natural: el.natural_size(),
        }
    }

    /// Writes dimensions back onto the node. Must be idempotent.
    fn set_size(&self, el: &mut dyn HostElement, size: Size);

    fn actions(&self) -> Vec<ActionKind> {
        let mut actions: Vec<ActionKind> = Alignment::all()
            .into_iter()
            .map(ActionKind::Align)
            .collect();
        actions.push(ActionKind::SetLink);
        actions
    }
}

/// Ordered set of specs. Resolution is first-match over registration order.
pub struct SpecRegistry {
    specs: Vec<Box<dyn BlotSpec>>,
}

impl std::fmt::Debug for SpecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecRegistry")
            .field("specs", &self.specs.iter().map(|s| s.id()).collect::<Vec<_>>())
            .finish()
    }
}

impl SpecRegistry {
    pub fn new(specs: Vec<Box<dyn BlotSpec>>) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::new("at least one blot spec is required"));
        }
        let mut seen = HashSet::new();
        for spec in &specs {
            if spec.id().is_empty() {
                return Err(ConfigError::new("blot spec id must not be empty"));
            }
            if !seen.insert(spec.id()) {
                return Err(ConfigError::new(format!(
                    "duplicate blot spec id: {}",
                    spec.id()
                )));
            }
        }
        Ok(Self { specs })
    }

    /// The built-in specs, in their default order.
    pub fn default_specs() -> Self {
        Self {
            specs: vec![Box::new(ImageSpec), Box::new(IframeVideoSpec)],
        }
    }

    /// Index of the first spec claiming the node, if any.
    pub fn resolve(&self, el: &dyn HostElement) -> Option<usize> {
        self.specs.iter().position(|spec| spec.matches(el))
    }

    pub fn get(&self, index: usize) -> Option<&dyn BlotSpec> {
        self.specs.get(index).map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Plain images. Size is persisted as `width`/`height` attributes, the way
/// the host serializes image blots.
pub struct ImageSpec;

impl BlotSpec for ImageSpec {
    fn id(&self) -> &'static str {
        "image"
    }

    fn matches(&self, el: &dyn HostElement) -> bool {
        el.tag() == "img"
    }

    fn set_size(&self, el: &mut dyn HostElement, size: Size) {
        el.set_attr("width", &format!("{}", size.width.round() as i64));
        el.set_attr("height", &format!("{}", size.height.round() as i64));
    }
}

/// Embedded video frames. Size goes on the inline style; iframes rarely
/// expose a natural size, so ratio locking falls back to the displayed box.
pub struct IframeVideoSpec;

impl BlotSpec for IframeVideoSpec {
    fn id(&self) -> &'static str {
        "iframe-video"
    }

    fn matches(&self, el: &dyn HostElement) -> bool {
        el.tag() == "iframe"
    }

    fn set_size(&self, el: &mut dyn HostElement, size: Size) {
        el.set_style("width", Some(&format!("{}px", size.width.round() as i64)));
        el.set_style("height", Some(&format!("{}px", size.height.round() as i64)));
    }

    fn actions(&self) -> Vec<ActionKind> {
        Alignment::all().into_iter().map(ActionKind::Align).collect()
    }
}
