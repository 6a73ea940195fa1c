use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Inline style properties keyed by CSS property name.
pub type StyleMap = BTreeMap<String, String>;

fn style_map(entries: &[(&str, &str)]) -> Option<StyleMap> {
    Some(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[derive(Debug, Clone)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayOptions {
    /// Class name applied to the overlay element.
    pub class_name: String,
    /// Style applied to the overlay element, or `None` to rely on an
    /// external stylesheet.
    pub style: Option<StyleMap>,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            class_name: "blot-formatter__overlay".to_string(),
            style: style_map(&[
                ("position", "absolute"),
                ("box-sizing", "border-box"),
                ("border", "1px dashed #444"),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeOptions {
    /// Class name applied to the resize handles.
    pub handle_class_name: String,
    /// Style applied to the resize handles, or `None` to rely on an
    /// external stylesheet. A `width`/`height` of `Npx` here also sets the
    /// hit-test square used for the handles.
    pub handle_style: Option<StyleMap>,
    /// Whether drags keep the target's aspect ratio by default.
    pub lock_aspect_ratio: bool,
    /// Dimensions never drop below this floor.
    pub min_size: f32,
    /// Optional ceiling for both dimensions (e.g. the container width).
    pub max_size: Option<f32>,
    /// When false, only the four corner handles are shown.
    pub edge_handles: bool,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            handle_class_name: "blot-formatter__resize-handle".to_string(),
            handle_style: style_map(&[
                ("position", "absolute"),
                ("height", "12px"),
                ("width", "12px"),
                ("background-color", "white"),
                ("border", "1px solid #777"),
                ("box-sizing", "border-box"),
                ("opacity", "0.80"),
            ]),
            lock_aspect_ratio: true,
            min_size: 16.0,
            max_size: None,
            edge_handles: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignIcons {
    pub left: String,
    pub center: String,
    pub right: String,
    pub set_link: String,
}

impl Default for AlignIcons {
    fn default() -> Self {
        Self {
            left: r#"<svg viewBox="0 0 18 18"><line x1="3" x2="15" y1="9" y2="9"></line><line x1="3" x2="13" y1="14" y2="14"></line><line x1="3" x2="9" y1="4" y2="4"></line></svg>"#
                .to_string(),
            center: r#"<svg viewBox="0 0 18 18"><line x1="15" x2="3" y1="9" y2="9"></line><line x1="14" x2="4" y1="14" y2="14"></line><line x1="12" x2="6" y1="4" y2="4"></line></svg>"#
                .to_string(),
            right: r#"<svg viewBox="0 0 18 18"><line x1="15" x2="3" y1="9" y2="9"></line><line x1="15" x2="5" y1="14" y2="14"></line><line x1="15" x2="9" y1="4" y2="4"></line></svg>"#
                .to_string(),
            set_link: r#"<svg viewBox="0 0 18 18"><path d="M7 11a4 4 0 0 0 6 0l2-2a4 4 0 1 0-6-6l-1 1"></path><path d="M11 7a4 4 0 0 0-6 0l-2 2a4 4 0 1 0 6 6l1-1"></path></svg>"#
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarOptions {
    /// Whether clicking the active alignment clears it.
    pub allow_deselect: bool,
    /// Class name applied to the root toolbar element.
    pub main_class_name: String,
    pub main_style: Option<StyleMap>,
    /// Class name applied to each button. Selected buttons additionally get
    /// `is-selected`.
    pub button_class_name: String,
    /// Whether selected buttons also get an inline selected style.
    pub add_button_select_style: bool,
    pub button_style: Option<StyleMap>,
    pub svg_style: Option<StyleMap>,
}

impl Default for ToolbarOptions {
    fn default() -> Self {
        Self {
            allow_deselect: true,
            main_class_name: "blot-formatter__toolbar".to_string(),
            main_style: style_map(&[
                ("position", "absolute"),
                ("top", "-12px"),
                ("right", "0"),
                ("left", "0"),
                ("height", "0"),
                ("min-width", "100px"),
                ("text-align", "center"),
                ("color", "#333"),
            ]),
            button_class_name: "blot-formatter__toolbar-button".to_string(),
            add_button_select_style: true,
            button_style: style_map(&[
                ("display", "inline-block"),
                ("width", "24px"),
                ("height", "24px"),
                ("background", "white"),
                ("border", "1px solid #999"),
                ("cursor", "pointer"),
            ]),
            svg_style: style_map(&[
                ("display", "inline-block"),
                ("width", "16px"),
                ("height", "16px"),
                ("vertical-align", "middle"),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignOptions {
    /// Attribute persisting the alignment on the element.
    pub attribute: String,
    /// Whether the aligner writes inline styles in addition to the attribute.
    pub apply_style: bool,
    pub icons: AlignIcons,
    pub toolbar: ToolbarOptions,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            attribute: "data-align".to_string(),
            apply_style: true,
            icons: AlignIcons::default(),
            toolbar: ToolbarOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub overlay: OverlayOptions,
    pub align: AlignOptions,
    pub resize: ResizeOptions,
}

impl Options {
    /// Reject malformed configuration up front, before any interaction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.resize.min_size.is_finite() || self.resize.min_size <= 0.0 {
            return Err(ConfigError::new("resize.min_size must be a positive number"));
        }
        if let Some(max) = self.resize.max_size {
            if !max.is_finite() || max < self.resize.min_size {
                return Err(ConfigError::new(
                    "resize.max_size must be finite and at least resize.min_size",
                ));
            }
        }
        if self.align.attribute.is_empty() {
            return Err(ConfigError::new("align.attribute must not be empty"));
        }
        if self.overlay.class_name.is_empty() || self.resize.handle_class_name.is_empty() {
            return Err(ConfigError::new("class names must not be empty"));
        }
        Ok(())
    }
}
