//! Declarative configuration for [`TextField`](crate::widget::TextField).
//!
//! A [`TextFieldConfig`] describes everything the field shows: primary text,
//! text color, placeholder, the symmetric center inset and an optional
//! trailing accessory ([`RightViewConfig`]). Applying a configuration to a
//! field replaces its rendering state wholesale.
//!
//! Most fields can only be set while building the value. The exceptions are
//! the ones the field itself needs to keep current: the primary `text`
//! (live edits) and the accessory's `image` and `text` (toggle-driven swaps).
//!
//! Configurations can also be loaded from TOML or JSON:
//!
//! ```toml
//! placeholder = "Password"
//! text_color = "#1C1C1E"
//! center_inset = { x = 12.0, y = 4.0 }
//!
//! [right_view]
//! image = { name = "lock.closed", width = 20.0, height = 20.0 }
//! tint_color = "#8E8E93"
//! padding = 8.0
//! ```

use std::path::{Path, PathBuf};

use accessory_field_core::logging::targets;
use serde::Deserialize;

use crate::types::{Color, Image, Point};

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading a configuration document.
///
/// Building a configuration in code never fails; these only arise at the
/// file/string boundary.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML syntax or shape error.
    #[error("Invalid TOML field configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON syntax or shape error.
    #[error("Invalid JSON field configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A color string that is not `#RRGGBB` or `#RRGGBBAA`.
    #[error("Invalid color for '{field}': '{value}'")]
    InvalidColor { field: &'static str, value: String },

    /// Accessory padding below zero or not a number.
    #[error("Accessory padding must be a non-negative number, got {value}")]
    InvalidPadding { value: f32 },

    /// File I/O error.
    #[error("Failed to read field configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create a color error.
    pub fn invalid_color(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidColor {
            field,
            value: value.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Description of the trailing accessory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RightViewConfig {
    image: Option<Image>,
    text: Option<String>,
    tint_color: Option<Color>,
    padding: f32,
}

impl RightViewConfig {
    /// Create an empty accessory description with the given padding.
    ///
    /// Negative or NaN padding is clamped to zero.
    pub fn new(padding: f32) -> Self {
        Self {
            padding: sanitize_padding(padding),
            ..Self::default()
        }
    }

    /// Set the image using builder pattern.
    pub fn with_image(mut self, image: Image) -> Self {
        self.image = Some(image);
        self
    }

    /// Set the label using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the tint using builder pattern.
    pub fn with_tint_color(mut self, color: Color) -> Self {
        self.tint_color = Some(color);
        self
    }

    /// Set the padding using builder pattern. Negative or NaN is clamped to zero.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = sanitize_padding(padding);
        self
    }

    /// The accessory image.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Replace the accessory image.
    pub fn set_image(&mut self, image: Option<Image>) {
        self.image = image;
    }

    /// The accessory label.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the accessory label.
    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    /// The accessory tint.
    pub fn tint_color(&self) -> Option<Color> {
        self.tint_color
    }

    /// Horizontal gap between the accessory and the field's trailing edge.
    pub fn padding(&self) -> f32 {
        self.padding
    }
}

/// Description of a text field's visible state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextFieldConfig {
    text: Option<String>,
    text_color: Option<Color>,
    placeholder: Option<String>,
    center_inset: Point,
    right_view: Option<RightViewConfig>,
}

impl TextFieldConfig {
    /// Create an empty configuration with a zero center inset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the text color using builder pattern.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Set the placeholder using builder pattern.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the symmetric center inset using builder pattern.
    pub fn with_center_inset(mut self, inset: impl Into<Point>) -> Self {
        self.center_inset = inset.into();
        self
    }

    /// Set the trailing accessory using builder pattern.
    pub fn with_right_view(mut self, right_view: RightViewConfig) -> Self {
        self.right_view = Some(right_view);
        self
    }

    /// The primary text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the primary text.
    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    /// The text color.
    pub fn text_color(&self) -> Option<Color> {
        self.text_color
    }

    /// The placeholder.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// The symmetric inset applied to the editable text area.
    pub fn center_inset(&self) -> Point {
        self.center_inset
    }

    /// The trailing accessory description.
    pub fn right_view(&self) -> Option<&RightViewConfig> {
        self.right_view.as_ref()
    }

    /// Mutable access to the accessory description.
    ///
    /// Only the accessory's image and label have setters, so this cannot
    /// change its tint or padding.
    pub fn right_view_mut(&mut self) -> Option<&mut RightViewConfig> {
        self.right_view.as_mut()
    }

    // =========================================================================
    // Declarative loading
    // =========================================================================

    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let document: ConfigDocument = toml::from_str(source)?;
        document.try_into()
    }

    /// Parse a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let document: ConfigDocument = serde_json::from_str(source)?;
        document.try_into()
    }

    /// Load a document from disk.
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loading field configuration");

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_toml_str(&source)
        }
    }
}

pub(crate) fn sanitize_padding(padding: f32) -> f32 {
    if padding.is_nan() || padding < 0.0 {
        tracing::warn!(target: targets::CONFIG, padding, "clamping accessory padding to zero");
        0.0
    } else {
        padding
    }
}

fn parse_color(field: &'static str, value: Option<String>) -> Result<Option<Color>> {
    value
        .map(|hex| Color::from_hex(&hex).ok_or_else(|| ConfigError::invalid_color(field, hex)))
        .transpose()
}

/// On-disk shape of a configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
    text: Option<String>,
    text_color: Option<String>,
    placeholder: Option<String>,
    #[serde(default)]
    center_inset: Point,
    right_view: Option<RightViewDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RightViewDocument {
    image: Option<Image>,
    text: Option<String>,
    tint_color: Option<String>,
    #[serde(default)]
    padding: f32,
}

impl TryFrom<RightViewDocument> for RightViewConfig {
    type Error = ConfigError;

    fn try_from(doc: RightViewDocument) -> Result<Self> {
        if doc.padding.is_nan() || doc.padding < 0.0 {
            return Err(ConfigError::InvalidPadding { value: doc.padding });
        }
        Ok(Self {
            image: doc.image,
            text: doc.text,
            tint_color: parse_color("right_view.tint_color", doc.tint_color)?,
            padding: doc.padding,
        })
    }
}

impl TryFrom<ConfigDocument> for TextFieldConfig {
    type Error = ConfigError;

    fn try_from(doc: ConfigDocument) -> Result<Self> {
        Ok(Self {
            text: doc.text,
            text_color: parse_color("text_color", doc.text_color)?,
            placeholder: doc.placeholder,
            center_inset: doc.center_inset,
            right_view: doc.right_view.map(RightViewConfig::try_from).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;

    #[test]
    fn test_builder_sets_every_field() {
        let config = TextFieldConfig::new()
            .with_text("hunter2")
            .with_text_color(Color::BLUE)
            .with_placeholder("Password")
            .with_center_inset((12.0, 4.0))
            .with_right_view(
                RightViewConfig::new(8.0)
                    .with_image(Image::named("lock.closed"))
                    .with_tint_color(Color::GRAY),
            );

        assert_eq!(config.text(), Some("hunter2"));
        assert_eq!(config.text_color(), Some(Color::BLUE));
        assert_eq!(config.placeholder(), Some("Password"));
        assert_eq!(config.center_inset(), Point::new(12.0, 4.0));
        let right = config.right_view().unwrap();
        assert_eq!(right.image().map(Image::name), Some("lock.closed"));
        assert_eq!(right.text(), None);
        assert_eq!(right.tint_color(), Some(Color::GRAY));
        assert_eq!(right.padding(), 8.0);
    }

    #[test]
    fn test_defaults() {
        let config = TextFieldConfig::new();
        assert_eq!(config.center_inset(), Point::ZERO);
        assert!(config.right_view().is_none());
        assert_eq!(RightViewConfig::default().padding(), 0.0);
    }

    #[test]
    fn test_padding_is_never_negative() {
        assert_eq!(RightViewConfig::new(-3.0).padding(), 0.0);
        assert_eq!(RightViewConfig::new(f32::NAN).padding(), 0.0);
        assert_eq!(RightViewConfig::new(5.0).with_padding(-1.0).padding(), 0.0);
    }

    #[test]
    fn test_mutable_fields() {
        let mut config = TextFieldConfig::new()
            .with_placeholder("Email")
            .with_right_view(RightViewConfig::new(4.0).with_text("Show"));

        config.set_text(Some("abc".into()));
        let right = config.right_view_mut().unwrap();
        right.set_image(Some(Image::named("eye")));
        right.set_text(None);

        assert_eq!(config.text(), Some("abc"));
        assert_eq!(config.placeholder(), Some("Email"));
        let right = config.right_view().unwrap();
        assert_eq!(right.image(), Some(&Image::named("eye")));
        assert_eq!(right.text(), None);
        assert_eq!(right.padding(), 4.0);
    }

    #[test]
    fn test_from_toml() {
        let config = TextFieldConfig::from_toml_str(
            r##"
            placeholder = "Password"
            text_color = "#FF0000"
            center_inset = { x = 12.0, y = 4.0 }

            [right_view]
            image = { name = "lock.closed", width = 20.0, height = 18.0 }
            tint_color = "#0000FF"
            padding = 8.0
            "##,
        )
        .unwrap();

        assert_eq!(config.text(), None);
        assert_eq!(config.placeholder(), Some("Password"));
        assert_eq!(config.text_color(), Some(Color::RED));
        assert_eq!(config.center_inset(), Point::new(12.0, 4.0));

        let right = config.right_view().unwrap();
        assert_eq!(right.image(), Some(&Image::new("lock.closed", Size::new(20.0, 18.0))));
        assert_eq!(right.tint_color(), Some(Color::BLUE));
        assert_eq!(right.padding(), 8.0);
    }

    #[test]
    fn test_from_json() {
        let config = TextFieldConfig::from_json_str(
            r#"{ "text": "abc", "right_view": { "text": "Show" } }"#,
        )
        .unwrap();

        assert_eq!(config.text(), Some("abc"));
        assert_eq!(config.center_inset(), Point::ZERO);
        let right = config.right_view().unwrap();
        assert_eq!(right.text(), Some("Show"));
        assert_eq!(right.padding(), 0.0);
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let err = TextFieldConfig::from_toml_str(r#"text_color = "red""#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidColor { field: "text_color", ref value } if value == "red"
        ));
    }

    #[test]
    fn test_negative_padding_is_rejected() {
        let err = TextFieldConfig::from_toml_str("[right_view]\npadding = -2.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPadding { value } if value == -2.0));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = TextFieldConfig::from_json_str(r##"{ "colour": "#FFFFFF" }"##).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = TextFieldConfig::from_path("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
