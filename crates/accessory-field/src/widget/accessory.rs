//! Trailing accessory control.
//!
//! The accessory is a small toggle button embedded at the trailing edge of a
//! [`TextField`](super::TextField). It shows an image and/or a label and
//! carries a selected flag. Host event dispatch calls
//! [`activate`](AccessoryButton::activate); the owning field decides what an
//! activation means.

use std::sync::Arc;

use accessory_field_core::logging::targets;
use accessory_field_core::{Property, Signal, SignalObserver, WeakSignal};

use crate::config::sanitize_padding;
use crate::types::{Color, Image, Rect, Size};

/// Whether the accessory is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessoryViewMode {
    /// Not rendered (no image and no label).
    #[default]
    Hidden,
    /// Always rendered.
    AlwaysVisible,
}

/// The trailing toggle button of a text field.
///
/// Visibility follows content: after every change to the image or the label
/// the view mode is recomputed, so the order in which they are set never
/// matters.
///
/// # Signals
///
/// - [`activated`](Self::activated): A tap/click reported by the host
///
/// Only [`activate`](Self::activate) and [`AccessoryActivator`] emit it, and
/// only the button can complete it.
pub struct AccessoryButton {
    image: Option<Image>,
    title: Option<String>,
    tint_color: Option<Color>,
    padding: f32,
    view_mode: AccessoryViewMode,

    /// Size reported by the host's measurement pass, if any.
    measured_size: Option<Size>,

    /// Geometry assigned by the last layout pass.
    geometry: Rect,

    /// Shared with the owning field's activation slot.
    selected: Arc<Property<bool>>,

    activated: Signal<()>,
}

impl AccessoryButton {
    /// Create an empty, hidden, unselected accessory.
    pub fn new() -> Self {
        Self {
            image: None,
            title: None,
            tint_color: None,
            padding: 0.0,
            view_mode: AccessoryViewMode::Hidden,
            measured_size: None,
            geometry: Rect::ZERO,
            selected: Arc::new(Property::new(false)),
            activated: Signal::new(),
        }
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// The displayed image.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Set the displayed image and recompute visibility.
    pub(crate) fn set_image(&mut self, image: Option<Image>) {
        self.image = image;
        self.update_view_mode();
    }

    /// The displayed label.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the displayed label and recompute visibility.
    pub(crate) fn set_title(&mut self, title: Option<String>) {
        self.title = title;
        self.update_view_mode();
    }

    /// The tint applied to image and label.
    pub fn tint_color(&self) -> Option<Color> {
        self.tint_color
    }

    /// Set the tint.
    pub(crate) fn set_tint_color(&mut self, color: Option<Color>) {
        self.tint_color = color;
    }

    /// Horizontal gap between the accessory and the field's trailing edge.
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Set the padding. Negative or NaN padding is clamped to zero.
    pub(crate) fn set_padding(&mut self, padding: f32) {
        self.padding = sanitize_padding(padding);
    }

    /// Current visibility.
    pub fn view_mode(&self) -> AccessoryViewMode {
        self.view_mode
    }

    /// Whether the accessory is rendered.
    pub fn is_visible(&self) -> bool {
        self.view_mode == AccessoryViewMode::AlwaysVisible
    }

    fn has_content(&self) -> bool {
        self.image.is_some() || self.title.as_deref().is_some_and(|t| !t.is_empty())
    }

    fn update_view_mode(&mut self) {
        let mode = if self.has_content() {
            AccessoryViewMode::AlwaysVisible
        } else {
            AccessoryViewMode::Hidden
        };
        if self.view_mode != mode {
            tracing::trace!(target: targets::ACCESSORY, ?mode, "accessory visibility changed");
            self.view_mode = mode;
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// The size the layout reserves for the accessory.
    ///
    /// The host's measured size wins; otherwise the image's intrinsic size;
    /// otherwise zero. Visibility plays no part.
    pub fn measured_size(&self) -> Size {
        self.measured_size
            .or_else(|| self.image.as_ref().map(Image::size))
            .unwrap_or(Size::ZERO)
    }

    /// Record the host's measurement, or clear it with `None`.
    pub(crate) fn set_measured_size(&mut self, size: Option<Size>) {
        self.measured_size = size;
    }

    /// Geometry assigned by the last layout pass.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub(crate) fn set_geometry(&mut self, rect: Rect) {
        self.geometry = rect;
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Whether the accessory is currently selected.
    pub fn is_selected(&self) -> bool {
        self.selected.get()
    }

    pub(crate) fn selection(&self) -> Arc<Property<bool>> {
        self.selected.clone()
    }

    /// Subscribe-only handle to the activation signal.
    pub fn activated(&self) -> SignalObserver<()> {
        self.activated.observer()
    }

    /// Deliver an activation (tap/click) from the host's event dispatch.
    pub fn activate(&self) {
        tracing::trace!(target: targets::ACCESSORY, "accessory activated");
        self.activated.emit(());
    }

    /// A detached handle for the host's event dispatch.
    ///
    /// Lets the host deliver activations without borrowing the field, which
    /// matters when its own toggle handler needs to mutate the field.
    pub fn activator(&self) -> AccessoryActivator {
        AccessoryActivator {
            activated: self.activated.downgrade(),
        }
    }
}

/// Delivers activations to an [`AccessoryButton`] without borrowing it.
#[derive(Clone)]
pub struct AccessoryActivator {
    activated: WeakSignal<()>,
}

impl AccessoryActivator {
    /// Activate the accessory. Returns `false` once the accessory is gone.
    pub fn activate(&self) -> bool {
        tracing::trace!(target: targets::ACCESSORY, "accessory activated");
        self.activated.emit(())
    }
}

impl Default for AccessoryButton {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AccessoryButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessoryButton")
            .field("image", &self.image)
            .field("title", &self.title)
            .field("padding", &self.padding)
            .field("view_mode", &self.view_mode)
            .field("selected", &self.is_selected())
            .finish()
    }
}

static_assertions::assert_impl_all!(AccessoryButton: Send, Sync);
