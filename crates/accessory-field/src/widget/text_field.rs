//! Configurable single-line text field with a toggleable trailing accessory.
//!
//! The TextField widget renders a [`TextFieldConfig`], reserves room for a
//! trailing [`AccessoryButton`] when answering geometry queries, and
//! publishes the accessory's selected state as a stream of booleans.
//!
//! # Example
//!
//! ```
//! use accessory_field::config::{RightViewConfig, TextFieldConfig};
//! use accessory_field::types::Image;
//! use accessory_field::widget::TextField;
//!
//! let mut field = TextField::new();
//! field.set_secure_entry(true);
//! field.apply(
//!     TextFieldConfig::new()
//!         .with_placeholder("Password")
//!         .with_right_view(RightViewConfig::new(8.0).with_image(Image::named("lock.closed"))),
//! );
//!
//! // The host maps the toggle to the secure-entry flag.
//! let _conn = field.toggle_state().connect(|revealed| {
//!     println!("password revealed: {}", revealed);
//! });
//!
//! field.accessory().activate(); // prints "password revealed: true"
//! ```

use std::sync::Arc;

use accessory_field_core::logging::targets;
use accessory_field_core::{ConnectionSet, PerfSpan, Property, Signal, SignalObserver};

use crate::config::TextFieldConfig;
use crate::types::{Color, Image, Point, Rect, Size};
use crate::widget::accessory::{AccessoryButton, AccessoryViewMode};
use crate::widget::layout::{default_accessory_rect, FieldLayout, LayoutInvalidator};

/// Echo mode determines how text is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EchoMode {
    /// Display characters as entered (default).
    #[default]
    Normal,
    /// Display a mask character instead of actual text (for passwords).
    Password,
    /// Don't display anything as the user types.
    NoEcho,
}

/// A text field driven by a declarative configuration.
///
/// The field keeps the last applied [`TextFieldConfig`] around so that
/// field-level reads (such as the current text) stay correct; user edits
/// are written back into it.
///
/// # Signals
///
/// - [`text_edited`](Self::text_edited): Every user edit, never [`apply`](Self::apply)
/// - [`layout_requested`](Self::layout_requested): The field went from clean to
///   needing layout
/// - [`toggle_state`](Self::toggle_state): The accessory's selected flag after
///   each activation (read-only handle)
///
/// All three are handed out as read-only observers: only the field emits
/// them, and its own subscriptions live as long as it does.
///
/// # Teardown
///
/// Dropping the field releases its internal subscriptions and completes the
/// toggle stream, detaching every subscriber.
pub struct TextField {
    text: String,
    text_color: Option<Color>,
    placeholder: Option<String>,
    center_inset: Point,

    echo_mode: EchoMode,
    password_char: char,

    accessory: AccessoryButton,

    /// Last applied configuration, shared with the text-edit slot.
    config: Arc<Property<Option<TextFieldConfig>>>,

    layout: LayoutInvalidator,

    /// Internal slots wired at construction.
    subscriptions: ConnectionSet,

    toggle_state: Signal<bool>,

    text_edited: Signal<String>,

    layout_requested: Signal<()>,
}

impl TextField {
    /// Create an empty field with a hidden, unselected accessory.
    pub fn new() -> Self {
        let accessory = AccessoryButton::new();
        let toggle_state = Signal::new();
        let text_edited = Signal::new();
        let config = Arc::new(Property::new(None));
        let mut subscriptions = ConnectionSet::new();

        let selected = accessory.selection();
        let toggle = toggle_state.downgrade();
        subscriptions.insert(accessory.activated().connect_scoped(move |_| {
            let now = !selected.get();
            selected.set(now);
            tracing::debug!(target: targets::FIELD, selected = now, "accessory toggled");
            toggle.emit(now);
        }));

        let cached = Arc::clone(&config);
        subscriptions.insert(text_edited.connect_scoped(move |text: &String| {
            cached.update(|config: &mut Option<TextFieldConfig>| {
                if let Some(config) = config {
                    config.set_text(Some(text.clone()));
                }
            });
        }));

        Self {
            text: String::new(),
            text_color: None,
            placeholder: None,
            center_inset: Point::ZERO,
            echo_mode: EchoMode::Normal,
            password_char: '•',
            accessory,
            config,
            layout: LayoutInvalidator::new(),
            subscriptions,
            toggle_state,
            text_edited,
            layout_requested: Signal::new(),
        }
    }

    /// Create a field and apply a configuration to it.
    pub fn with_config(config: TextFieldConfig) -> Self {
        let mut field = Self::new();
        field.apply(config);
        field
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Apply a configuration, replacing all rendering state derived from the
    /// previous one.
    ///
    /// `None` is a no-op: the field never clears itself. The accessory's
    /// selected flag is not touched.
    pub fn apply(&mut self, config: impl Into<Option<TextFieldConfig>>) {
        let Some(config) = config.into() else {
            tracing::trace!(target: targets::FIELD, "apply(None) ignored");
            return;
        };
        tracing::debug!(
            target: targets::FIELD,
            has_right_view = config.right_view().is_some(),
            "applying configuration"
        );

        self.text = config.text().unwrap_or_default().to_owned();
        self.text_color = config.text_color();
        self.placeholder = config.placeholder().map(str::to_owned);
        self.center_inset = config.center_inset();

        // Field by field so each content setter recomputes visibility.
        let right = config.right_view();
        self.accessory.set_image(right.and_then(|r| r.image().cloned()));
        self.accessory.set_title(right.and_then(|r| r.text().map(str::to_owned)));
        self.accessory.set_tint_color(right.and_then(|r| r.tint_color()));
        self.accessory.set_padding(right.map_or(0.0, |r| r.padding()));

        self.config.update(|current| *current = Some(config));
        self.request_layout();
    }

    /// A copy of the retained configuration.
    pub fn config(&self) -> Option<TextFieldConfig> {
        self.config.get()
    }

    /// Swap the accessory image, keeping the retained configuration in step.
    ///
    /// Typically called by the host in response to [`toggle_state`](Self::toggle_state).
    pub fn set_accessory_image(&mut self, image: Option<Image>) {
        self.config.update(|config| {
            if let Some(right) = config.as_mut().and_then(TextFieldConfig::right_view_mut) {
                right.set_image(image.clone());
            }
        });
        self.accessory.set_image(image);
        self.request_layout();
    }

    // =========================================================================
    // Rendering state
    // =========================================================================

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text color, `None` for the toolkit default.
    pub fn text_color(&self) -> Option<Color> {
        self.text_color
    }

    /// The placeholder shown while the text is empty.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// The symmetric inset applied to the text area.
    pub fn center_inset(&self) -> Point {
        self.center_inset
    }

    /// The trailing accessory.
    pub fn accessory(&self) -> &AccessoryButton {
        &self.accessory
    }

    /// Record the host's measurement of the accessory, or clear it with `None`.
    pub fn set_accessory_measured_size(&mut self, size: Option<Size>) {
        self.accessory.set_measured_size(size);
        self.request_layout();
    }

    /// Current accessory visibility.
    pub fn accessory_view_mode(&self) -> AccessoryViewMode {
        self.accessory.view_mode()
    }

    /// Whether the accessory is selected.
    pub fn is_accessory_selected(&self) -> bool {
        self.accessory.is_selected()
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Deliver a user edit from the host's text-editing machinery.
    ///
    /// Updates the rendered text, writes it into the retained configuration
    /// and emits `text_edited`.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text == text {
            return;
        }
        self.text.clone_from(&text);
        self.text_edited.emit(text);
    }

    /// Get the echo mode.
    pub fn echo_mode(&self) -> EchoMode {
        self.echo_mode
    }

    /// Set the echo mode.
    pub fn set_echo_mode(&mut self, mode: EchoMode) {
        self.echo_mode = mode;
    }

    /// Set echo mode using builder pattern.
    pub fn with_echo_mode(mut self, mode: EchoMode) -> Self {
        self.echo_mode = mode;
        self
    }

    /// Whether typed characters are masked.
    pub fn is_secure_entry(&self) -> bool {
        self.echo_mode != EchoMode::Normal
    }

    /// Toggle between password masking and plain display.
    pub fn set_secure_entry(&mut self, secure: bool) {
        self.set_echo_mode(if secure {
            EchoMode::Password
        } else {
            EchoMode::Normal
        });
    }

    /// Get the password mask character.
    pub fn password_char(&self) -> char {
        self.password_char
    }

    /// Set the password mask character.
    pub fn set_password_char(&mut self, ch: char) {
        self.password_char = ch;
    }

    /// The text as it should be drawn under the current echo mode.
    pub fn display_text(&self) -> String {
        match self.echo_mode {
            EchoMode::Normal => self.text.clone(),
            EchoMode::Password => self
                .password_char
                .to_string()
                .repeat(self.text.chars().count()),
            EchoMode::NoEcho => String::new(),
        }
    }

    // =========================================================================
    // Streams
    // =========================================================================

    /// Subscribe-only handle to user edits.
    pub fn text_edited(&self) -> SignalObserver<String> {
        self.text_edited.observer()
    }

    /// Subscribe-only handle to layout requests.
    pub fn layout_requested(&self) -> SignalObserver<()> {
        self.layout_requested.observer()
    }

    /// Subscribe-only handle to the accessory's toggle stream.
    ///
    /// One value per activation, delivered synchronously in activation order.
    /// Nothing is replayed to late subscribers. The stream completes when
    /// the field is dropped.
    pub fn toggle_state(&self) -> SignalObserver<bool> {
        self.toggle_state.observer()
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Ask the host for a layout pass. Repeated requests before the pass coalesce.
    pub fn request_layout(&mut self) {
        if self.layout.invalidate() {
            tracing::trace!(target: targets::LAYOUT, "layout requested");
            self.layout_requested.emit(());
        }
    }

    /// Whether a layout pass is pending.
    pub fn needs_layout(&self) -> bool {
        self.layout.is_dirty()
    }

    /// Region for displayed text within `bounds`.
    ///
    /// `bounds` shrinks by the center inset on each side, then loses
    /// `padding + accessory width` on the trailing side. The accessory width
    /// is reserved even while it is hidden. The result is not clamped.
    pub fn text_rect(&self, bounds: Rect) -> Rect {
        let mut rect = bounds.inset(self.center_inset.x, self.center_inset.y);
        rect.size.width -= self.accessory.padding() + self.accessory.measured_size().width;
        rect
    }

    /// Region for text while editing. Same math as [`text_rect`](Self::text_rect)
    /// so focus never shifts the text.
    pub fn editing_rect(&self, bounds: Rect) -> Rect {
        self.text_rect(bounds)
    }

    /// Region for the accessory: the stock trailing placement moved left by
    /// the padding.
    pub fn accessory_rect(&self, bounds: Rect) -> Rect {
        default_accessory_rect(bounds, self.accessory.measured_size())
            .offset(-self.accessory.padding(), 0.0)
    }

    /// Run a layout pass: answer all three geometry queries, place the
    /// accessory and clear the pending request.
    pub fn perform_layout(&mut self, bounds: Rect) -> FieldLayout {
        let _span = PerfSpan::new("text_field_layout");
        let layout = FieldLayout {
            text_rect: self.text_rect(bounds),
            editing_rect: self.editing_rect(bounds),
            accessory_rect: self.accessory_rect(bounds),
        };
        if layout.text_rect.width() < 0.0 {
            tracing::debug!(
                target: targets::LAYOUT,
                width = layout.text_rect.width(),
                "text rect narrower than accessory reservation"
            );
        }
        self.accessory.set_geometry(layout.accessory_rect);
        tracing::trace!(
            target: targets::LAYOUT,
            coalesced = self.layout.pending_requests(),
            "layout pass complete"
        );
        self.layout.mark_clean();
        layout
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TextField {
    fn drop(&mut self) {
        tracing::trace!(target: targets::FIELD, "tearing down text field");
        self.subscriptions.clear();
        self.toggle_state.close();
    }
}

impl std::fmt::Debug for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextField")
            .field("text", &self.display_text())
            .field("placeholder", &self.placeholder)
            .field("center_inset", &self.center_inset)
            .field("echo_mode", &self.echo_mode)
            .field("accessory", &self.accessory)
            .finish()
    }
}

static_assertions::assert_impl_all!(TextField: Send, Sync);
