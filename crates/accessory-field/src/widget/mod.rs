//! Widget layer for accessory-field.
//!
//! - [`TextField`]: the configurable field and its layout/toggle behavior
//! - [`AccessoryButton`]: the trailing toggle control the field owns
//! - [`FieldLayout`]: the result of a layout pass
//!
//! # Host integration
//!
//! The field does no rendering, hit-testing or text editing itself. The host
//! toolkit feeds it events and asks it for geometry:
//!
//! - user edits → [`TextField::edit_text`]
//! - taps on the accessory → [`AccessoryButton::activate`], or an
//!   [`AccessoryActivator`] when the host cannot borrow the field
//! - layout passes → [`TextField::perform_layout`] or the individual
//!   [`text_rect`](TextField::text_rect), [`editing_rect`](TextField::editing_rect)
//!   and [`accessory_rect`](TextField::accessory_rect) queries
//!
//! and listens to [`TextField::toggle_state`], [`TextField::text_edited`] and
//! [`TextField::layout_requested`]. Accessory measurements go in through
//! [`TextField::set_accessory_measured_size`].

mod accessory;
mod layout;
mod text_field;

pub use accessory::{AccessoryActivator, AccessoryButton, AccessoryViewMode};
pub use layout::FieldLayout;
pub use text_field::{EchoMode, TextField};
