//! accessory-field - a configurable text field with a toggleable trailing accessory.
//!
//! This is the umbrella crate: it re-exports the core signal/property
//! plumbing and adds the value types, the declarative configuration model
//! and the [`TextField`](widget::TextField) widget.
//!
//! # Example
//!
//! ```
//! use accessory_field::prelude::*;
//!
//! let config = TextFieldConfig::from_toml_str(r##"
//!     placeholder = "Password"
//!     center_inset = { x = 12.0, y = 4.0 }
//!
//!     [right_view]
//!     image = { name = "lock.closed", width = 20.0, height = 20.0 }
//!     padding = 8.0
//! "##)?;
//!
//! let mut field = TextField::with_config(config);
//! field.set_secure_entry(true);
//!
//! let layout = field.perform_layout(Rect::new(0.0, 0.0, 320.0, 44.0));
//! assert_eq!(layout.text_rect.width(), 320.0 - 24.0 - 8.0 - 20.0);
//! # Ok::<(), accessory_field::config::ConfigError>(())
//! ```

pub use accessory_field_core::*;

pub mod config;
pub mod prelude;
pub mod types;
pub mod widget;
