//! Prelude module for accessory-field.
//!
//! ```ignore
//! use accessory_field::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot system (`Signal`, `SignalObserver`, `ConnectionSet`)
//! - Configuration model (`TextFieldConfig`, `RightViewConfig`)
//! - Widgets (`TextField`, `AccessoryButton`)
//! - Geometry types (`Point`, `Size`, `Rect`, `Color`, `Image`)

pub use accessory_field_core::{ConnectionGuard, ConnectionSet, Signal, SignalObserver};

pub use crate::config::{ConfigError, RightViewConfig, TextFieldConfig};
pub use crate::types::{Color, Image, Point, Rect, Size};
pub use crate::widget::{
    AccessoryActivator, AccessoryButton, AccessoryViewMode, EchoMode, FieldLayout, TextField,
};
