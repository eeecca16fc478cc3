//! Password field example: a trailing lock icon that reveals the password.
//!
//! Simulates a host screen: loads the field from TOML, lays it out, and
//! delivers a few taps on the accessory. Each tap flips the icon and the
//! secure-entry flag through the toggle stream.
//!
//! Run with: RUST_LOG=accessory_field=debug cargo run -p accessory-field --example password_field

use std::sync::Arc;

use accessory_field::config::ConfigError;
use accessory_field::prelude::*;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r##"
placeholder = "Password"
text_color = "#1C1C1E"
center_inset = { x = 12.0, y = 4.0 }

[right_view]
image = { name = "lock.closed", width = 22.0, height = 22.0 }
tint_color = "#8E8E93"
padding = 8.0
"##;

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut field = TextField::with_config(TextFieldConfig::from_toml_str(CONFIG)?);
    field.set_secure_entry(true);
    let toggles = field.toggle_state();
    let field = Arc::new(Mutex::new(field));

    // The host reacts to the toggle by swapping the icon and the echo mode.
    let weak = Arc::downgrade(&field);
    let _subscription = toggles.connect_scoped(move |&revealed| {
        let Some(field) = weak.upgrade() else { return };
        let mut field = field.lock();
        let icon = if revealed { "lock.open" } else { "lock.closed" };
        field.set_accessory_image(Some(Image::new(icon, Size::new(22.0, 22.0))));
        field.set_secure_entry(!revealed);
    });

    let bounds = Rect::new(0.0, 0.0, 320.0, 44.0);
    let activator = {
        let mut field = field.lock();
        field.edit_text("correct horse");
        let layout = field.perform_layout(bounds);
        println!("text rect:      {:?}", layout.text_rect);
        println!("accessory rect: {:?}", layout.accessory_rect);
        field.accessory().activator()
    };

    for tap in 1..=3 {
        activator.activate();
        let field = field.lock();
        println!(
            "tap {tap}: shows {:?} with icon {:?}",
            field.display_text(),
            field.accessory().image().map(Image::name),
        );
    }

    Ok(())
}
