//! Integration tests driving a TextField the way a host screen does.

use std::io::Write;
use std::sync::Arc;

use accessory_field::prelude::*;
use parking_lot::Mutex;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Minimal host: owns the field and flips icon + secure entry on each toggle.
struct PasswordScreen {
    field: Arc<Mutex<TextField>>,
    _subscriptions: ConnectionSet,
}

impl PasswordScreen {
    fn new(config: TextFieldConfig) -> Self {
        let mut field = TextField::with_config(config);
        field.set_secure_entry(true);
        let observer = field.toggle_state();
        let field = Arc::new(Mutex::new(field));

        let mut subscriptions = ConnectionSet::new();
        let weak = Arc::downgrade(&field);
        subscriptions.insert(observer.connect_scoped(move |&revealed| {
            let Some(field) = weak.upgrade() else { return };
            let mut field = field.lock();
            let icon = if revealed { "lock.open" } else { "lock.closed" };
            field.set_accessory_image(Some(Image::named(icon)));
            field.set_secure_entry(!revealed);
        }));

        Self {
            field,
            _subscriptions: subscriptions,
        }
    }

    fn tap_accessory(&self) {
        let activator = self.field.lock().accessory().activator();
        // The field is unlocked here so the toggle handler can take the lock.
        assert!(activator.activate());
    }
}

fn password_config() -> TextFieldConfig {
    TextFieldConfig::new()
        .with_placeholder("Password")
        .with_center_inset((10.0, 5.0))
        .with_right_view(
            RightViewConfig::new(8.0).with_image(Image::new("lock.closed", Size::new(22.0, 22.0))),
        )
}

#[test]
fn toggle_drives_icon_and_secure_entry() {
    init_tracing();
    let screen = PasswordScreen::new(password_config());
    screen.field.lock().edit_text("hunter2");
    assert_eq!(screen.field.lock().display_text(), "•••••••");

    screen.tap_accessory();
    {
        let field = screen.field.lock();
        assert!(!field.is_secure_entry());
        assert_eq!(field.display_text(), "hunter2");
        assert_eq!(field.accessory().image().map(Image::name), Some("lock.open"));
        let cached = field.config().unwrap();
        assert_eq!(cached.text(), Some("hunter2"));
        assert_eq!(
            cached.right_view().and_then(|r| r.image()).map(Image::name),
            Some("lock.open")
        );
    }

    screen.tap_accessory();
    let field = screen.field.lock();
    assert!(field.is_secure_entry());
    assert_eq!(field.accessory().image().map(Image::name), Some("lock.closed"));
}

#[test]
fn multiple_subscribers_each_receive_every_value() {
    init_tracing();
    let field = TextField::with_config(password_config());
    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(Vec::new()));

    let mut subscriptions = ConnectionSet::new();
    for sink in [first.clone(), second.clone()] {
        subscriptions.insert(field.toggle_state().connect_scoped(move |&v| sink.lock().push(v)));
    }

    for _ in 0..3 {
        field.accessory().activate();
    }

    assert_eq!(*first.lock(), vec![true, false, true]);
    assert_eq!(*second.lock(), vec![true, false, true]);
}

#[test]
fn edits_reach_cache_after_host_unsubscribes() {
    let mut field = TextField::with_config(password_config());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let guard = field.text_edited().connect_scoped(move |t| sink.lock().push(t.clone()));

    field.edit_text("a");
    drop(guard);
    field.edit_text("abc");

    assert_eq!(*seen.lock(), vec!["a".to_string()]);
    assert_eq!(field.text(), "abc");
    assert_eq!(field.config().unwrap().text(), Some("abc"));
}

#[test]
fn released_subscription_stops_receiving() {
    let field = TextField::new();
    let values = Arc::new(Mutex::new(Vec::new()));
    let sink = values.clone();
    let guard = field.toggle_state().connect_scoped(move |&v| sink.lock().push(v));

    field.accessory().activate();
    guard.disconnect();
    field.accessory().activate();

    assert_eq!(*values.lock(), vec![true]);
}

#[test]
fn replacing_right_view_with_none_hides_accessory() {
    let mut field = TextField::with_config(password_config());
    assert_eq!(field.accessory_view_mode(), AccessoryViewMode::AlwaysVisible);

    field.apply(TextFieldConfig::new().with_placeholder("Password"));
    assert_eq!(field.accessory_view_mode(), AccessoryViewMode::Hidden);
}

#[test]
fn editable_rect_formula_over_representative_inputs() {
    // (bounds width, bounds height, inset x, inset y, padding, accessory width)
    let cases = [
        (320.0, 44.0, 0.0, 0.0, 0.0, 0.0),
        (320.0, 44.0, 12.0, 4.0, 8.0, 22.0),
        (100.0, 30.0, 5.0, 5.0, 50.0, 40.0),
    ];

    for (width, height, ix, iy, padding, accessory_width) in cases {
        let mut field = TextField::with_config(
            TextFieldConfig::new()
                .with_center_inset((ix, iy))
                .with_right_view(RightViewConfig::new(padding).with_text("Show")),
        );
        field.set_accessory_measured_size(Some(Size::new(accessory_width, 20.0)));

        let bounds = Rect::new(0.0, 0.0, width, height);
        let rect = field.text_rect(bounds);
        assert_eq!(rect.width(), width - 2.0 * ix - padding - accessory_width);
        assert_eq!(rect.height(), height - 2.0 * iy);
        assert_eq!(field.editing_rect(bounds), rect);
    }
}

#[test]
fn configuration_loaded_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r##"
placeholder = "Password"
text_color = "#1C1C1E"

[right_view]
text = "Show"
padding = 6.0
"##
    )
    .unwrap();

    let config = TextFieldConfig::from_path(file.path()).unwrap();
    let field = TextField::with_config(config);
    assert_eq!(field.placeholder(), Some("Password"));
    assert_eq!(field.text_color(), Color::from_hex("#1C1C1E"));
    assert_eq!(field.accessory().title(), Some("Show"));
    assert_eq!(field.accessory().padding(), 6.0);
}

#[test]
fn json_configuration_loaded_from_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{ "text": "abc", "center_inset": {{ "x": 3.0 }} }}"#).unwrap();

    let config = TextFieldConfig::from_path(file.path()).unwrap();
    assert_eq!(config.text(), Some("abc"));
    assert_eq!(config.center_inset(), Point::new(3.0, 0.0));
}
