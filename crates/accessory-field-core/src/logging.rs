//! Logging and profiling facilities for accessory-field.
//!
//! Everything here sits on the `tracing` facade: per-subsystem target names
//! for filtering, and [`PerfSpan`] for timing a unit of work.
//!
//! # Tracing Integration
//!
//! accessory-field uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("accessory_field=debug"))
//!     .init();
//! ```

/// Log targets, one per subsystem, usable in `EnvFilter` directives such as
/// `accessory_field::layout=trace`.
pub mod targets {
    /// Root of the core crate.
    pub const CORE: &str = "accessory_field_core";
    /// Signal emission, connection and completion.
    pub const SIGNAL: &str = "accessory_field_core::signal";
    /// Text field controller target.
    pub const FIELD: &str = "accessory_field::field";
    /// Trailing accessory target.
    pub const ACCESSORY: &str = "accessory_field::accessory";
    /// Layout computation target.
    pub const LAYOUT: &str = "accessory_field::layout";
    /// Declarative configuration loading target.
    pub const CONFIG: &str = "accessory_field::config";
}

/// Times a unit of work under the `accessory_field::perf` target.
///
/// ```
/// use accessory_field_core::PerfSpan;
///
/// let _span = PerfSpan::new("text_field_layout");
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter an `info` span named after `name`; it closes when the guard drops.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "accessory_field::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
