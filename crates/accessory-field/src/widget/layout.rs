//! Layout invalidation and field geometry.
//!
//! Changes mark the field as dirty; the host's layout system runs the actual
//! pass later. Marking an already dirty field is a no-op, so any number of
//! configuration updates between two passes cost one pass.

use crate::types::{Rect, Size};

/// Tracks whether a field needs a layout pass.
#[derive(Debug, Default)]
pub(crate) struct LayoutInvalidator {
    dirty: bool,
    /// Requests coalesced since the last pass.
    pending_requests: u32,
}

impl LayoutInvalidator {
    /// Create a clean invalidator.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mark layout as needed.
    ///
    /// Returns `true` only on the clean → dirty transition.
    pub(crate) fn invalidate(&mut self) -> bool {
        self.pending_requests = self.pending_requests.saturating_add(1);
        !std::mem::replace(&mut self.dirty, true)
    }

    /// Check if a layout pass is needed.
    #[inline]
    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// How many requests were folded into the pending pass.
    pub(crate) fn pending_requests(&self) -> u32 {
        self.pending_requests
    }

    /// Clear the dirty state after a pass.
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
        self.pending_requests = 0;
    }
}

/// The three rectangles a field answers for one set of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldLayout {
    /// Region for displayed text.
    pub text_rect: Rect,
    /// Region for text while editing. Always equal to `text_rect`.
    pub editing_rect: Rect,
    /// Region for the trailing accessory.
    pub accessory_rect: Rect,
}

/// The toolkit's stock placement for a trailing accessory.
///
/// Flush with the trailing edge of `bounds` and vertically centred.
pub(crate) fn default_accessory_rect(bounds: Rect, accessory: Size) -> Rect {
    Rect::new(
        bounds.right() - accessory.width,
        bounds.top() + (bounds.height() - accessory.height) / 2.0,
        accessory.width,
        accessory.height,
    )
}
