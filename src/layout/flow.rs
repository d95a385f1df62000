//! Page-break decisions.
//!
//! These are the only functions that add pages to a [`Surface`].

use super::Surface;

/// Outcome of a page-flow check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// The current page had room; nothing changed
    RoomAvailable,
    /// A new page was started and the cursor moved to its top margin
    PageFull,
}

/// Start a new page when the cursor has passed the page-break threshold.
///
/// Calling this twice in a row adds at most one page, because a fresh page
/// puts the cursor at the top margin, which never exceeds the threshold.
pub fn ensure_room(surface: &mut Surface) -> FlowState {
    let threshold = surface.config().page_break_threshold;
    if surface.cursor_y() > threshold {
        log::debug!(
            "Cursor at {:.1}mm past threshold {:.1}mm, starting page {}",
            surface.cursor_y(),
            threshold,
            surface.page_count() + 1
        );
        surface.start_page();
        FlowState::PageFull
    } else {
        FlowState::RoomAvailable
    }
}

/// Start a new page when a block of `height` would cross the bottom margin.
///
/// A block taller than an entire page is placed at the top of the current
/// page if the cursor is already there, so this never loops.
pub fn ensure_fits(surface: &mut Surface, height: f32) -> FlowState {
    if surface.cursor_y() + height <= surface.config().bottom_limit() {
        return FlowState::RoomAvailable;
    }
    if surface.at_page_top() {
        log::debug!(
            "Block of {:.1}mm exceeds the page body; placing it anyway",
            height
        );
        return FlowState::RoomAvailable;
    }

    log::debug!(
        "Block of {:.1}mm does not fit at {:.1}mm, starting page {}",
        height,
        surface.cursor_y(),
        surface.page_count() + 1
    );
    surface.start_page();
    FlowState::PageFull
}
