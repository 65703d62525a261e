//! Viewport width to layout mode.

/// Viewports narrower than this many pixels use the card layout.
pub const MOBILE_BREAKPOINT: u32 = 1024;

/// Which of the two render paths a viewport gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Dense table with a header row.
    #[default]
    Table,
    /// One stacked card per record.
    Cards,
}

impl LayoutMode {
    /// Layout for a viewport `width` pixels wide. `width == breakpoint`
    /// is still a table.
    pub fn for_width(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            LayoutMode::Cards
        } else {
            LayoutMode::Table
        }
    }

    pub fn is_mobile(self) -> bool {
        self == LayoutMode::Cards
    }
}
