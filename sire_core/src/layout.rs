use serde::Deserialize;

/// How the deck is arranged on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Single scrollable row, no fan
    #[default]
    Spread,
    /// Overlapped and fanned like a held hand
    Stacked,
}

impl LayoutMode {
    pub fn is_stacked(&self) -> bool {
        matches!(self, LayoutMode::Stacked)
    }

    /// Screen-reader style announcement for the current arrangement
    pub fn announcement(&self) -> &'static str {
        match self {
            LayoutMode::Spread => "Cards arranged in a horizontal row.",
            LayoutMode::Stacked => "Cards stacked into a deck.",
        }
    }
}

/// Trigger band for stacking, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutThresholds {
    /// Viewports narrower than this never stack
    pub mobile_width: u16,
    /// Container top must be strictly below this row to stack
    pub trigger_min_top: i32,
    /// Optional upper bound of the band (exclusive)
    pub trigger_max_top: Option<i32>,
}

impl Default for LayoutThresholds {
    fn default() -> Self {
        Self {
            mobile_width: 80,
            trigger_min_top: 8,
            trigger_max_top: None,
        }
    }
}

/// Snapshot of the host viewport as seen by the deck container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    /// Container top relative to the viewport; `None` until it is laid out
    pub container_top: Option<i32>,
}

/// Pure decision rule mapping viewport state to a layout mode.
pub fn detect(thresholds: &LayoutThresholds, width: u16, container_top: i32) -> LayoutMode {
    if width < thresholds.mobile_width {
        return LayoutMode::Spread;
    }
    let above_min = container_top > thresholds.trigger_min_top;
    let below_max = thresholds
        .trigger_max_top
        .map_or(true, |max| container_top < max);
    if above_min && below_max {
        LayoutMode::Stacked
    } else {
        LayoutMode::Spread
    }
}

/// Tracks the last reported mode and only signals real changes.
#[derive(Debug, Clone)]
pub struct LayoutDetector {
    thresholds: LayoutThresholds,
    reduced_motion: bool,
    mode: LayoutMode,
}

impl LayoutDetector {
    pub fn new(thresholds: LayoutThresholds) -> Self {
        Self {
            thresholds,
            reduced_motion: false,
            mode: LayoutMode::Spread,
        }
    }

    /// Stacking is a motion effect; reduced motion pins the deck to `Spread`.
    pub fn reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Feed a scroll/resize observation. Returns the new mode if it changed.
    pub fn observe(&mut self, viewport: Viewport) -> Option<LayoutMode> {
        let top = viewport.container_top?;
        let next = if self.reduced_motion {
            LayoutMode::Spread
        } else {
            detect(&self.thresholds, viewport.width, top)
        };
        if next == self.mode {
            return None;
        }
        tracing::debug!(from = ?self.mode, to = ?next, top, width = viewport.width, "layout mode changed");
        self.mode = next;
        Some(next)
    }
}
