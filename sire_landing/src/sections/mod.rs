pub mod hero;
pub mod showcase;
pub mod why_us;

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use sire_core::CardSet;

use crate::app::Focus;
use crate::effects::FxManager;

/// What a section needs to draw itself
pub struct RenderContext<'a> {
    pub cards: &'a CardSet,
    pub focus: Focus,
}

/// Maps page coordinates to the terminal and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageView {
    pub scroll: u16,
    pub screen: Rect,
}

impl PageView {
    /// Visible part of a page rect in screen coordinates
    pub fn to_screen(&self, rect: Rect) -> Option<Rect> {
        let top = rect.y.max(self.scroll);
        let bottom = rect.bottom().min(self.scroll.saturating_add(self.screen.height));
        if top >= bottom {
            return None;
        }
        Some(Rect::new(
            self.screen.x + rect.x,
            self.screen.y + (top - self.scroll),
            rect.width.min(self.screen.width.saturating_sub(rect.x)),
            bottom - top,
        ))
    }

    /// Screen row to page row
    pub fn to_page_row(&self, row: u16) -> u16 {
        row.saturating_sub(self.screen.y).saturating_add(self.scroll)
    }

    /// Signed top of a page rect relative to the viewport
    pub fn top_of(&self, rect: Rect) -> i32 {
        rect.y as i32 - self.scroll as i32
    }
}

/// A mounted block of the landing page.
///
/// `mount` starts the section's timers and effects, `unmount` cancels every
/// one of them. After `unmount`, `tick` must leave the section untouched.
pub trait Section {
    fn height(&self) -> u16;
    fn mount(&mut self, fx: &mut FxManager);
    fn unmount(&mut self, fx: &mut FxManager);
    fn tick(&mut self, dt: Duration);
    fn render(&mut self, area: Rect, buf: &mut Buffer, cx: &RenderContext);
}
