use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use sire_core::{CardSet, FocusRail};
use sire_widgets::rail::{RailWidget, ENTRY_HEIGHT};
use sire_widgets::text::set_centered;
use sire_widgets::Theme;

use crate::app::Focus;
use crate::effects::FxManager;
use crate::sections::{RenderContext, Section};

const VISIBLE_ENTRIES: u16 = 3;

/// "Why Sire" rail: one card in focus at a time, with its details expanded
pub struct WhyUsSection {
    pub rail: FocusRail,
    rail_rect: Rect,
}

impl WhyUsSection {
    pub fn new(cards: &CardSet) -> Self {
        Self {
            rail: FocusRail::new(cards.len()),
            rail_rect: Rect::default(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, cards: &CardSet) {
        let before = self.rail.active();
        let after = match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.rail.next(),
            KeyCode::Up | KeyCode::Char('k') => self.rail.prev(),
            _ => return,
        };
        if after != before {
            self.announce(cards);
        }
    }

    /// Pointer click at page coordinates
    pub fn handle_click(&mut self, column: u16, page_row: u16, cards: &CardSet) -> bool {
        let rect = self.rail_rect;
        if column < rect.x || column >= rect.right() {
            return false;
        }
        let Some(index) = RailWidget::new(cards, &self.rail).entry_at(rect, page_row) else {
            return false;
        };
        if index != self.rail.active() {
            self.rail.focus(index);
            self.announce(cards);
        }
        true
    }

    fn announce(&self, cards: &CardSet) {
        if let Some(message) = self.rail.live_message(cards) {
            tracing::info!(active = self.rail.active(), "{message}");
        }
    }
}

impl Section for WhyUsSection {
    fn height(&self) -> u16 {
        3 + ENTRY_HEIGHT * VISIBLE_ENTRIES + 1
    }

    fn mount(&mut self, _fx: &mut FxManager) {}

    fn unmount(&mut self, _fx: &mut FxManager) {}

    fn tick(&mut self, _dt: Duration) {}

    fn render(&mut self, area: Rect, buf: &mut Buffer, cx: &RenderContext) {
        let [title, subtitle, _, body] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        set_centered(
            buf,
            title,
            title.y,
            "Why brands choose Sire",
            Style::default()
                .fg(Theme::BRIGHT_TEXT)
                .add_modifier(Modifier::BOLD),
        );
        set_centered(
            buf,
            subtitle,
            subtitle.y,
            "Every workflow, handled by people who run campaigns daily.",
            Style::default().fg(Theme::MUTED_TEXT),
        );

        let width = body.width.min(72);
        let rail = Rect::new(body.x + (body.width - width) / 2, body.y, width, body.height);
        RailWidget::new(cx.cards, &self.rail)
            .focused(cx.focus == Focus::Rail)
            .render(rail, buf);
        self.rail_rect = rail;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys_move_focus_within_bounds() {
        let cards = CardSet::builtin().unwrap();
        let mut why = WhyUsSection::new(&cards);
        why.handle_key(key(KeyCode::Up), &cards);
        assert_eq!(why.rail.active(), 0);
        for _ in 0..10 {
            why.handle_key(key(KeyCode::Down), &cards);
        }
        assert_eq!(why.rail.active(), cards.len() - 1);
    }

    #[test]
    fn test_click_focuses_entry() {
        let cards = CardSet::builtin().unwrap();
        let mut why = WhyUsSection::new(&cards);
        let area = Rect::new(0, 0, 80, why.height());
        let mut buf = Buffer::empty(area);
        let cx = RenderContext {
            cards: &cards,
            focus: Focus::Rail,
        };
        why.render(area, &mut buf, &cx);

        let rect = why.rail_rect;
        assert!(why.handle_click(rect.x + 2, rect.y + ENTRY_HEIGHT + 1, &cards));
        assert_eq!(why.rail.active(), 1);
        assert!(!why.handle_click(0, 0, &cards));
    }
}
