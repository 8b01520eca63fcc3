use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget};

use sire_core::{CardSet, Emphasis, FocusRail};

use crate::text::truncate;
use crate::theme::Theme;

/// Rows used by one rail entry
pub const ENTRY_HEIGHT: u16 = 5;

/// Vertical rail of cards with the active one emphasised
pub struct RailWidget<'a> {
    pub cards: &'a CardSet,
    pub rail: &'a FocusRail,
    pub focused: bool,
}

impl<'a> RailWidget<'a> {
    pub fn new(cards: &'a CardSet, rail: &'a FocusRail) -> Self {
        Self {
            cards,
            rail,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// First entry shown so that the active one stays in the window
    fn first_visible(&self, visible: usize) -> usize {
        if visible == 0 {
            return 0;
        }
        let half = visible / 2;
        let max_first = self.cards.len().saturating_sub(visible);
        self.rail.active().saturating_sub(half).min(max_first)
    }

    /// Card index of the entry drawn at `row`
    pub fn entry_at(&self, area: Rect, row: u16) -> Option<usize> {
        if area.height < ENTRY_HEIGHT + 1 || row < area.y || row >= area.bottom() - 1 {
            return None;
        }
        let visible = ((area.height - 1) / ENTRY_HEIGHT) as usize;
        let slot = ((row - area.y) / ENTRY_HEIGHT) as usize;
        if slot >= visible {
            return None;
        }
        let index = self.first_visible(visible) + slot;
        (index < self.cards.len()).then_some(index)
    }

    fn entry_style(emphasis: Emphasis) -> (Style, Style, BorderType) {
        match emphasis {
            Emphasis::Active => (
                Style::default()
                    .fg(Theme::BRIGHT_TEXT)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Theme::CARD_ACTIVE),
                BorderType::Double,
            ),
            Emphasis::Near => (
                Style::default().fg(Theme::BODY_TEXT),
                Style::default().fg(Theme::CARD_BORDER),
                BorderType::Rounded,
            ),
            Emphasis::Inactive => (
                Style::default().fg(Theme::DIM_TEXT),
                Style::default().fg(Theme::DIM_TEXT),
                BorderType::Rounded,
            ),
        }
    }
}

impl Widget for RailWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < ENTRY_HEIGHT + 1 {
            return;
        }

        let entries_area = Rect::new(area.x, area.y, area.width, area.height - 1);
        let visible = (entries_area.height / ENTRY_HEIGHT) as usize;
        let first = self.first_visible(visible);

        for (slot, index) in (first..self.cards.len()).take(visible).enumerate() {
            let Some(card) = self.cards.get(index) else {
                break;
            };
            let emphasis = self.rail.emphasis(index);
            let (text_style, border_style, border_type) = Self::entry_style(emphasis);
            let rect = Rect::new(
                entries_area.x,
                entries_area.y + slot as u16 * ENTRY_HEIGHT,
                entries_area.width,
                ENTRY_HEIGHT,
            );

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(border_style)
                .padding(Padding::horizontal(1));
            let inner = block.inner(rect);
            block.render(rect, buf);

            let width = inner.width as usize;
            let mut lines = Vec::with_capacity(3);
            if emphasis == Emphasis::Active {
                lines.push(Line::from(vec![
                    Span::styled("\u{2605} ", Style::default().fg(Theme::SKY)),
                    Span::styled(
                        "PREMIUM WORKFLOW",
                        Style::default().fg(Theme::SKY).add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
            lines.push(Line::styled(
                truncate(&format!("{} \u{00b7} {}", card.title, card.flavor), width),
                text_style,
            ));
            // Details only animate in for the active card
            if emphasis == Emphasis::Active {
                lines.push(Line::styled(
                    truncate(&card.definition, width),
                    Style::default().fg(Theme::BODY_TEXT),
                ));
            }
            Paragraph::new(lines).render(inner, buf);
        }

        let message = self.rail.live_message(self.cards).unwrap_or_default();
        let hint = if self.focused {
            "\u{2191}\u{2193} browse"
        } else {
            "Tab to browse"
        };
        let footer = Line::from(vec![
            Span::styled(
                truncate(&message, (area.width as usize).saturating_sub(hint.len() + 2)),
                Style::default().fg(Theme::MUTED_TEXT),
            ),
            Span::raw("  "),
            Span::styled(hint, Style::default().fg(Theme::SKY)),
        ]);
        Paragraph::new(footer).render(Rect::new(area.x, area.bottom() - 1, area.width, 1), buf);
    }
}
