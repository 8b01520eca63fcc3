use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget, Wrap};

use sire_core::{Card, CardFace};

use crate::text::{set_centered, truncate};
use crate::theme::Theme;

/// Width and height of a trading card in terminal cells
pub const CARD_WIDTH: u16 = 26;
pub const CARD_HEIGHT: u16 = 14;

const IMAGE_ROWS: u16 = 3;
const CTA_LABEL: &str = "[ Explore Feature \u{2192} ]";

/// A feature card: summary on the front, merits and why-us on the back
pub struct TradingCardWidget<'a> {
    pub card: &'a Card,
    pub face: CardFace,
    pub active: bool,
    pub dimmed: bool,
}

impl<'a> TradingCardWidget<'a> {
    pub fn new(card: &'a Card) -> Self {
        Self {
            card,
            face: CardFace::Front,
            active: false,
            dimmed: false,
        }
    }

    pub fn face(mut self, face: CardFace) -> Self {
        self.face = face;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    fn border_color(&self) -> Color {
        if self.active {
            Theme::CARD_ACTIVE
        } else if self.dimmed {
            Theme::DIM_TEXT
        } else {
            Theme::CARD_BORDER
        }
    }

    fn text_color(&self, normal: Color) -> Color {
        if self.dimmed {
            Theme::MUTED_TEXT
        } else {
            normal
        }
    }

    fn block(&self) -> Block<'static> {
        let bg = match self.face {
            CardFace::Front => Theme::CARD_BG,
            CardFace::Back => Theme::CARD_BACK_BG,
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(if self.active {
                BorderType::Double
            } else {
                BorderType::Rounded
            })
            .border_style(Style::default().fg(self.border_color()))
            .style(Style::default().bg(bg))
            .padding(Padding::horizontal(1))
    }

    /// Content area inside border and padding
    pub fn inner(area: Rect) -> Rect {
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1))
            .inner(area)
    }

    /// Where the call-to-action sits on the back face; clicks here must not flip the card
    pub fn cta_rect(area: Rect) -> Rect {
        let inner = Self::inner(area);
        if inner.height == 0 {
            return Rect::default();
        }
        let width = (CTA_LABEL.chars().count() as u16).min(inner.width);
        Rect::new(
            inner.x + inner.width.saturating_sub(width) / 2,
            inner.bottom() - 1,
            width,
            1,
        )
    }

    fn render_front(&self, inner: Rect, buf: &mut Buffer) {
        let badge = format!(" {} ", self.card.flavor.to_uppercase());
        buf.set_string(
            inner.x,
            inner.y,
            truncate(&badge, inner.width as usize),
            Style::default()
                .fg(self.text_color(Theme::SKY))
                .bg(Theme::BADGE_BG)
                .add_modifier(Modifier::BOLD),
        );

        // Image placeholder
        let image_top = inner.y + 1;
        let fill = Style::default().fg(Theme::IMAGE_FILL);
        for row in 0..IMAGE_ROWS.min(inner.height.saturating_sub(1)) {
            for col in 0..inner.width {
                let glyph = if (col + row) % 2 == 0 { "\u{2592}" } else { "\u{2591}" };
                buf.set_string(inner.x + col, image_top + row, glyph, fill);
            }
        }
        set_centered(
            buf,
            inner,
            image_top + IMAGE_ROWS / 2,
            &format!(" {} ", self.card.image_host()),
            Style::default().fg(Theme::MUTED_TEXT).bg(Theme::CARD_BG),
        );

        let title_y = image_top + IMAGE_ROWS + 1;
        if title_y >= inner.bottom() {
            return;
        }
        set_centered(
            buf,
            inner,
            title_y,
            &self.card.title,
            Style::default()
                .fg(self.text_color(Theme::BRIGHT_TEXT))
                .add_modifier(Modifier::BOLD),
        );

        let rule_y = title_y + 1;
        if rule_y >= inner.bottom() {
            return;
        }
        buf.set_string(
            inner.x,
            rule_y,
            "\u{2500}".repeat(inner.width as usize),
            Style::default().fg(Theme::DIM_TEXT),
        );

        let definition = Rect::new(inner.x, rule_y + 1, inner.width, inner.bottom() - rule_y - 1);
        Paragraph::new(self.card.definition.as_str())
            .style(Style::default().fg(self.text_color(Theme::BODY_TEXT)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(definition, buf);
    }

    fn render_back(&self, inner: Rect, buf: &mut Buffer) {
        let width = inner.width as usize;
        let mut lines: Vec<Line> = Vec::new();

        lines.push(Line::styled(
            "MERITS",
            Style::default()
                .fg(self.text_color(Theme::SKY))
                .add_modifier(Modifier::BOLD),
        ));
        for merit in &self.card.merits {
            lines.push(Line::styled(
                truncate(&format!("\u{25b8} {merit}"), width),
                Style::default().fg(self.text_color(Theme::BODY_TEXT)),
            ));
        }

        lines.push(Line::default());
        lines.push(Line::styled(
            "WHY US",
            Style::default()
                .fg(self.text_color(Theme::EMERALD))
                .add_modifier(Modifier::BOLD),
        ));
        for reason in &self.card.why_us {
            lines.push(Line::styled(
                truncate(&format!("\u{2713} {reason}"), width),
                Style::default().fg(self.text_color(Theme::BODY_TEXT)),
            ));
        }

        // Last row belongs to the call-to-action
        let list_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(2));
        Paragraph::new(lines).render(list_area, buf);

        if inner.height > 0 {
            set_centered(
                buf,
                inner,
                inner.bottom() - 1,
                CTA_LABEL,
                Style::default()
                    .fg(self.text_color(Theme::SKY))
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

impl Widget for TradingCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < CARD_WIDTH || area.height < CARD_HEIGHT {
            return;
        }
        let area = Rect::new(area.x, area.y, CARD_WIDTH, CARD_HEIGHT);

        Clear.render(area, buf);
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        match self.face {
            CardFace::Front => self.render_front(inner, buf),
            CardFace::Back => self.render_back(inner, buf),
        }
    }
}
