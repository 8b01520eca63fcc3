use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget};

use sire_core::{AnimatedCounts, Playback, SearchBox, Tilt};

use crate::text::{set_centered, truncate};
use crate::theme::Theme;

/// Group digits with commas, as the page formats headline numbers
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Row of animated headline stats
pub struct StatsWidget<'a> {
    pub counts: &'a AnimatedCounts,
}

impl<'a> StatsWidget<'a> {
    pub fn new(counts: &'a AnimatedCounts) -> Self {
        Self { counts }
    }
}

impl Widget for StatsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let stats: Vec<_> = self.counts.iter().collect();
        if stats.is_empty() || area.height < 2 {
            return;
        }
        let columns = Layout::horizontal(vec![Constraint::Ratio(1, stats.len() as u32); stats.len()])
            .split(area);

        for ((stat, value), column) in stats.into_iter().zip(columns.iter()) {
            set_centered(
                buf,
                *column,
                column.y,
                &format!("{}+", format_count(value)),
                Style::default()
                    .fg(Theme::BRIGHT_TEXT)
                    .add_modifier(Modifier::BOLD),
            );
            set_centered(
                buf,
                *column,
                column.y + 1,
                &stat.label,
                Style::default().fg(Theme::MUTED_TEXT),
            );
        }
    }
}

/// Search input with a rotating placeholder
pub struct SearchWidget<'a> {
    pub search: &'a SearchBox,
    pub placeholder: &'a str,
    pub focused: bool,
}

impl<'a> SearchWidget<'a> {
    pub fn new(search: &'a SearchBox, placeholder: &'a str) -> Self {
        Self {
            search,
            placeholder,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SearchWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 4 {
            return;
        }
        let input_area = Rect::new(area.x, area.y, area.width, 3);
        let border = if self.focused {
            Theme::CARD_ACTIVE
        } else {
            Theme::CARD_BORDER
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .padding(Padding::horizontal(1));
        let inner = block.inner(input_area);
        block.render(input_area, buf);

        let width = inner.width as usize;
        let line = if self.search.query.is_empty() {
            Line::from(vec![
                Span::styled("\u{2315} ", Style::default().fg(Theme::SKY)),
                Span::styled(
                    truncate(self.placeholder, width.saturating_sub(2)),
                    Style::default().fg(Theme::DIM_TEXT),
                ),
            ])
        } else {
            let cursor = if self.focused { "\u{2581}" } else { "" };
            Line::from(vec![
                Span::styled("\u{2315} ", Style::default().fg(Theme::SKY)),
                Span::styled(
                    truncate(&self.search.query, width.saturating_sub(3)),
                    Style::default().fg(Theme::BRIGHT_TEXT),
                ),
                Span::styled(cursor, Style::default().fg(Theme::SKY)),
            ])
        };
        Paragraph::new(line).render(inner, buf);

        let status_style = if self.search.is_busy() {
            Style::default().fg(Theme::SKY).add_modifier(Modifier::ITALIC)
        } else {
            Style::default().fg(Theme::MUTED_TEXT)
        };
        buf.set_string(
            area.x + 1,
            area.y + 3,
            truncate(self.search.message(), area.width.saturating_sub(1) as usize),
            status_style,
        );
    }
}

/// Walkthrough video box with progress bar and pointer tilt
pub struct VideoWidget<'a> {
    pub playback: &'a Playback,
    pub tilt: Tilt,
}

impl<'a> VideoWidget<'a> {
    pub fn new(playback: &'a Playback, tilt: Tilt) -> Self {
        Self { playback, tilt }
    }

    /// Row and column of the gloss highlight; it drifts with the tilt
    fn gloss(&self, inner: Rect) -> (u16, u16) {
        let span_x = inner.width.saturating_sub(1) as f32;
        let span_y = inner.height.saturating_sub(1) as f32;
        let fx = (0.5 + self.tilt.rotate_y / 24.0).clamp(0.0, 1.0);
        let fy = (0.5 - self.tilt.rotate_x / 24.0).clamp(0.0, 1.0);
        (
            inner.x + (fx * span_x).round() as u16,
            inner.y + (fy * span_y).round() as u16,
        )
    }
}

impl Widget for VideoWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 6 || area.width < 12 {
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::NEON_PURPLE))
            .title(Line::styled(
                " Campaign walkthrough ",
                Style::default().fg(Theme::BRIGHT_TEXT).add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Theme::PANEL_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        let [screen, controls] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(inner);

        let (gx, gy) = self.gloss(screen);
        buf.set_string(gx, gy, "\u{2726}", Style::default().fg(Theme::SKY));

        let icon = if self.playback.is_playing() {
            "\u{23f8} Pause"
        } else {
            "\u{25b6} Play"
        };
        set_centered(
            buf,
            screen,
            screen.y + screen.height / 2,
            icon,
            Style::default().fg(Theme::BRIGHT_TEXT).add_modifier(Modifier::BOLD),
        );

        // Progress bar
        let bar_width = controls.width.saturating_sub(7);
        let filled = ((self.playback.progress() / 100.0) * bar_width as f64).round() as u16;
        let bar: String = (0..bar_width)
            .map(|i| if i < filled { '\u{2588}' } else { '\u{2591}' })
            .collect();
        buf.set_string(controls.x, controls.y, &bar, Style::default().fg(Theme::SKY));
        buf.set_string(
            controls.x + bar_width + 1,
            controls.y,
            format!("{:>3.0}%", self.playback.progress()),
            Style::default().fg(Theme::MUTED_TEXT),
        );
        if controls.height > 1 {
            buf.set_string(
                controls.x,
                controls.y + 1,
                truncate("[v] play/pause", controls.width as usize),
                Style::default().fg(Theme::DIM_TEXT),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use sire_core::counter::default_hero_stats;

    fn screen(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1240), "1,240");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_stats_render_current_values() {
        let counts = AnimatedCounts::settled(default_hero_stats());
        let area = Rect::new(0, 0, 90, 2);
        let mut buf = Buffer::empty(area);
        StatsWidget::new(&counts).render(area, &mut buf);
        let text = screen(&buf);
        assert!(text.contains("1,240+"));
        assert!(text.contains("Campaigns Managed"));
    }

    #[test]
    fn test_search_shows_placeholder_until_typed() {
        let mut search = SearchBox::new(Duration::from_millis(1300));
        let area = Rect::new(0, 0, 50, 4);
        let mut buf = Buffer::empty(area);
        SearchWidget::new(&search, "Search creators").render(area, &mut buf);
        assert!(screen(&buf).contains("Search creators"));

        search.push('a');
        search.push('b');
        let mut buf = Buffer::empty(area);
        SearchWidget::new(&search, "Search creators").render(area, &mut buf);
        let text = screen(&buf);
        assert!(text.contains("ab"));
        assert!(!text.contains("Search creators"));
    }

    #[test]
    fn test_video_progress_label() {
        let mut playback = Playback::new(Duration::from_secs(10));
        playback.toggle();
        playback.tick(Duration::from_secs(5));
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        VideoWidget::new(&playback, Tilt::FLAT).render(area, &mut buf);
        let text = screen(&buf);
        assert!(text.contains(" 50%"));
        assert!(text.contains("Pause"));
    }

    #[test]
    fn test_gloss_moves_with_tilt() {
        let playback = Playback::new(Duration::from_secs(1));
        let inner = Rect::new(0, 0, 21, 5);
        let flat = VideoWidget::new(&playback, Tilt::FLAT).gloss(inner);
        let right = VideoWidget::new(
            &playback,
            Tilt {
                rotate_x: 0.0,
                rotate_y: 6.0,
            },
        )
        .gloss(inner);
        assert_eq!(flat, (10, 2));
        assert!(right.0 > flat.0);
    }
}
