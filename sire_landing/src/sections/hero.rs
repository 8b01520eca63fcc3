use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use sire_core::counter::default_hero_stats;
use sire_core::rotator::{SEARCH_PLACEHOLDERS, TAGLINE_PHRASES};
use sire_core::tilt::TiltTracker;
use sire_core::{AnimatedCounts, LandingConfig, PlaceholderRotator, Playback, SearchBox, Typewriter};
use sire_widgets::hero::{SearchWidget, StatsWidget, VideoWidget};
use sire_widgets::text::set_centered;
use sire_widgets::Theme;

use crate::app::{Focus, PageAction};
use crate::effects::{self, FxManager};
use crate::sections::{PageView, RenderContext, Section};

const TAGLINE_FX: &str = "hero.tagline";
const HEIGHT: u16 = 22;
const MAX_TILT_DEG: f32 = 12.0;

/// Hero: headline, typed tagline, animated stats, search and walkthrough video
pub struct HeroSection {
    reduced_motion: bool,
    mounted: bool,
    pub counts: AnimatedCounts,
    pub placeholder: PlaceholderRotator,
    pub search: SearchBox,
    pub tagline: Typewriter,
    pub playback: Playback,
    tilt: TiltTracker,
    // Page rects from the last render, for hit testing
    search_rect: Rect,
    video_rect: Rect,
    tagline_rect: Rect,
}

impl HeroSection {
    pub fn new(config: &LandingConfig) -> Self {
        let timing = config.timing;
        let counts = if config.reduced_motion {
            AnimatedCounts::settled(default_hero_stats())
        } else {
            AnimatedCounts::new(default_hero_stats(), timing.counter())
        };
        Self {
            reduced_motion: config.reduced_motion,
            mounted: false,
            counts,
            placeholder: PlaceholderRotator::new(SEARCH_PLACEHOLDERS, timing.placeholder()),
            search: SearchBox::new(timing.search_busy()),
            tagline: Typewriter::new(TAGLINE_PHRASES, timing.tagline_hold())
                .reduced_motion(config.reduced_motion),
            playback: Playback::new(timing.walkthrough()),
            tilt: TiltTracker::new(MAX_TILT_DEG),
            search_rect: Rect::default(),
            video_rect: Rect::default(),
            tagline_rect: Rect::default(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn toggle_video(&mut self) {
        self.playback.toggle();
    }

    /// Keys while the search box has focus
    pub fn handle_search_key(&mut self, key: KeyEvent) -> Option<PageAction> {
        match key.code {
            KeyCode::Enter => self.search.submit(),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Esc | KeyCode::Tab => return Some(PageAction::CycleFocus),
            KeyCode::BackTab => return Some(PageAction::CycleFocusBack),
            KeyCode::Char(c) => self.search.push(c),
            _ => {}
        }
        None
    }

    /// Pointer click at page coordinates
    pub fn handle_click(&mut self, column: u16, page_row: u16) -> Option<PageAction> {
        let point = Position::new(column, page_row);
        if self.search_rect.contains(point) {
            return Some(PageAction::Focus(Focus::Search));
        }
        if self.video_rect.contains(point) {
            self.toggle_video();
        }
        None
    }

    /// Pointer movement at page coordinates drives the video tilt
    pub fn handle_pointer(&mut self, column: u16, page_row: u16) {
        let rect = self.video_rect;
        if rect.contains(Position::new(column, page_row)) {
            self.tilt.point(
                (rect.x as f32, rect.y as f32),
                (rect.width as f32, rect.height as f32),
                (column as f32 + 0.5, page_row as f32 + 0.5),
            );
        } else {
            self.tilt.leave();
        }
    }

    /// Tagline effect needs the on-screen rect, known after the first render
    pub fn start_effects(&mut self, fx: &mut FxManager, view: &PageView) {
        if self.reduced_motion || !self.mounted {
            return;
        }
        if let Some(area) = view.to_screen(self.tagline_rect) {
            fx.add_unique_effect(TAGLINE_FX, effects::tagline_shimmer(area));
        }
    }
}

impl Section for HeroSection {
    fn height(&self) -> u16 {
        HEIGHT
    }

    fn mount(&mut self, _fx: &mut FxManager) {
        self.mounted = true;
        tracing::debug!("hero mounted");
    }

    fn unmount(&mut self, fx: &mut FxManager) {
        self.counts.cancel();
        self.placeholder.cancel();
        self.search.cancel();
        self.tagline.cancel();
        self.playback.pause();
        fx.cancel_unique_effect(TAGLINE_FX);
        self.mounted = false;
        tracing::debug!("hero unmounted");
    }

    fn tick(&mut self, dt: Duration) {
        if !self.mounted {
            return;
        }
        self.counts.tick(dt);
        self.placeholder.tick(dt);
        self.search.tick(dt);
        self.tagline.tick(dt);
        self.playback.tick(dt);
        self.tilt.smooth(dt);
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, cx: &RenderContext) {
        let [title, subtitle, tagline, _, stats, _, search, _, video, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(9),
            Constraint::Min(0),
        ])
        .areas(area);

        set_centered(
            buf,
            title,
            title.y,
            "SIRE MEDIA",
            Style::default().fg(Theme::SKY).add_modifier(Modifier::BOLD),
        );
        set_centered(
            buf,
            subtitle,
            subtitle.y,
            "Creator campaigns, managed end to end.",
            Style::default().fg(Theme::BRIGHT_TEXT),
        );
        set_centered(
            buf,
            tagline,
            tagline.y,
            &self.tagline.text(),
            Style::default().fg(Theme::EMERALD),
        );
        self.tagline_rect = tagline;

        StatsWidget::new(&self.counts).render(stats, buf);

        let narrow = centered_column(search, 64);
        SearchWidget::new(&self.search, self.placeholder.current())
            .focused(cx.focus == Focus::Search)
            .render(narrow, buf);
        self.search_rect = Rect::new(narrow.x, narrow.y, narrow.width, 3);

        let video = centered_column(video, 48);
        VideoWidget::new(&self.playback, self.tilt.current()).render(video, buf);
        self.video_rect = video;
    }
}

fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}
