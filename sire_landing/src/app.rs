use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};
use ratatui::Frame;

use sire_core::{CardSet, LandingConfig};
use sire_widgets::text::set_centered;
use sire_widgets::Theme;

use crate::effects::{self, FxManager};
use crate::sections::hero::HeroSection;
use crate::sections::showcase::ShowcaseSection;
use crate::sections::why_us::WhyUsSection;
use crate::sections::{PageView, RenderContext, Section};

const SECTION_GAP: u16 = 2;
const FOOTER_HEIGHT: u16 = 2;
const WHEEL_STEP: u16 = 3;

/// Which part of the page receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Search,
    #[default]
    Deck,
    Rail,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Deck,
            Focus::Deck => Focus::Rail,
            Focus::Rail => Focus::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Search => Focus::Rail,
            Focus::Deck => Focus::Search,
            Focus::Rail => Focus::Deck,
        }
    }
}

/// Page-level requests raised by sections or key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Quit,
    Replay,
    Focus(Focus),
    CycleFocus,
    CycleFocusBack,
    Scroll(i32),
}

/// Main application state
pub struct App {
    cards: CardSet,
    config: LandingConfig,
    pub fx: FxManager,
    pub focus: Focus,
    scroll: u16,
    /// View the layout was last observed at
    observed: Option<PageView>,
    intro_pending: bool,
    frame_dt: Duration,

    // Sections, top to bottom
    pub hero: HeroSection,
    pub showcase: ShowcaseSection,
    pub why_us: WhyUsSection,
}

impl App {
    pub fn new(cards: CardSet, config: LandingConfig) -> Self {
        let hero = HeroSection::new(&config);
        let showcase = ShowcaseSection::new(&cards, &config);
        let why_us = WhyUsSection::new(&cards);
        let mut app = Self {
            cards,
            config,
            fx: FxManager::default(),
            focus: Focus::default(),
            scroll: 0,
            observed: None,
            intro_pending: true,
            frame_dt: Duration::ZERO,
            hero,
            showcase,
            why_us,
        };
        app.mount_all();
        app
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn page_height(&self) -> u16 {
        self.hero.height()
            + self.showcase.height()
            + self.why_us.height()
            + SECTION_GAP * 3
            + FOOTER_HEIGHT
    }

    fn mount_all(&mut self) {
        let fx = &mut self.fx;
        let sections: [&mut dyn Section; 3] =
            [&mut self.hero, &mut self.showcase, &mut self.why_us];
        for section in sections {
            section.mount(fx);
        }
        tracing::info!(cards = self.cards.len(), "landing page mounted");
    }

    /// Tear every section down; their timers and effects stop here.
    pub fn unmount_all(&mut self) {
        let fx = &mut self.fx;
        let sections: [&mut dyn Section; 3] =
            [&mut self.hero, &mut self.showcase, &mut self.why_us];
        for section in sections {
            section.unmount(fx);
        }
        tracing::info!("landing page unmounted");
    }

    fn replay(&mut self) {
        self.unmount_all();
        self.hero = HeroSection::new(&self.config);
        self.showcase = ShowcaseSection::new(&self.cards, &self.config);
        self.why_us = WhyUsSection::new(&self.cards);
        self.focus = Focus::default();
        self.scroll = 0;
        self.observed = None;
        self.intro_pending = true;
        self.mount_all();
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let height = self.page_height();
        self.scroll = self.scroll.min(height.saturating_sub(area.height));
        let view = PageView {
            scroll: self.scroll,
            screen: area,
        };

        // Draw the whole page off-screen, then copy the visible rows
        let page_area = Rect::new(0, 0, area.width, height);
        let mut page = Buffer::empty(page_area);
        Block::default()
            .style(Style::default().bg(Theme::BG))
            .render(page_area, &mut page);

        let cx = RenderContext {
            cards: &self.cards,
            focus: self.focus,
        };
        let mut y = 0;
        let sections: [&mut dyn Section; 3] =
            [&mut self.hero, &mut self.showcase, &mut self.why_us];
        for section in sections {
            let h = section.height();
            section.render(Rect::new(0, y, area.width, h), &mut page, &cx);
            y += h + SECTION_GAP;
        }
        set_centered(
            &mut page,
            page_area,
            y,
            "q quit \u{00b7} r replay \u{00b7} Tab focus \u{00b7} v video \u{00b7} PgUp/PgDn scroll",
            Style::default().fg(Theme::DIM_TEXT),
        );

        let buf = frame.buffer_mut();
        let visible = area.height.min(height - self.scroll);
        for row in 0..visible {
            for col in 0..area.width {
                buf[(area.x + col, area.y + row)] = page[(col, self.scroll + row)].clone();
            }
        }

        // Scroll or resize since last frame: re-run layout detection
        if self.observed != Some(view) {
            self.showcase.observe(&self.cards, &view, &mut self.fx);
            self.observed = Some(view);
        }

        if self.intro_pending {
            self.intro_pending = false;
            if !self.config.reduced_motion {
                self.fx.add_unique_effect("page.intro", effects::page_intro());
                self.hero.start_effects(&mut self.fx, &view);
            }
        }

        let dt = u32::try_from(self.frame_dt.as_millis()).unwrap_or(u32::MAX);
        self.fx
            .process_effects(tachyonfx::Duration::from_millis(dt), buf, area);
    }

    /// Handle key event. Returns true if should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // The search box swallows printable keys
        if self.focus == Focus::Search {
            let action = self.hero.handle_search_key(key);
            return self.process_action(action);
        }

        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(PageAction::Quit),
            KeyCode::Char('r') => Some(PageAction::Replay),
            KeyCode::Tab => Some(PageAction::CycleFocus),
            KeyCode::BackTab => Some(PageAction::CycleFocusBack),
            KeyCode::Char('/') => Some(PageAction::Focus(Focus::Search)),
            KeyCode::PageDown => Some(PageAction::Scroll(self.page_step())),
            KeyCode::PageUp => Some(PageAction::Scroll(-self.page_step())),
            KeyCode::Home => Some(PageAction::Scroll(i32::MIN / 2)),
            KeyCode::End => Some(PageAction::Scroll(i32::MAX / 2)),
            KeyCode::Char('v') => {
                self.hero.toggle_video();
                None
            }
            _ => match self.focus {
                Focus::Deck => match key.code {
                    KeyCode::Down | KeyCode::Char('j') => Some(PageAction::Scroll(1)),
                    KeyCode::Up | KeyCode::Char('k') => Some(PageAction::Scroll(-1)),
                    _ => {
                        let view = self.view();
                        self.showcase
                            .handle_key(key, &self.cards, &view, &mut self.fx);
                        None
                    }
                },
                Focus::Rail => {
                    self.why_us.handle_key(key, &self.cards);
                    None
                }
                Focus::Search => None,
            },
        };

        self.process_action(action)
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let view = self.view();
        let page_row = view.to_page_row(mouse.row);
        let action = match mouse.kind {
            MouseEventKind::ScrollDown => Some(PageAction::Scroll(WHEEL_STEP as i32)),
            MouseEventKind::ScrollUp => Some(PageAction::Scroll(-(WHEEL_STEP as i32))),
            MouseEventKind::Moved => {
                self.hero.handle_pointer(mouse.column, page_row);
                None
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self
                    .showcase
                    .handle_click(mouse.column, page_row, &self.cards, &view, &mut self.fx)
                {
                    Some(PageAction::Focus(Focus::Deck))
                } else if self.why_us.handle_click(mouse.column, page_row, &self.cards) {
                    Some(PageAction::Focus(Focus::Rail))
                } else {
                    self.hero.handle_click(mouse.column, page_row)
                }
            }
            _ => None,
        };
        self.process_action(action);
    }

    pub fn handle_resize(&mut self, w: u16, h: u16) {
        tracing::debug!(w, h, "terminal resized");
        // Next render sees a new view and re-observes the layout
        self.observed = None;
    }

    pub fn tick(&mut self, dt: Duration) {
        self.frame_dt = dt;
        let sections: [&mut dyn Section; 3] =
            [&mut self.hero, &mut self.showcase, &mut self.why_us];
        for section in sections {
            section.tick(dt);
        }
    }

    fn view(&self) -> PageView {
        self.observed.unwrap_or(PageView {
            scroll: self.scroll,
            screen: Rect::default(),
        })
    }

    fn page_step(&self) -> i32 {
        self.observed
            .map_or(10, |v| v.screen.height.saturating_sub(2).max(1) as i32)
    }

    /// Process a page action. Returns true if should quit.
    fn process_action(&mut self, action: Option<PageAction>) -> bool {
        match action {
            Some(PageAction::Quit) => return true,
            Some(PageAction::Replay) => {
                tracing::info!("replaying landing page");
                self.replay();
            }
            Some(PageAction::Focus(focus)) => self.focus = focus,
            Some(PageAction::CycleFocus) => {
                self.focus = self.focus.next();
                tracing::debug!(focus = ?self.focus, "focus moved");
            }
            Some(PageAction::CycleFocusBack) => {
                self.focus = self.focus.prev();
                tracing::debug!(focus = ?self.focus, "focus moved back");
            }
            Some(PageAction::Scroll(delta)) => {
                let max = self.page_height() as i32;
                self.scroll = (self.scroll as i32 + delta).clamp(0, max) as u16;
            }
            None => {}
        }
        false
    }
}
