use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use sire_core::geometry::stagger_delay;
use sire_core::{
    center_index, ActivationKey, CardSet, DeckFocus, DeckGeometry, FlipOutcome, FlipState,
    Interaction, LandingConfig, LayoutDetector, LayoutMode, Viewport,
};
use sire_widgets::text::{set_centered, truncate};
use sire_widgets::{DeckWidget, Theme};

use crate::app::Focus;
use crate::effects::{self, FxManager};
use crate::sections::{PageView, RenderContext, Section};

const FLIP_FX: &str = "showcase.flip";
const FLASH_FX: &str = "showcase.flash";
const SETTLE_FX: &str = "showcase.settle";
const HEADER_HEIGHT: u16 = 4;

/// The interactive card deck
pub struct ShowcaseSection {
    reduced_motion: bool,
    mounted: bool,
    geometry: DeckGeometry,
    detector: LayoutDetector,
    pub flips: FlipState,
    pub focus: DeckFocus,
    deck_height: u16,
    /// Deck area in page coordinates; `None` until first laid out
    deck_rect: Option<Rect>,
    status: Option<String>,
}

impl ShowcaseSection {
    pub fn new(cards: &CardSet, config: &LandingConfig) -> Self {
        let flips = FlipState::new();
        // Reserve the stacked height in both modes so the page never reflows
        // when the arrangement changes.
        let deck_height =
            DeckWidget::new(cards, &flips, LayoutMode::Stacked, &config.geometry).height();
        Self {
            reduced_motion: config.reduced_motion,
            mounted: false,
            geometry: config.geometry,
            detector: LayoutDetector::new(config.layout).reduced_motion(config.reduced_motion),
            flips,
            focus: DeckFocus::new(cards.len()),
            deck_height,
            deck_rect: None,
            status: None,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.detector.mode()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn deck<'a>(&self, cards: &'a CardSet, flips: &'a FlipState) -> DeckWidget<'a> {
        DeckWidget::new(cards, flips, self.mode(), &self.geometry)
            .active(Some(self.focus.active()))
    }

    /// Re-run layout detection against the current viewport.
    pub fn observe(
        &mut self,
        cards: &CardSet,
        view: &PageView,
        fx: &mut FxManager,
    ) -> Option<LayoutMode> {
        if !self.mounted {
            return None;
        }
        let viewport = Viewport {
            width: view.screen.width,
            container_top: self.deck_rect.map(|rect| view.top_of(rect)),
        };
        let mode = self.detector.observe(viewport)?;
        tracing::info!(?mode, "{}", mode.announcement());

        if self.reduced_motion {
            return Some(mode);
        }
        if let Some(deck_rect) = self.deck_rect {
            let deck = self.deck(cards, &self.flips);
            let settle: Vec<_> = (0..cards.len())
                .filter_map(|i| {
                    let area = deck.card_rect(deck_rect, i).and_then(|r| view.to_screen(r))?;
                    Some((area, stagger_delay(mode, i, cards.len())))
                })
                .collect();
            fx.add_unique_effect(SETTLE_FX, effects::deck_settle(&settle));

            if mode.is_stacked() {
                let center = deck
                    .card_rect(deck_rect, center_index(cards.len()))
                    .and_then(|rect| view.to_screen(rect));
                if let Some(area) = center {
                    fx.add_unique_effect(FLASH_FX, effects::stack_flash(area));
                }
            }
        }
        Some(mode)
    }

    /// Keys while the deck has focus
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        cards: &CardSet,
        view: &PageView,
        fx: &mut FxManager,
    ) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.focus.prev(),
            KeyCode::Right | KeyCode::Char('l') => self.focus.next(),
            KeyCode::Enter => self.activate(
                self.focus.active(),
                Interaction::Key(ActivationKey::Enter),
                cards,
                view,
                fx,
            ),
            KeyCode::Char(' ') => self.activate(
                self.focus.active(),
                Interaction::Key(ActivationKey::Space),
                cards,
                view,
                fx,
            ),
            _ => {}
        }
    }

    /// Pointer click at page coordinates. Returns whether it hit a card.
    pub fn handle_click(
        &mut self,
        column: u16,
        page_row: u16,
        cards: &CardSet,
        view: &PageView,
        fx: &mut FxManager,
    ) -> bool {
        let Some(deck_rect) = self.deck_rect else {
            return false;
        };
        let Some(hit) = self.deck(cards, &self.flips).hit_test(deck_rect, column, page_row) else {
            return false;
        };
        self.focus.focus(hit.index);
        self.activate(
            hit.index,
            Interaction::Click {
                on_nested_control: hit.on_nested_control,
            },
            cards,
            view,
            fx,
        );
        true
    }

    fn activate(
        &mut self,
        index: usize,
        interaction: Interaction,
        cards: &CardSet,
        view: &PageView,
        fx: &mut FxManager,
    ) {
        let Some(card) = cards.get(index) else {
            return;
        };
        match self.flips.activate(&card.id, interaction) {
            FlipOutcome::Ignored => {
                tracing::info!(card = %card.id, "explore feature");
                self.status = Some(format!("Opening {}\u{2026}", card.title));
            }
            outcome => {
                self.status = None;
                if self.reduced_motion || outcome != FlipOutcome::Flipped {
                    return;
                }
                let area = self.deck_rect.and_then(|deck_rect| {
                    self.deck(cards, &self.flips)
                        .card_rect(deck_rect, index)
                        .and_then(|rect| view.to_screen(rect))
                });
                if let Some(area) = area {
                    fx.add_unique_effect(FLIP_FX, effects::flip_reveal(area));
                }
            }
        }
    }
}

impl Section for ShowcaseSection {
    fn height(&self) -> u16 {
        HEADER_HEIGHT + self.deck_height + 1
    }

    fn mount(&mut self, _fx: &mut FxManager) {
        self.mounted = true;
        tracing::debug!("showcase mounted");
    }

    fn unmount(&mut self, fx: &mut FxManager) {
        fx.cancel_unique_effect(FLIP_FX);
        fx.cancel_unique_effect(FLASH_FX);
        fx.cancel_unique_effect(SETTLE_FX);
        self.flips.clear();
        self.deck_rect = None;
        self.mounted = false;
        tracing::debug!("showcase unmounted");
    }

    fn tick(&mut self, _dt: Duration) {}

    fn render(&mut self, area: Rect, buf: &mut Buffer, cx: &RenderContext) {
        let [title, subtitle, mode_line, _, deck_area, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(self.deck_height),
            Constraint::Length(1),
        ])
        .areas(area);

        set_centered(
            buf,
            title,
            title.y,
            "Everything your campaign needs",
            Style::default()
                .fg(Theme::BRIGHT_TEXT)
                .add_modifier(Modifier::BOLD),
        );
        set_centered(
            buf,
            subtitle,
            subtitle.y,
            "Click or press Enter on a card to see why it matters.",
            Style::default().fg(Theme::MUTED_TEXT),
        );
        set_centered(
            buf,
            mode_line,
            mode_line.y,
            self.mode().announcement(),
            Style::default().fg(Theme::DIM_TEXT),
        );

        let focused = cx.focus == Focus::Deck;
        let active = focused.then(|| self.focus.active());
        DeckWidget::new(cx.cards, &self.flips, self.mode(), &self.geometry)
            .active(active)
            .render(deck_area, buf);
        self.deck_rect = Some(deck_area);

        let line = match &self.status {
            Some(status) => status.clone(),
            None if focused => "\u{2190}\u{2192} move  \u{23ce}/space flip".to_string(),
            None => String::new(),
        };
        set_centered(
            buf,
            status,
            status.y,
            &truncate(&line, status.width as usize),
            Style::default().fg(Theme::SKY),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use sire_widgets::card::TradingCardWidget;
    use sire_widgets::CARD_WIDTH;

    struct Fixture {
        cards: CardSet,
        fx: FxManager,
        showcase: ShowcaseSection,
    }

    fn fixture() -> Fixture {
        let cards = CardSet::builtin().unwrap();
        let mut fx = FxManager::default();
        let mut showcase = ShowcaseSection::new(&cards, &LandingConfig::default());
        showcase.mount(&mut fx);
        Fixture { cards, fx, showcase }
    }

    fn render(f: &mut Fixture, width: u16) -> Rect {
        let area = Rect::new(0, 0, width, f.showcase.height());
        let mut buf = Buffer::empty(area);
        let cx = RenderContext {
            cards: &f.cards,
            focus: Focus::Deck,
        };
        f.showcase.render(area, &mut buf, &cx);
        area
    }

    fn view(width: u16, scroll: u16) -> PageView {
        PageView {
            scroll,
            screen: Rect::new(0, 0, width, 40),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_deck_height_is_mode_independent() {
        let f = fixture();
        assert_eq!(f.showcase.height(), HEADER_HEIGHT + f.showcase.deck_height + 1);
        assert!(f.showcase.deck_height >= sire_widgets::CARD_HEIGHT);
    }

    #[test]
    fn test_nothing_detected_before_layout() {
        let mut f = fixture();
        let v = view(160, 0);
        assert_eq!(f.showcase.observe(&f.cards, &v, &mut f.fx), None);
    }

    #[test]
    fn test_mode_change_keeps_flip() {
        let mut f = fixture();
        render(&mut f, 160);
        let v = view(160, 0);
        f.showcase
            .handle_key(key(KeyCode::Enter), &f.cards, &v, &mut f.fx);
        assert_eq!(f.showcase.flips.flipped(), Some("timelines"));

        // Deck drawn lower in the viewport, inside the stacking band
        f.showcase.deck_rect = Some(Rect::new(0, 20, 160, 18));
        let stacked = f.showcase.observe(&f.cards, &v, &mut f.fx);
        assert_eq!(stacked, Some(LayoutMode::Stacked));
        assert_eq!(f.showcase.flips.flipped(), Some("timelines"));
    }

    #[test]
    fn test_flip_keeps_layout_mode() {
        let mut f = fixture();
        render(&mut f, 160);
        f.showcase.deck_rect = Some(Rect::new(0, 20, 160, 18));
        let v = view(160, 0);
        f.showcase.observe(&f.cards, &v, &mut f.fx);
        assert_eq!(f.showcase.mode(), LayoutMode::Stacked);

        f.showcase
            .handle_key(key(KeyCode::Enter), &f.cards, &v, &mut f.fx);
        assert_eq!(f.showcase.flips.flipped(), Some("timelines"));
        assert_eq!(f.showcase.mode(), LayoutMode::Stacked);

        // Click the center card body, which sits on top of the stack
        let deck_rect = Rect::new(0, 20, 160, 18);
        let center = f
            .showcase
            .deck(&f.cards, &f.showcase.flips)
            .card_rect(deck_rect, 3)
            .unwrap();
        assert!(f.showcase.handle_click(
            center.x + CARD_WIDTH / 2,
            center.y + 3,
            &f.cards,
            &v,
            &mut f.fx
        ));
        assert_eq!(f.showcase.flips.flipped(), None);
        assert_eq!(f.showcase.mode(), LayoutMode::Stacked);
        assert_eq!(f.showcase.observe(&f.cards, &v, &mut f.fx), None);
    }

    #[test]
    fn test_mobile_width_forces_spread() {
        let mut f = fixture();
        render(&mut f, 160);
        f.showcase.deck_rect = Some(Rect::new(0, 20, 160, 18));
        let wide = view(160, 0);
        assert_eq!(
            f.showcase.observe(&f.cards, &wide, &mut f.fx),
            Some(LayoutMode::Stacked)
        );
        let narrow = view(60, 0);
        assert_eq!(
            f.showcase.observe(&f.cards, &narrow, &mut f.fx),
            Some(LayoutMode::Spread)
        );
    }

    #[test]
    fn test_focus_moves_and_flip_replaces_previous() {
        let mut f = fixture();
        render(&mut f, 200);
        let v = view(200, 0);
        f.showcase
            .handle_key(key(KeyCode::Char(' ')), &f.cards, &v, &mut f.fx);
        f.showcase
            .handle_key(key(KeyCode::Left), &f.cards, &v, &mut f.fx);
        f.showcase
            .handle_key(key(KeyCode::Enter), &f.cards, &v, &mut f.fx);
        assert_eq!(f.showcase.focus.active(), 2);
        assert_eq!(f.showcase.flips.flipped(), Some("approvals"));
    }

    #[test]
    fn test_click_on_cta_does_not_flip() {
        let mut f = fixture();
        render(&mut f, 200);
        let v = view(200, 0);
        let deck_area = f.showcase.deck_rect.unwrap();
        let card = f
            .showcase
            .deck(&f.cards, &f.showcase.flips)
            .card_rect(deck_area, 0)
            .unwrap();

        // First click flips the card
        assert!(f
            .showcase
            .handle_click(card.x + 3, card.y + 3, &f.cards, &v, &mut f.fx));
        assert_eq!(f.showcase.flips.flipped(), Some("discovery"));

        // Click on its explore button leaves it flipped
        let cta = TradingCardWidget::cta_rect(card);
        assert!(f
            .showcase
            .handle_click(cta.x + cta.width / 2, cta.y, &f.cards, &v, &mut f.fx));
        assert_eq!(f.showcase.flips.flipped(), Some("discovery"));
        assert_eq!(f.showcase.status(), Some("Opening Creator Discovery\u{2026}"));
    }

    #[test]
    fn test_unmount_clears_flip() {
        let mut f = fixture();
        render(&mut f, 160);
        let v = view(160, 0);
        f.showcase
            .handle_key(key(KeyCode::Enter), &f.cards, &v, &mut f.fx);
        f.showcase.unmount(&mut f.fx);
        assert_eq!(f.showcase.flips.flipped(), None);
        assert_eq!(f.showcase.observe(&f.cards, &v, &mut f.fx), None);
    }
}
