use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::Widget;

use sire_core::geometry::{deck_layout, paint_order, DeckGeometry, DeckTransform};
use sire_core::{CardSet, FlipState, LayoutMode};

use crate::card::{TradingCardWidget, CARD_HEIGHT, CARD_WIDTH};

/// Gap between cards when spread in a row
const ROW_GAP: u16 = 2;
/// Distance between the left edges of neighbouring cards in the row
const STEP: u32 = CARD_WIDTH as u32 + ROW_GAP as u32;
/// Terminal cells are roughly twice as tall as wide
const CELL_ASPECT: f32 = 2.0;

/// Where a click on the deck landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckHit {
    pub index: usize,
    pub on_nested_control: bool,
}

/// Renders the whole deck, spread in a row or fanned into a stack.
#[derive(Clone)]
pub struct DeckWidget<'a> {
    pub cards: &'a CardSet,
    pub flips: &'a FlipState,
    pub mode: LayoutMode,
    pub transforms: Vec<DeckTransform>,
    pub active: Option<usize>,
}

impl<'a> DeckWidget<'a> {
    pub fn new(
        cards: &'a CardSet,
        flips: &'a FlipState,
        mode: LayoutMode,
        geometry: &DeckGeometry,
    ) -> Self {
        Self {
            cards,
            flips,
            mode,
            transforms: deck_layout(geometry, mode, cards.len()),
            active: None,
        }
    }

    pub fn active(mut self, active: Option<usize>) -> Self {
        self.active = active;
        self
    }

    /// Rows the deck needs, including room for the arch
    pub fn height(&self) -> u16 {
        let drop = self
            .transforms
            .iter()
            .map(|t| t.dy.round().max(0.0) as u16)
            .max()
            .unwrap_or(0);
        CARD_HEIGHT.saturating_add(drop).saturating_add(1)
    }

    /// Full width of the spread row; wider than any terminal for large decks
    fn row_width(&self) -> u32 {
        let n = u32::try_from(self.cards.len()).unwrap_or(u32::MAX);
        if n == 0 {
            return 0;
        }
        n.saturating_mul(STEP).saturating_sub(ROW_GAP as u32)
    }

    /// Horizontal scroll of the spread row that keeps the active card on screen
    fn row_scroll(&self, area: Rect) -> u32 {
        let total = self.row_width();
        let width = area.width as u32;
        if total <= width {
            return 0;
        }
        let active = u32::try_from(self.active.unwrap_or(0)).unwrap_or(u32::MAX);
        let active_center = active
            .saturating_mul(STEP)
            .saturating_add(CARD_WIDTH as u32 / 2);
        active_center.saturating_sub(width / 2).min(total - width)
    }

    /// Unclipped placement of card `index`, as signed coordinates
    fn placement(&self, area: Rect, index: usize) -> (i32, i32) {
        match self.mode {
            LayoutMode::Spread => {
                let total = self.row_width();
                let start = area.x as i64 + ((area.width as u32).saturating_sub(total) / 2) as i64
                    - self.row_scroll(area) as i64;
                let x = start + i64::try_from(index).unwrap_or(i64::MAX / 2) * STEP as i64;
                (saturate(x), area.y as i32 + 1)
            }
            LayoutMode::Stacked => {
                let t = self.transforms.get(index).copied().unwrap_or_default();
                let x = area.x as i32 + (area.width as i32 - CARD_WIDTH as i32) / 2;
                (
                    x.saturating_add(t.dx.round() as i32),
                    (area.y as i32).saturating_add(t.dy.round() as i32),
                )
            }
        }
    }

    /// Card rect clipped to `area`, or `None` when fully off-screen.
    /// Rotated cards spill past it by their shear.
    pub fn card_rect(&self, area: Rect, index: usize) -> Option<Rect> {
        if index >= self.cards.len() {
            return None;
        }
        let (x, y) = self.placement(area, index);
        clip(area, x, y)
    }

    /// Topmost painted card under `(column, row)`, following the same row
    /// shear that `render` applies.
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<DeckHit> {
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        let cta = TradingCardWidget::cta_rect(Rect::new(0, 0, CARD_WIDTH, CARD_HEIGHT));
        for index in paint_order(&self.transforms).into_iter().rev() {
            let Some(card) = self.cards.get(index) else {
                continue;
            };
            let (x, y) = self.placement(area, index);
            let local_row = row as i64 - y as i64;
            if local_row < 0 || local_row >= CARD_HEIGHT as i64 {
                continue;
            }
            let row_left = Self::row_left(&self.transforms[index], x, local_row as u16);
            let local_col = column as i64 - row_left;
            if local_col < 0 || local_col >= CARD_WIDTH as i64 {
                continue;
            }
            let local = Position::new(local_col as u16, local_row as u16);
            return Some(DeckHit {
                index,
                on_nested_control: self.flips.is_flipped(&card.id) && cta.contains(local),
            });
        }
        None
    }

    /// Left edge of one card row once sheared
    fn row_left(transform: &DeckTransform, x: i32, row: u16) -> i64 {
        x as i64 + Self::shear(transform, row) as i64
    }

    /// Horizontal shear of a card row that stands in for rotation
    fn shear(transform: &DeckTransform, row: u16) -> i32 {
        let from_center = CARD_HEIGHT as f32 / 2.0 - row as f32;
        let slope = transform.rotate_deg.to_radians().tan() * CELL_ASPECT;
        (from_center * slope).round() as i32
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn clip(area: Rect, x: i32, y: i32) -> Option<Rect> {
    let left = x.max(area.left() as i32);
    let top = y.max(area.top() as i32);
    let right = x.saturating_add(CARD_WIDTH as i32).min(area.right() as i32);
    let bottom = y.saturating_add(CARD_HEIGHT as i32).min(area.bottom() as i32);
    if left >= right || top >= bottom {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

impl Widget for DeckWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let scratch_area = Rect::new(0, 0, CARD_WIDTH, CARD_HEIGHT);

        for index in paint_order(&self.transforms) {
            let Some(card) = self.cards.get(index) else {
                continue;
            };
            let transform = self.transforms[index];
            let (x, y) = self.placement(area, index);
            let (left, right) = (area.left() as i64, area.right() as i64);
            let (top, bottom) = (area.top() as i64, area.bottom() as i64);

            let row_visible = |row: u16| {
                let ty = y as i64 + row as i64;
                let tx = Self::row_left(&transform, x, row);
                ty >= top && ty < bottom && tx < right && tx + CARD_WIDTH as i64 > left
            };
            if !(0..CARD_HEIGHT).any(row_visible) {
                continue;
            }

            // Render off-screen first so the card can be sheared and clipped
            let mut scratch = Buffer::empty(scratch_area);
            TradingCardWidget::new(card)
                .face(self.flips.face(&card.id))
                .active(self.active == Some(index))
                .dimmed(transform.scale < 0.99)
                .render(scratch_area, &mut scratch);

            for row in 0..CARD_HEIGHT {
                let ty = y as i64 + row as i64;
                if ty < top || ty >= bottom {
                    continue;
                }
                let row_left = Self::row_left(&transform, x, row);
                for col in 0..CARD_WIDTH {
                    let tx = row_left + col as i64;
                    if tx < left || tx >= right {
                        continue;
                    }
                    if let Some(cell) = buf.cell_mut((tx as u16, ty as u16)) {
                        *cell = scratch[(col, row)].clone();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_stacked_center_card_is_on_top() {
        let cards = CardSet::builtin().unwrap();
        let flips = FlipState::new();
        let deck = DeckWidget::new(&cards, &flips, LayoutMode::Stacked, &DeckGeometry::default());
        let area = Rect::new(0, 0, 100, deck.height());
        let center = deck.card_rect(area, 3).unwrap();
        let hit = deck
            .hit_test(area, center.x + CARD_WIDTH / 2, center.y + 2)
            .unwrap();
        assert_eq!(hit.index, 3);

        let mut buf = Buffer::empty(area);
        deck.render(area, &mut buf);
        assert!(screen(&buf).contains("Timelines"));
    }

    #[test]
    fn test_spread_row_keeps_active_card_visible() {
        let cards = CardSet::builtin().unwrap();
        let flips = FlipState::new();
        let deck = DeckWidget::new(&cards, &flips, LayoutMode::Spread, &DeckGeometry::default())
            .active(Some(5));
        let area = Rect::new(0, 0, 60, deck.height());
        let rect = deck.card_rect(area, 5).unwrap();
        assert_eq!(rect.width, CARD_WIDTH);
        assert!(deck.card_rect(area, 0).is_none());
    }

    #[test]
    fn test_click_on_cta_of_flipped_card_is_nested() {
        let cards = CardSet::builtin().unwrap();
        let mut flips = FlipState::new();
        flips.toggle("discovery");
        let deck = DeckWidget::new(&cards, &flips, LayoutMode::Spread, &DeckGeometry::default())
            .active(Some(0));
        let area = Rect::new(0, 0, 200, deck.height());
        let rect = deck.card_rect(area, 0).unwrap();
        let cta = TradingCardWidget::cta_rect(rect);

        let hit = deck.hit_test(area, cta.x + 1, cta.y).unwrap();
        assert_eq!(hit.index, 0);
        assert!(hit.on_nested_control);

        let body = deck.hit_test(area, rect.x + 2, rect.y + 2).unwrap();
        assert!(!body.on_nested_control);
    }

    #[test]
    fn test_cta_on_front_face_is_not_nested() {
        let cards = CardSet::builtin().unwrap();
        let flips = FlipState::new();
        let deck = DeckWidget::new(&cards, &flips, LayoutMode::Spread, &DeckGeometry::default());
        let area = Rect::new(0, 0, 200, deck.height());
        let rect = deck.card_rect(area, 1).unwrap();
        let cta = TradingCardWidget::cta_rect(rect);
        let hit = deck.hit_test(area, cta.x + 1, cta.y).unwrap();
        assert!(!hit.on_nested_control);
    }

    fn generated(count: usize) -> CardSet {
        let cards = (0..count)
            .map(|i| sire_core::Card {
                id: format!("card-{i}"),
                title: format!("Card {i}"),
                image: "https://example.com/x.png".to_string(),
                definition: "Generated".to_string(),
                flavor: "Test".to_string(),
                merits: vec![],
                why_us: vec![],
            })
            .collect();
        CardSet::new(cards).unwrap()
    }

    #[test]
    fn test_every_painted_cell_hits_its_painter() {
        let cards = CardSet::builtin().unwrap();
        let flips = FlipState::new();
        let deck = DeckWidget::new(&cards, &flips, LayoutMode::Stacked, &DeckGeometry::default());
        let area = Rect::new(0, 0, 100, deck.height());

        // Paint in z order, remembering who drew each cell last
        let mut owners = vec![None; area.area() as usize];
        for index in paint_order(&deck.transforms) {
            let (x, y) = deck.placement(area, index);
            for row in 0..CARD_HEIGHT {
                let ty = y as i64 + row as i64;
                let row_left = DeckWidget::row_left(&deck.transforms[index], x, row);
                for col in 0..CARD_WIDTH as i64 {
                    let tx = row_left + col;
                    if (0..area.width as i64).contains(&tx) && (0..area.height as i64).contains(&ty) {
                        owners[(ty * area.width as i64 + tx) as usize] = Some(index);
                    }
                }
            }
        }

        let mut buf = Buffer::empty(area);
        deck.clone().render(area, &mut buf);
        for y in 0..area.height {
            for x in 0..area.width {
                let owner = owners[(y * area.width + x) as usize];
                let hit = deck.hit_test(area, x, y).map(|h| h.index);
                assert_eq!(hit, owner, "cell ({x}, {y})");
                let painted = buf[(x, y)].bg != ratatui::style::Color::Reset;
                assert_eq!(painted, owner.is_some(), "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_cta_of_rotated_flipped_card_is_nested() {
        let cards = CardSet::builtin().unwrap();
        let mut flips = FlipState::new();
        flips.toggle("approvals");
        let deck = DeckWidget::new(&cards, &flips, LayoutMode::Stacked, &DeckGeometry::default());
        let area = Rect::new(0, 0, 100, deck.height());
        let cta = TradingCardWidget::cta_rect(Rect::new(0, 0, CARD_WIDTH, CARD_HEIGHT));

        let (x, y) = deck.placement(area, 2);
        let row_left = DeckWidget::row_left(&deck.transforms[2], x, cta.y);
        assert_ne!(row_left, x as i64, "card 2 is rotated");

        let mut checked = 0;
        for col in cta.x..cta.right() {
            let column = (row_left + col as i64) as u16;
            let Some(hit) = deck.hit_test(area, column, y as u16 + cta.y) else {
                continue;
            };
            if hit.index == 2 {
                assert!(hit.on_nested_control, "column {column}");
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_large_deck_lays_out_without_overflow() {
        let cards = generated(2600);
        let flips = FlipState::new();
        for mode in [LayoutMode::Spread, LayoutMode::Stacked] {
            let deck = DeckWidget::new(&cards, &flips, mode, &DeckGeometry::default())
                .active(Some(2599));
            let height = deck.height();
            assert!(height >= CARD_HEIGHT);
            let area = Rect::new(0, 0, 120, height.min(200));
            let mut buf = Buffer::empty(area);
            deck.clone().render(area, &mut buf);
            let _ = deck.hit_test(area, 60, 5);
        }

        let spread = DeckWidget::new(&cards, &flips, LayoutMode::Spread, &DeckGeometry::default())
            .active(Some(2599));
        let area = Rect::new(0, 0, 120, spread.height());
        assert!(spread.card_rect(area, 2599).is_some());
        assert!(spread.card_rect(area, 0).is_none());
    }

    #[test]
    fn test_shear_follows_rotation_sign() {
        let mut t = DeckTransform::IDENTITY;
        assert_eq!(DeckWidget::shear(&t, 0), 0);
        t.rotate_deg = 15.0;
        assert!(DeckWidget::shear(&t, 0) > 0);
        assert!(DeckWidget::shear(&t, CARD_HEIGHT - 1) < 0);
    }

    #[test]
    fn test_empty_deck_renders_nothing() {
        let cards = CardSet::default();
        let flips = FlipState::new();
        let deck = DeckWidget::new(&cards, &flips, LayoutMode::Stacked, &DeckGeometry::default());
        let area = Rect::new(0, 0, 40, deck.height());
        assert!(deck.hit_test(area, 10, 3).is_none());
        let mut buf = Buffer::empty(area);
        deck.render(area, &mut buf);
        assert!(screen(&buf).trim().is_empty());
    }
}
