use std::time::Duration;

use serde::Deserialize;

use crate::layout::LayoutMode;

/// Per-card placement relative to the card's resting position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckTransform {
    /// Horizontal displacement in cells
    pub dx: f32,
    /// Vertical displacement in rows
    pub dy: f32,
    pub rotate_deg: f32,
    pub scale: f32,
    /// Stacking order, higher paints on top
    pub z: i32,
}

impl DeckTransform {
    pub const IDENTITY: DeckTransform = DeckTransform {
        dx: 0.0,
        dy: 0.0,
        rotate_deg: 0.0,
        scale: 1.0,
        z: 1,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for DeckTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Fan constants for stacked mode
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeckGeometry {
    /// Cells of horizontal shift per step from center
    pub spread_x: f32,
    /// Rows of drop per step from center (arch)
    pub arch_y: f32,
    /// Degrees of rotation per step from center
    pub rotation_deg: f32,
    /// Scale lost per step from center
    pub scale_falloff: f32,
    pub min_scale: f32,
}

impl Default for DeckGeometry {
    fn default() -> Self {
        Self {
            spread_x: 5.0,
            arch_y: 1.0,
            rotation_deg: 5.0,
            scale_falloff: 0.04,
            min_scale: 0.8,
        }
    }
}

/// Reference index for symmetric offsets. Even decks lean left: 6 cards give offsets -3..=2.
pub fn center_index(count: usize) -> usize {
    count / 2
}

pub fn deck_transform(
    geometry: &DeckGeometry,
    mode: LayoutMode,
    index: usize,
    count: usize,
) -> DeckTransform {
    if mode == LayoutMode::Spread || index >= count {
        return DeckTransform::IDENTITY;
    }

    let offset = index as i64 - center_index(count) as i64;
    let distance = offset.unsigned_abs();
    let step = offset as f32;
    let dist = distance as f32;

    DeckTransform {
        dx: step * geometry.spread_x,
        dy: dist * geometry.arch_y,
        rotate_deg: step * geometry.rotation_deg,
        scale: (1.0 - dist * geometry.scale_falloff).max(geometry.min_scale),
        z: (count as u64).saturating_sub(distance).min(i32::MAX as u64) as i32,
    }
}

pub fn deck_layout(geometry: &DeckGeometry, mode: LayoutMode, count: usize) -> Vec<DeckTransform> {
    (0..count)
        .map(|i| deck_transform(geometry, mode, i, count))
        .collect()
}

/// Card indices in painting order: lowest z first, ties in document order.
pub fn paint_order(transforms: &[DeckTransform]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..transforms.len()).collect();
    order.sort_by_key(|&i| transforms[i].z);
    order
}

/// Entry delay for a card's transition into `mode`
pub fn stagger_delay(mode: LayoutMode, index: usize, count: usize) -> Duration {
    match mode {
        LayoutMode::Spread => Duration::from_millis(50 * index as u64),
        LayoutMode::Stacked => {
            let distance = (index as i64 - center_index(count) as i64).unsigned_abs();
            Duration::from_millis(60 * distance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo() -> DeckGeometry {
        DeckGeometry::default()
    }

    #[test]
    fn test_spread_is_identity_for_all_cards() {
        for count in 1..=9 {
            for i in 0..count {
                let t = deck_transform(&geo(), LayoutMode::Spread, i, count);
                assert!(t.is_identity(), "count {count} index {i}");
            }
        }
    }

    #[test]
    fn test_single_card_stack_is_identity() {
        let t = deck_transform(&geo(), LayoutMode::Stacked, 0, 1);
        assert!(t.is_identity());
    }

    #[test]
    fn test_center_is_unique_top() {
        for count in 1..=9 {
            let layout = deck_layout(&geo(), LayoutMode::Stacked, count);
            let max = layout.iter().map(|t| t.z).max().unwrap();
            let tops: Vec<usize> = (0..count).filter(|&i| layout[i].z == max).collect();
            assert_eq!(tops, vec![center_index(count)], "count {count}");
        }
    }

    #[test]
    fn test_six_card_offsets_are_asymmetric() {
        assert_eq!(center_index(6), 3);
        let first = deck_transform(&geo(), LayoutMode::Stacked, 0, 6);
        let last = deck_transform(&geo(), LayoutMode::Stacked, 5, 6);

        assert_eq!(first.dx, -3.0 * geo().spread_x);
        assert_eq!(last.dx, 2.0 * geo().spread_x);
        assert!(first.dx < 0.0 && last.dx > 0.0);
        assert!(first.rotate_deg < 0.0 && last.rotate_deg > 0.0);

        let layout = deck_layout(&geo(), LayoutMode::Stacked, 6);
        let widest = layout
            .iter()
            .map(|t| t.dx.abs())
            .fold(0.0_f32, f32::max);
        assert_eq!(first.dx.abs(), widest);
        assert!(first.rotate_deg.abs() > last.rotate_deg.abs());
    }

    #[test]
    fn test_scale_shrinks_with_distance() {
        let layout = deck_layout(&geo(), LayoutMode::Stacked, 7);
        assert_eq!(layout[3].scale, 1.0);
        assert!(layout[2].scale < layout[3].scale);
        assert!(layout[0].scale < layout[1].scale);
        assert_eq!(layout[2].scale, layout[4].scale);
    }

    #[test]
    fn test_scale_is_clamped() {
        let g = DeckGeometry {
            scale_falloff: 0.5,
            ..DeckGeometry::default()
        };
        let t = deck_transform(&g, LayoutMode::Stacked, 0, 9);
        assert_eq!(t.scale, g.min_scale);
    }

    #[test]
    fn test_out_of_range_and_empty_are_identity() {
        assert!(deck_transform(&geo(), LayoutMode::Stacked, 4, 4).is_identity());
        assert!(deck_transform(&geo(), LayoutMode::Stacked, 0, 0).is_identity());
        assert!(deck_layout(&geo(), LayoutMode::Stacked, 0).is_empty());
    }

    #[test]
    fn test_paint_order_ends_with_center() {
        let layout = deck_layout(&geo(), LayoutMode::Stacked, 5);
        let order = paint_order(&layout);
        assert_eq!(order.last(), Some(&2));
        assert_eq!(order.len(), 5);
    }

    #[test]
    fn test_stagger_from_center_when_stacking() {
        assert_eq!(stagger_delay(LayoutMode::Stacked, 3, 6), Duration::ZERO);
        assert_eq!(
            stagger_delay(LayoutMode::Stacked, 0, 6),
            Duration::from_millis(180)
        );
        assert_eq!(
            stagger_delay(LayoutMode::Spread, 2, 6),
            Duration::from_millis(100)
        );
    }
}
