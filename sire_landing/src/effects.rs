use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::Color;
use tachyonfx::fx;
use tachyonfx::{Effect, EffectManager, Interpolation, Motion};

/// Keyed effect manager; each section owns the keys it registers
pub type FxManager = EffectManager<&'static str>;

// ─── Effect Factories ────────────────────────────────────────────────

const NIGHT: Color = Color::Rgb(2, 6, 23);
const FLASH: Color = Color::Rgb(255, 255, 255);

/// Page content sweeps in on mount
pub fn page_intro() -> Effect {
    fx::sweep_in(
        Motion::UpToDown,
        10,
        2,
        NIGHT,
        (450, Interpolation::CubicOut),
    )
}

/// Card turning over: the new face sweeps across like a rotateY
pub fn flip_reveal(area: Rect) -> Effect {
    fx::sweep_in(
        Motion::LeftToRight,
        6,
        0,
        NIGHT,
        (520, Interpolation::QuadOut),
    )
    .with_area(area)
}

/// Brief white flash on the center card when the deck stacks
pub fn stack_flash(area: Rect) -> Effect {
    let up = fx::fade_to_fg(FLASH, (140, Interpolation::QuadOut));
    let down = fx::fade_from_fg(FLASH, (140, Interpolation::QuadIn));
    fx::sequence(&[up, down]).with_area(area)
}

/// Cards settling into a new arrangement, each after its own delay
pub fn deck_settle(cards: &[(Rect, Duration)]) -> Effect {
    let staggered: Vec<Effect> = cards
        .iter()
        .map(|&(area, delay)| {
            let delay = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            fx::sequence(&[
                fx::sleep(delay),
                fx::fade_from_fg(NIGHT, (260, Interpolation::QuadOut)),
            ])
            .with_area(area)
        })
        .collect();
    fx::parallel(&staggered)
}

/// Slow shimmer on the tagline while it types
pub fn tagline_shimmer(area: Rect) -> Effect {
    let shift = fx::hsl_shift_fg([20.0, 0.1, 0.1], (1200, Interpolation::SineInOut));
    fx::repeating(fx::ping_pong(shift)).with_area(area)
}
