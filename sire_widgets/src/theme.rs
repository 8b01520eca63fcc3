use ratatui::style::Color;

/// Night-sky palette of the Sire Media landing page
pub struct Theme;

impl Theme {
    // Backgrounds
    pub const BG: Color = Color::Rgb(2, 6, 23);
    pub const SECTION_BG: Color = Color::Rgb(15, 23, 42);
    pub const PANEL_BG: Color = Color::Rgb(30, 27, 75);

    // Cards
    pub const CARD_BG: Color = Color::Rgb(23, 37, 84);
    pub const CARD_BACK_BG: Color = Color::Rgb(17, 24, 39);
    pub const CARD_BORDER: Color = Color::Rgb(71, 85, 105);
    pub const CARD_ACTIVE: Color = Color::Rgb(96, 165, 250);
    pub const IMAGE_FILL: Color = Color::Rgb(30, 58, 138);

    // Accents
    pub const SKY: Color = Color::Rgb(56, 189, 248);
    pub const EMERALD: Color = Color::Rgb(52, 211, 153);
    pub const BADGE_BG: Color = Color::Rgb(12, 74, 110);
    pub const NEON_BLUE: Color = Color::Rgb(37, 99, 235);
    pub const NEON_PURPLE: Color = Color::Rgb(168, 85, 247);

    // Text
    pub const BRIGHT_TEXT: Color = Color::Rgb(248, 250, 252);
    pub const BODY_TEXT: Color = Color::Rgb(203, 213, 225);
    pub const MUTED_TEXT: Color = Color::Rgb(148, 163, 184);
    pub const DIM_TEXT: Color = Color::Rgb(71, 85, 105);
}
