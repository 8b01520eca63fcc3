use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// Cut `text` to `width` characters, ending in an ellipsis when shortened
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('\u{2026}');
    out
}

/// Write `text` centered on row `y` of `area`, truncated to fit
pub fn set_centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    let text = truncate(text, area.width as usize);
    let len = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(len) / 2;
    buf.set_string(x, y, &text, style);
}
