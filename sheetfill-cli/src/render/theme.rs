use termimad::{MadSkin, crossterm::style::Color};

/// Colors for status lines, the progress bar and settings output.
pub struct Palette;

impl Palette {
    pub const TEXT: Color = Color::Rgb { r: 0xAB, g: 0xB2, b: 0xBF };
    pub const FRAME: Color = Color::Rgb { r: 0xC6, g: 0x78, b: 0xDD };
    pub const SUCCESS: Color = Color::Rgb { r: 0x98, g: 0xC3, b: 0x79 };
    pub const ERROR: Color = Color::Rgb { r: 0xE0, g: 0x6C, b: 0x75 };
    pub const PROGRESS: Color = Color::Rgb { r: 0x61, g: 0xAF, b: 0xEF };
    pub const LABEL: Color = Color::Rgb { r: 0x56, g: 0xB6, b: 0xC2 };
    pub const MUTED: Color = Color::Rgb { r: 0x5C, g: 0x63, b: 0x70 };

    /// Skin for the boxed info line: framed cell, plain text.
    pub fn info_skin() -> MadSkin {
        let mut skin = MadSkin::default();
        skin.paragraph.set_fg(Self::TEXT);
        skin.table.set_fg(Self::FRAME);
        skin
    }
}
