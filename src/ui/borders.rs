use ratatui::symbols::border::{self, Set};

/// For terminals or fonts without box-drawing glyphs.
pub const ASCII_BORDER: Set = Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

/// The panel frame. Rounded corners read as a popup menu.
pub fn border_set(ascii: bool) -> Set {
    if ascii {
        ASCII_BORDER
    } else {
        border::ROUNDED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_mode_uses_plain_characters() {
        assert!(border_set(true).top_left.is_ascii());
        assert_eq!(border_set(false).top_left, "╭");
    }
}
