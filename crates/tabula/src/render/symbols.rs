//! Border glyph themes.

/// The glyphs a border-drawing renderer needs.
///
/// Junction names follow the shape of the glyph: `top_t` is `┬`, `left_t`
/// is `├`, and so on.
pub trait Symbols {
    fn horizontal(&self) -> &str;
    fn vertical(&self) -> &str;
    fn top_left(&self) -> &str;
    fn top_right(&self) -> &str;
    fn bottom_left(&self) -> &str;
    fn bottom_right(&self) -> &str;
    fn left_t(&self) -> &str;
    fn right_t(&self) -> &str;
    fn top_t(&self) -> &str;
    fn bottom_t(&self) -> &str;
    fn cross(&self) -> &str;

    /// Picks the glyph for a point on a rule from the lines leaving it.
    fn junction(&self, up: bool, down: bool, left: bool, right: bool) -> &str {
        match (up, down, left, right) {
            (true, true, true, true) => self.cross(),
            (true, true, false, true) => self.left_t(),
            (true, true, true, false) => self.right_t(),
            (false, true, true, true) => self.top_t(),
            (true, false, true, true) => self.bottom_t(),
            (false, true, false, true) => self.top_left(),
            (false, true, true, false) => self.top_right(),
            (true, false, false, true) => self.bottom_left(),
            (true, false, true, false) => self.bottom_right(),
            (true, _, false, false) | (_, true, false, false) => self.vertical(),
            (false, false, _, _) => self.horizontal(),
        }
    }
}

/// Built-in border styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderStyle {
    /// No visible borders; columns are separated by a space.
    None,
    /// ASCII borders: `+`, `-`, `|`
    Ascii,
    /// Light box-drawing: `┌ ─ ┐ │ └ ┘ ├ ┼ ┤ ┬ ┴`
    #[default]
    Light,
    /// Heavy box-drawing: `┏ ━ ┓ ┃ ┗ ┛ ┣ ╋ ┫ ┳ ┻`
    Heavy,
    /// Double-line box-drawing: `╔ ═ ╗ ║ ╚ ╝ ╠ ╬ ╣ ╦ ╩`
    Double,
    /// Light lines with rounded corners: `╭ ╮ ╰ ╯`
    Rounded,
    /// GitHub-flavored Markdown pipes and dashes.
    Markdown,
}

struct Glyphs {
    horizontal: &'static str,
    vertical: &'static str,
    top_left: &'static str,
    top_right: &'static str,
    bottom_left: &'static str,
    bottom_right: &'static str,
    left_t: &'static str,
    right_t: &'static str,
    top_t: &'static str,
    bottom_t: &'static str,
    cross: &'static str,
}

impl Glyphs {
    const fn uniform(line: &'static str, vertical: &'static str, joint: &'static str) -> Glyphs {
        Glyphs {
            horizontal: line,
            vertical,
            top_left: joint,
            top_right: joint,
            bottom_left: joint,
            bottom_right: joint,
            left_t: joint,
            right_t: joint,
            top_t: joint,
            bottom_t: joint,
            cross: joint,
        }
    }
}

const NONE: Glyphs = Glyphs::uniform(" ", " ", " ");
const ASCII: Glyphs = Glyphs::uniform("-", "|", "+");
const MARKDOWN: Glyphs = Glyphs::uniform("-", "|", "|");

const LIGHT: Glyphs = Glyphs {
    horizontal: "─",
    vertical: "│",
    top_left: "┌",
    top_right: "┐",
    bottom_left: "└",
    bottom_right: "┘",
    left_t: "├",
    right_t: "┤",
    top_t: "┬",
    bottom_t: "┴",
    cross: "┼",
};

const HEAVY: Glyphs = Glyphs {
    horizontal: "━",
    vertical: "┃",
    top_left: "┏",
    top_right: "┓",
    bottom_left: "┗",
    bottom_right: "┛",
    left_t: "┣",
    right_t: "┫",
    top_t: "┳",
    bottom_t: "┻",
    cross: "╋",
};

const DOUBLE: Glyphs = Glyphs {
    horizontal: "═",
    vertical: "║",
    top_left: "╔",
    top_right: "╗",
    bottom_left: "╚",
    bottom_right: "╝",
    left_t: "╠",
    right_t: "╣",
    top_t: "╦",
    bottom_t: "╩",
    cross: "╬",
};

const ROUNDED: Glyphs = Glyphs {
    top_left: "╭",
    top_right: "╮",
    bottom_left: "╰",
    bottom_right: "╯",
    ..LIGHT
};

impl BorderStyle {
    fn glyphs(self) -> &'static Glyphs {
        match self {
            BorderStyle::None => &NONE,
            BorderStyle::Ascii => &ASCII,
            BorderStyle::Light => &LIGHT,
            BorderStyle::Heavy => &HEAVY,
            BorderStyle::Double => &DOUBLE,
            BorderStyle::Rounded => &ROUNDED,
            BorderStyle::Markdown => &MARKDOWN,
        }
    }
}

impl Symbols for BorderStyle {
    fn horizontal(&self) -> &str {
        self.glyphs().horizontal
    }
    fn vertical(&self) -> &str {
        self.glyphs().vertical
    }
    fn top_left(&self) -> &str {
        self.glyphs().top_left
    }
    fn top_right(&self) -> &str {
        self.glyphs().top_right
    }
    fn bottom_left(&self) -> &str {
        self.glyphs().bottom_left
    }
    fn bottom_right(&self) -> &str {
        self.glyphs().bottom_right
    }
    fn left_t(&self) -> &str {
        self.glyphs().left_t
    }
    fn right_t(&self) -> &str {
        self.glyphs().right_t
    }
    fn top_t(&self) -> &str {
        self.glyphs().top_t
    }
    fn bottom_t(&self) -> &str {
        self.glyphs().bottom_t
    }
    fn cross(&self) -> &str {
        self.glyphs().cross
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junctions_follow_arms() {
        let s = BorderStyle::Light;
        assert_eq!(s.junction(true, true, true, true), "┼");
        assert_eq!(s.junction(false, true, true, true), "┬");
        assert_eq!(s.junction(true, false, true, true), "┴");
        assert_eq!(s.junction(true, true, false, true), "├");
        assert_eq!(s.junction(true, true, true, false), "┤");
        assert_eq!(s.junction(false, true, false, true), "┌");
        assert_eq!(s.junction(true, false, true, false), "┘");
        assert_eq!(s.junction(true, true, false, false), "│");
        assert_eq!(s.junction(false, false, true, true), "─");
    }

    #[test]
    fn rounded_only_changes_corners() {
        let s = BorderStyle::Rounded;
        assert_eq!(s.top_left(), "╭");
        assert_eq!(s.cross(), "┼");
    }

    #[test]
    fn markdown_joins_with_pipes() {
        let s = BorderStyle::Markdown;
        assert_eq!(s.junction(true, true, true, true), "|");
        assert_eq!(s.horizontal(), "-");
    }
}
