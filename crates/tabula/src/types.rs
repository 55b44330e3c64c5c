//! Core value types shared by the layout pipeline.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Text alignment within a cell.
///
/// `None` means "not set": it never overrides another alignment when configs
/// are merged, and it renders like `Left`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    None,
    /// Pad on the right.
    Left,
    /// Pad on the left.
    Right,
    /// Pad on both sides, the odd column goes right.
    Center,
}

impl Align {
    /// Parses a lowercase alignment name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Align::None),
            "left" => Some(Align::Left),
            "right" => Some(Align::Right),
            "center" | "centre" => Some(Align::Center),
            _ => None,
        }
    }

    /// Returns `self` unless it is `None`, in which case `fallback` is used.
    pub fn or(self, fallback: Align) -> Align {
        if self == Align::None {
            fallback
        } else {
            self
        }
    }
}

/// How cell content that exceeds its column's content width is handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Leave over-wide content alone.
    None,
    /// Wrap at word boundaries.
    #[default]
    Normal,
    /// Cut and append an ellipsis.
    Truncate,
    /// Hard-wrap at character boundaries, marking each forced break.
    Break,
}

impl WrapMode {
    /// Parses a lowercase wrap mode name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Some(WrapMode::None),
            "normal" | "word" => Some(WrapMode::Normal),
            "truncate" => Some(WrapMode::Truncate),
            "break" => Some(WrapMode::Break),
            _ => None,
        }
    }
}

bitflags! {
    /// Which merge detectors run for a section. Flags can be OR-ed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MergeMode: u8 {
        /// Identical adjacent cells on the same visual line.
        const HORIZONTAL = 0b001;
        /// Identical consecutive cells down a column.
        const VERTICAL = 0b010;
        /// Vertical merges that also require the cell to the left to continue.
        const HIERARCHICAL = 0b100;
        /// Horizontal and vertical together.
        const BOTH = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

impl MergeMode {
    /// Parses a merge mode name; `|` or `,` combine several names.
    pub fn parse(name: &str) -> Option<Self> {
        let mut mode = MergeMode::empty();
        for part in name.split(['|', ',']) {
            mode |= match part.trim().to_ascii_lowercase().as_str() {
                "none" | "" => MergeMode::empty(),
                "horizontal" => MergeMode::HORIZONTAL,
                "vertical" => MergeMode::VERTICAL,
                "hierarchical" => MergeMode::HIERARCHICAL,
                "both" => MergeMode::BOTH,
                _ => return None,
            };
        }
        Some(mode)
    }
}

/// One of the three independently configured parts of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Header,
    Row,
    Footer,
}

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Row => "row",
            Section::Footer => "footer",
        }
    }
}

/// Padding strings placed around cell content.
///
/// `left` and `right` are written once on each content line. `top` and
/// `bottom`, when non-empty, add a whole visual line filled with that glyph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: String,
    pub right: String,
    pub top: String,
    pub bottom: String,
}

impl Default for Padding {
    fn default() -> Self {
        Padding {
            left: " ".to_string(),
            right: " ".to_string(),
            top: String::new(),
            bottom: String::new(),
        }
    }
}

impl Padding {
    /// Padding with only left/right strings.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Padding {
            left: left.into(),
            right: right.into(),
            top: String::new(),
            bottom: String::new(),
        }
    }

    /// No padding at all.
    pub fn none() -> Self {
        Padding::new("", "")
    }

    /// Sets the top padding glyph.
    pub fn top(mut self, top: impl Into<String>) -> Self {
        self.top = top.into();
        self
    }

    /// Sets the bottom padding glyph.
    pub fn bottom(mut self, bottom: impl Into<String>) -> Self {
        self.bottom = bottom.into();
        self
    }

    /// Combined display width of the left and right strings.
    pub fn horizontal_width(&self) -> usize {
        crate::width::display_width(&self.left) + crate::width::display_width(&self.right)
    }
}

/// Merge annotation for one detector on one cell.
///
/// Within a merge group exactly one member has `start`, exactly one has `end`,
/// and every member carries the group's `span`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MergeStateOption {
    pub present: bool,
    pub span: usize,
    pub start: bool,
    pub end: bool,
}

impl MergeStateOption {
    /// True for a group member other than the first one.
    pub fn is_continuation(&self) -> bool {
        self.present && !self.start
    }
}

/// Merge annotations from all three detectors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MergeState {
    pub horizontal: MergeStateOption,
    pub vertical: MergeStateOption,
    pub hierarchical: MergeStateOption,
}

impl MergeState {
    /// The cell is swallowed by a horizontal span starting further left.
    pub fn is_absorbed(&self) -> bool {
        self.horizontal.is_continuation()
    }

    /// The cell continues a vertical or hierarchical group from the row above.
    pub fn continues_from_above(&self) -> bool {
        self.vertical.is_continuation() || self.hierarchical.is_continuation()
    }

    /// The cell's group continues into the row below.
    pub fn continues_below(&self) -> bool {
        (self.vertical.present && !self.vertical.end)
            || (self.hierarchical.present && !self.hierarchical.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_default_is_unset() {
        assert_eq!(Align::default(), Align::None);
        assert_eq!(Align::None.or(Align::Right), Align::Right);
        assert_eq!(Align::Center.or(Align::Right), Align::Center);
    }

    #[test]
    fn align_serde_roundtrip() {
        for align in [Align::None, Align::Left, Align::Right, Align::Center] {
            let json = serde_json::to_string(&align).unwrap();
            let parsed: Align = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, align);
        }
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(Align::from_name("RIGHT"), Some(Align::Right));
        assert_eq!(Align::from_name("diagonal"), None);
        assert_eq!(WrapMode::from_name("Break"), Some(WrapMode::Break));
        assert_eq!(WrapMode::from_name("squeeze"), None);
    }

    #[test]
    fn merge_mode_names_combine() {
        assert_eq!(
            MergeMode::parse("horizontal|vertical"),
            Some(MergeMode::BOTH)
        );
        assert_eq!(MergeMode::parse("none"), Some(MergeMode::empty()));
        assert_eq!(MergeMode::parse("sideways"), None);
    }

    #[test]
    fn merge_mode_parse_ignores_case_and_spacing() {
        assert_eq!(
            MergeMode::parse(" Hierarchical , VERTICAL "),
            Some(MergeMode::HIERARCHICAL | MergeMode::VERTICAL)
        );
        // The generated flag-name lookup stays available alongside.
        assert_eq!(MergeMode::from_name("HORIZONTAL"), Some(MergeMode::HORIZONTAL));
    }

    #[test]
    fn padding_defaults_to_single_spaces() {
        let pad = Padding::default();
        assert_eq!(pad.horizontal_width(), 2);
        assert!(pad.top.is_empty());
        assert_eq!(Padding::none().horizontal_width(), 0);
    }

    #[test]
    fn merge_state_helpers() {
        let mut state = MergeState::default();
        assert!(!state.is_absorbed());
        state.horizontal = MergeStateOption {
            present: true,
            span: 2,
            start: false,
            end: true,
        };
        assert!(state.is_absorbed());

        state.vertical = MergeStateOption {
            present: true,
            span: 3,
            start: false,
            end: false,
        };
        assert!(state.continues_from_above());
        assert!(state.continues_below());
    }
}
