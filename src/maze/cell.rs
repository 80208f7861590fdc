use std::fmt;

use unicode_width::UnicodeWidthStr;

/// Named glyph tables for drawing a maze as text.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    #[default]
    Full,
    Half,
    Quarter,
    Shade,
}

impl BlockStyle {
    pub const ALL: [BlockStyle; 4] = [
        BlockStyle::Full,
        BlockStyle::Half,
        BlockStyle::Quarter,
        BlockStyle::Shade,
    ];

    pub fn glyphs(self) -> Glyphs {
        let (wall, path, solution) = match self {
            BlockStyle::Full => ("██", "  ", "▒▒"),
            BlockStyle::Half => ("▀▀", "  ", "▄▄"),
            BlockStyle::Quarter => ("▌▐", "  ", "░░"),
            BlockStyle::Shade => ("▓▓", "  ", "░░"),
        };
        Glyphs {
            wall: wall.to_string(),
            path: path.to_string(),
            solution: solution.to_string(),
        }
    }
}

impl fmt::Display for BlockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockStyle::Full => write!(f, "full"),
            BlockStyle::Half => write!(f, "half"),
            BlockStyle::Quarter => write!(f, "quarter"),
            BlockStyle::Shade => write!(f, "shade"),
        }
    }
}

impl std::str::FromStr for BlockStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockStyle::ALL
            .into_iter()
            .find(|style| style.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown block style '{}'", s))
    }
}

/// The three glyphs a maze cell can be drawn with.
///
/// Every glyph is exactly [`Glyphs::CELL_WIDTH`] characters long and occupies the same number
/// of terminal columns, so one grid cell is always one fixed-width pair of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyphs {
    wall: String,
    path: String,
    solution: String,
}

/// Reasons a custom glyph table is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphError {
    /// The glyph is not exactly two characters wide, in chars or in terminal columns.
    BadWidth { glyph: String },
    /// The wall glyph must be distinguishable from the open glyphs.
    AmbiguousWall,
}

impl fmt::Display for GlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphError::BadWidth { glyph } => write!(
                f,
                "glyph {:?} must be {} characters and {} columns wide",
                glyph,
                Glyphs::CELL_WIDTH,
                Glyphs::CELL_WIDTH
            ),
            GlyphError::AmbiguousWall => {
                write!(f, "wall glyph must differ from the path and solution glyphs")
            }
        }
    }
}

impl std::error::Error for GlyphError {}

impl Glyphs {
    /// The width of each cell when rendered, in characters and in terminal columns.
    pub const CELL_WIDTH: usize = 2;

    pub fn new(wall: &str, path: &str, solution: &str) -> Result<Self, GlyphError> {
        for glyph in [wall, path, solution] {
            if glyph.chars().count() != Glyphs::CELL_WIDTH || glyph.width() != Glyphs::CELL_WIDTH
            {
                return Err(GlyphError::BadWidth {
                    glyph: glyph.to_string(),
                });
            }
        }
        if wall == path || wall == solution {
            return Err(GlyphError::AmbiguousWall);
        }
        Ok(Glyphs {
            wall: wall.to_string(),
            path: path.to_string(),
            solution: solution.to_string(),
        })
    }

    pub fn solution(&self) -> &str {
        &self.solution
    }

    /// Picks the glyph for one cell: highlighted cells win over the wall/path distinction.
    pub fn select(&self, wall: bool, highlighted: bool) -> &str {
        if highlighted {
            &self.solution
        } else if wall {
            &self.wall
        } else {
            &self.path
        }
    }

    /// Whether a two-character pair read back from text is a wall.
    pub fn is_wall_pair(&self, pair: &[char]) -> bool {
        pair.len() == Glyphs::CELL_WIDTH && self.wall.chars().eq(pair.iter().copied())
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        BlockStyle::default().glyphs()
    }
}
