use std::io::Write;

use crossterm::{
    cursor, queue, style,
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

/// Anything that can show a serialized maze.
pub trait Renderer {
    fn render(&mut self, text: &str) -> std::io::Result<()>;
}

/// Draws maze text from the top-left corner of the terminal, one line per row.
///
/// Lines are cut at the right edge of the drawing area instead of wrapping, and padded up to it
/// so that whatever sits to the right of the area is left alone.
pub struct TerminalRenderer<W: Write> {
    out: W,
    /// Drawing area (width, height). Defaults to the whole terminal
    area: Option<(u16, u16)>,
    /// Rows drawn by the last render
    last_height: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            area: None,
            last_height: 0,
        }
    }

    pub fn set_area(&mut self, width: u16, height: u16) {
        self.area = Some((width, height));
    }

    /// Rows taken by the last rendered maze.
    pub fn height(&self) -> u16 {
        self.last_height
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, text: &str) -> std::io::Result<()> {
        let area = self.area.or_else(|| terminal::size().ok());
        let max_rows = area.map_or(usize::MAX, |(_, h)| h as usize);
        let mut height = 0u16;

        for line in text.lines().take(max_rows) {
            queue!(self.out, cursor::MoveTo(0, height))?;
            match area {
                Some((width, _)) => {
                    let (line, line_width) = line.unicode_truncate(width as usize);
                    let padding = " ".repeat(width as usize - line_width);
                    queue!(self.out, style::Print(line), style::Print(padding))?;
                }
                None => queue!(
                    self.out,
                    style::Print(line),
                    terminal::Clear(ClearType::UntilNewLine)
                )?,
            }
            height += 1;
        }

        // Blank out rows left over from a taller maze
        for y in height..self.last_height {
            queue!(self.out, cursor::MoveTo(0, y))?;
            match area {
                Some((width, _)) => queue!(self.out, style::Print(" ".repeat(width as usize)))?,
                None => queue!(self.out, terminal::Clear(ClearType::CurrentLine))?,
            }
        }
        self.last_height = height;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(renderer: &mut TerminalRenderer<Vec<u8>>) -> String {
        let bytes = std::mem::take(&mut renderer.out);
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_render_writes_every_row() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.set_area(6, 10);
        renderer.render("██  ██\n██  ██\n██  ██\n").unwrap();
        assert_eq!(renderer.height(), 3);
        assert_eq!(written(&mut renderer).matches("██  ██").count(), 3);
    }

    #[test]
    fn test_lines_are_cut_and_padded_to_the_area() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.set_area(5, 10);
        renderer.render("██████\n██\n").unwrap();
        let out = written(&mut renderer);
        assert!(out.contains("█████"));
        assert!(!out.contains("██████"));
        assert!(out.contains("██   "));
    }

    #[test]
    fn test_rows_beyond_the_area_are_dropped() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.set_area(4, 2);
        renderer.render("████\n████\n████\n").unwrap();
        assert_eq!(renderer.height(), 2);
    }

    #[test]
    fn test_smaller_maze_blanks_leftovers() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.set_area(4, 10);
        renderer.render("████\n████\n████\n").unwrap();
        written(&mut renderer);
        renderer.render("████\n").unwrap();
        assert_eq!(renderer.height(), 1);

        let mut expected = Vec::new();
        queue!(
            expected,
            cursor::MoveTo(0, 1),
            style::Print("    "),
            cursor::MoveTo(0, 2),
            style::Print("    ")
        )
        .unwrap();
        let expected = String::from_utf8(expected).unwrap();
        assert!(written(&mut renderer).ends_with(&expected));
    }
}
