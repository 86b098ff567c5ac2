//! Character-grid renderer
//!
//! One cell per integer coordinate, y growing upward so the ship sits on the
//! bottom row. Later objects overwrite earlier ones in the same cell.

use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::widgets::Paragraph;

use super::Visualizer;
use crate::sim::SpaceField;

const EMPTY_CELL: char = ' ';
const BORDER: char = '#';

/// Draw the field into a multi-line string, borders included
pub fn draw_field(field: &SpaceField) -> String {
    let cols = field.width as usize + 1;
    let rows = field.height as usize + 1;
    let mut grid = vec![vec![EMPTY_CELL; cols]; rows];

    for object in field.space_objects() {
        let x = object.center.x.round();
        let y = object.center.y.round();
        if x < 0.0 || y < 0.0 {
            continue;
        }
        let (col, row) = (x as usize, y as usize);
        if col < cols && row < rows {
            grid[rows - 1 - row][col] = object.symbol();
        }
    }

    let edge: String = std::iter::repeat_n(BORDER, cols + 2).collect();
    let mut out = String::with_capacity((cols + 3) * (rows + 2));
    out.push_str(&edge);
    out.push('\n');
    for line in grid {
        out.push(BORDER);
        out.extend(line);
        out.push(BORDER);
        out.push('\n');
    }
    out.push_str(&edge);
    out.push('\n');
    out
}

/// Draws one frame per tick through a ratatui terminal, redrawing in place
pub struct TerminalVisualizer<B: Backend> {
    terminal: Terminal<B>,
    frames: u64,
    failed: bool,
}

impl<B: Backend> TerminalVisualizer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            frames: 0,
            failed: false,
        }
    }

    /// Frames successfully drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Visualizer for TerminalVisualizer<B> {
    fn render_space_field(&mut self, field: &SpaceField) {
        let text = draw_field(field);
        let result = self.terminal.draw(|frame| {
            frame.render_widget(Paragraph::new(text), frame.area());
        });
        match result {
            Ok(_) => self.frames += 1,
            Err(err) => {
                // Keep the game running; report only the first failure
                if !self.failed {
                    log::warn!("Render output failed: {}", err);
                    self.failed = true;
                }
            }
        }
    }
}
