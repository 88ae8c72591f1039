// ASCII rendering of the playfield: a character grid plus per-kind glyph shapes.

use crate::domain::tuning::Playfield;
use crate::domain::{EntityKind, Position, Surface};
use crate::use_cases::GameStatus;

const BACKGROUND: char = ' ';
const GROUND: char = '_';

// Shapes are listed bottom row first; spaces are transparent.
const LAUNCHER_SHAPE: &[&str] = &["/____\\", " /==\\", "  ||"];
const TARGET_SHAPE: &[&str] = &["/______\\", "|  __  |", "| (  ) |", " \\____/"];
const PLATE_SHAPE: &[&str] = &["<===>"];
const ROCKET_SHAPE: &[&str] = &["/ \\", "|#|", " ^"];

fn shape(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Launcher => LAUNCHER_SHAPE,
        EntityKind::Target => TARGET_SHAPE,
        EntityKind::Plate => PLATE_SHAPE,
        EntityKind::Rocket => ROCKET_SHAPE,
    }
}

/// Character buffer the size of the playfield. Row 0 is the ground line.
#[derive(Debug, Clone)]
pub struct AsciiGrid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl AsciiGrid {
    pub fn new(width: usize, height: usize) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: vec![BACKGROUND; width * height],
        };
        grid.clear();
        grid
    }

    pub fn for_playfield(playfield: &Playfield) -> Self {
        Self::new(
            usize::try_from(playfield.width).unwrap_or(0),
            usize::try_from(playfield.height).unwrap_or(0),
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Blanks the grid and redraws the ground line.
    pub fn clear(&mut self) {
        self.cells.fill(BACKGROUND);
        if self.height > 0 {
            self.cells[..self.width].fill(GROUND);
        }
    }

    /// Writes `glyph` at `(x, y)`. Cells outside the grid and blank glyphs are ignored.
    pub fn put(&mut self, x: i32, y: i32, glyph: char) -> bool {
        if glyph == BACKGROUND {
            return false;
        }
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return false;
        };
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x] = glyph;
        true
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Rows top to bottom, ready to print.
    pub fn lines(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|y| self.cells[y * self.width..(y + 1) * self.width].iter().collect())
            .collect()
    }
}

impl Surface for AsciiGrid {
    fn draw(&mut self, kind: EntityKind, at: Position) {
        for (dy, row) in (0i32..).zip(shape(kind)) {
            for (dx, glyph) in (0i32..).zip(row.chars()) {
                self.put(at.x + dx, at.y + dy, glyph);
            }
        }
    }
}

/// One-line HUD shown under the playfield.
pub fn status_line(status: &GameStatus) -> String {
    if let Some(starting_in) = status.starting_in {
        // Round up so the countdown reads 3, 2, 1 rather than 2, 1, 0.
        let secs = starting_in.as_millis().div_ceil(1_000);
        return format!(
            " firepower {} | angle {} | starting in {secs}s | [q] quit",
            status.firepower, status.angle_degrees,
        );
    }
    format!(
        " time left {:>3}s | shots {} | hits {} | plates {} | firepower {} angle {} | [space] fire  [q] quit",
        status.remaining.as_secs(),
        status.stats.shots_fired,
        status.stats.hits,
        status.stats.plates_launched,
        status.firepower,
        status.angle_degrees,
    )
}
