//! Tile map loading and greedy rectangle merging
//!
//! Maps are plain text: one row per line, `1` for a solid tile, `0` (or `.`)
//! for empty. Row 0 is the top of the map. Solid tiles are merged into
//! maximal rectangles so the physics world gets a handful of static boxes
//! instead of one per tile.

use std::fs;
use std::io;
use std::path::Path;

/// A merged run of solid tiles, in tile units
///
/// `x`/`y` are the top-left tile of the rectangle (y grows downward, matching
/// the text file), `w`/`h` its extent in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl TileRect {
    /// Number of tiles covered
    pub fn area(&self) -> u32 {
        self.w * self.h
    }
}

/// Error loading a tile map
#[derive(Debug)]
pub enum MapError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// The map has no rows or no columns
    Empty,
    /// A row's length differs from the first row's
    Jagged {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than the known tile markers
    InvalidTile { line: usize, column: usize, ch: char },
}

impl From<io::Error> for MapError {
    fn from(e: io::Error) -> Self {
        MapError::Io(e)
    }
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "IO error: {}", e),
            MapError::Empty => write!(f, "map has no tiles"),
            MapError::Jagged {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {} has {} tiles, expected {}",
                line, found, expected
            ),
            MapError::InvalidTile { line, column, ch } => {
                write!(f, "invalid tile '{}' at line {}, column {}", ch, line, column)
            }
        }
    }
}

impl std::error::Error for MapError {}

/// A rectangular grid of tiles
///
/// Stored as a single contiguous buffer indexed `row * width + col`.
#[derive(Clone, Debug)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<bool>,
}

impl TileGrid {
    /// Parse a map from its text form
    ///
    /// Every row must have the same length as the first; a shorter or longer
    /// row is rejected rather than silently padded.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut width = 0usize;
        let mut height = 0usize;
        let mut tiles = Vec::new();

        for (row, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let len = line.chars().count();
            if height == 0 {
                width = len;
            } else if len != width {
                return Err(MapError::Jagged {
                    line: row + 1,
                    expected: width,
                    found: len,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '1' | '#' => tiles.push(true),
                    '0' | '.' => tiles.push(false),
                    _ => {
                        return Err(MapError::InvalidTile {
                            line: row + 1,
                            column: col + 1,
                            ch,
                        })
                    }
                }
            }
            height += 1;
        }

        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }

        log::debug!("parsed tile map: {}x{}", width, height);
        Ok(Self {
            width: width as u32,
            height: height as u32,
            tiles,
        })
    }

    /// Load a map from a text file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// A grid with no tiles; yields zero solid rectangles
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            tiles: Vec::new(),
        }
    }

    /// Map width in tiles
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Map height in tiles
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the tile at (x, y) is solid; out-of-bounds reads are empty
    pub fn is_solid(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.tiles[(y * self.width + x) as usize]
    }

    /// Merge solid tiles into maximal rectangles
    ///
    /// Greedy scan in row-major order: each unvisited solid tile seeds a
    /// rectangle that first grows rightward along the row, then downward
    /// while the full span below stays solid and unvisited. Every solid tile
    /// lands in exactly one rectangle.
    pub fn solid_rects(&self) -> Vec<TileRect> {
        let mut visited = vec![false; self.tiles.len()];
        let mut rects = Vec::new();

        for y in 0..self.height {
            for x in 0..self.width {
                let idx = (y * self.width + x) as usize;
                if visited[idx] || !self.tiles[idx] {
                    continue;
                }

                // Grow right
                let mut w = 1;
                while x + w < self.width {
                    let i = (y * self.width + x + w) as usize;
                    if visited[i] || !self.tiles[i] {
                        break;
                    }
                    w += 1;
                }

                // Grow down while the whole span stays solid and unclaimed
                let mut h = 1;
                'rows: while y + h < self.height {
                    for dx in 0..w {
                        let i = ((y + h) * self.width + x + dx) as usize;
                        if visited[i] || !self.tiles[i] {
                            break 'rows;
                        }
                    }
                    h += 1;
                }

                for dy in 0..h {
                    for dx in 0..w {
                        visited[((y + dy) * self.width + x + dx) as usize] = true;
                    }
                }

                rects.push(TileRect { x, y, w, h });
            }
        }

        log::debug!(
            "merged {} solid tiles into {} rects",
            self.tiles.iter().filter(|&&t| t).count(),
            rects.len()
        );
        rects
    }
}
