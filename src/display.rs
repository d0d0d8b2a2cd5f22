use std::fmt;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

// sprites are always one byte wide
const SPRITE_WIDTH: usize = 8;

/// Monochrome 64x32 pixel grid, stored row by row.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: [bool; DISPLAY_WIDTH * DISPLAY_HEIGHT],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            pixels: [false; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// State of the pixel at column `x`, row `y`. Anything outside of the
    /// screen is unlit.
    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return false;
        }
        self.pixels[y * DISPLAY_WIDTH + x]
    }

    /// All cells, indexed as `row * DISPLAY_WIDTH + column`.
    pub fn pixels(&self) -> &[bool] {
        &self.pixels[..]
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    /// XOR an 8 pixel wide sprite onto the screen with its top left corner at
    /// (`x`, `y`), one byte per row, most significant bit on the left.
    ///
    /// Columns wrap around the right edge; rows below the bottom edge are
    /// clipped. Returns `true` if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;

        for (row, &byte) in sprite.iter().enumerate() {
            let py = match y.checked_add(row) {
                Some(py) if py < DISPLAY_HEIGHT => py,
                _ => break,
            };

            for column in 0..SPRITE_WIDTH {
                let bit = (byte >> (7 - column)) & 1 == 1;
                if !bit {
                    continue;
                }

                let px = (x % DISPLAY_WIDTH + column) % DISPLAY_WIDTH;
                let cell = &mut self.pixels[py * DISPLAY_WIDTH + px];
                collision |= *cell;
                *cell = !*cell;
            }
        }

        collision
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Framebuffer {{")?;
        write!(f, "{}", self)?;
        write!(f, "}}")
    }
}

/// One line per row, `#` for lit pixels and `.` for unlit ones.
impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels.chunks(DISPLAY_WIDTH) {
            for pixel in row {
                f.write_str(if *pixel { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
