use std::io::Cursor;

use anyhow::Context;
use bytes::Bytes;
use image::{ImageFormat, Rgb, RgbImage};

use super::glyphs;

const PRIME_FILL: Rgb<u8> = Rgb([144, 238, 144]); // lightgreen
const COMPOSITE_FILL: Rgb<u8> = Rgb([173, 216, 230]); // lightblue
const EDGE: Rgb<u8> = Rgb([0, 0, 0]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

const LABEL_SCALE: u32 = 2;
const LABEL_PADDING: u32 = 4;
const MIN_CELL_SIZE: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub number: usize,
    /// Numbering row, 0 is the first row of numbers.
    pub row: usize,
    pub col: usize,
    /// Vertical slot counted from the bottom of the grid (`rows - 1 - row`).
    pub slot: usize,
    pub prime: bool,
}

/// Square layout of 1..=n, row-major.
#[derive(Debug, Clone)]
pub struct GridLayout {
    pub n: usize,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<GridCell>,
}

impl GridLayout {
    /// `primes` must be the sorted primes up to `n`.
    pub fn new(n: usize, primes: &[usize]) -> Self {
        let rows = ceil_sqrt(n);
        let cols = rows;

        let mut cells = Vec::with_capacity(n);
        'rows: for row in 0..rows {
            for col in 0..cols {
                let number = row * cols + col + 1;
                if number > n {
                    break 'rows;
                }
                cells.push(GridCell {
                    number,
                    row,
                    col,
                    slot: rows - 1 - row,
                    prime: primes.binary_search(&number).is_ok(),
                });
            }
        }

        Self {
            n,
            rows,
            cols,
            cells,
        }
    }

    /// Rows holding at least one number.
    pub fn used_rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.n.div_ceil(self.cols)
        }
    }

    pub fn cell(&self, number: usize) -> Option<&GridCell> {
        number
            .checked_sub(1)
            .and_then(|idx| self.cells.get(idx))
    }

    /// Side of one square cell in pixels, wide enough for the longest label.
    pub fn cell_size(&self) -> u32 {
        let (label_w, label_h) = glyphs::text_size(&self.n.to_string(), LABEL_SCALE);
        (label_w.max(label_h) + 2 * LABEL_PADDING).max(MIN_CELL_SIZE)
    }
}

/// Lay out and rasterize the sieve for `n` as PNG bytes.
pub fn render_sieve(n: usize, primes: &[usize]) -> anyhow::Result<Bytes> {
    render_png(&GridLayout::new(n, primes))
}

/// Rasterize `layout`, cropped to the rows that hold numbers.
pub fn render_png(layout: &GridLayout) -> anyhow::Result<Bytes> {
    let img = rasterize(layout);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .context("encode sieve png")?;
    Ok(Bytes::from(buf.into_inner()))
}

fn rasterize(layout: &GridLayout) -> RgbImage {
    let used_rows = layout.used_rows() as u32;
    if used_rows == 0 {
        return RgbImage::from_pixel(1, 1, BACKGROUND);
    }

    let cell = layout.cell_size();
    let width = layout.cols as u32 * cell + 1;
    let height = used_rows * cell + 1;
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    for c in &layout.cells {
        // Slots count upwards, raster rows count downwards.
        let x0 = c.col as u32 * cell;
        let y0 = (layout.rows - 1 - c.slot) as u32 * cell;
        let fill = if c.prime { PRIME_FILL } else { COMPOSITE_FILL };

        for y in y0..=y0 + cell {
            for x in x0..=x0 + cell {
                let edge = x == x0 || x == x0 + cell || y == y0 || y == y0 + cell;
                img.put_pixel(x, y, if edge { EDGE } else { fill });
            }
        }

        let label = c.number.to_string();
        let (w, h) = glyphs::text_size(&label, LABEL_SCALE);
        let lx = x0 + (cell - w) / 2;
        let ly = y0 + (cell - h) / 2;
        glyphs::draw_text(&label, LABEL_SCALE, |dx, dy| {
            img.put_pixel(lx + dx, ly + dy, INK);
        });
    }

    img
}

fn ceil_sqrt(n: usize) -> usize {
    let mut r = (n as f64).sqrt() as usize;
    while r * r < n {
        r += 1;
    }
    while r > 0 && (r - 1) * (r - 1) >= n {
        r -= 1;
    }
    r
}
