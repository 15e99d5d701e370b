use anyhow::Context;
use image::imageops::{self, FilterType};

/// Characters per output line.
pub const TARGET_WIDTH: u32 = 100;
/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f64 = 0.55;
/// Darkest first.
pub const RAMP: &[u8; 10] = b"@%#*+=-:. ";
const BUCKET: u8 = 32;

/// Number of output lines for an image of `width` x `height` pixels.
pub fn target_height(width: u32, height: u32) -> u32 {
    let h = (height as f64 / width as f64) * TARGET_WIDTH as f64 * CELL_ASPECT;
    (h.round() as u32).max(1)
}

pub fn glyph_for(luma: u8) -> char {
    RAMP[(luma / BUCKET) as usize] as char
}

/// Decode an encoded image and render it as ASCII art.
pub fn image_to_ascii(encoded: &[u8]) -> anyhow::Result<String> {
    let img = image::load_from_memory(encoded).context("decode image for ascii conversion")?;
    let gray = img.to_luma8();
    let (width, height) = gray.dimensions();
    anyhow::ensure!(width > 0 && height > 0, "image has no pixels");

    let new_height = target_height(width, height);
    let small = imageops::resize(&gray, TARGET_WIDTH, new_height, FilterType::CatmullRom);

    let mut out = String::with_capacity(((TARGET_WIDTH + 1) * new_height) as usize);
    for y in 0..new_height {
        for x in 0..TARGET_WIDTH {
            out.push(glyph_for(small.get_pixel(x, y)[0]));
        }
        out.push('\n');
    }
    Ok(out.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::{primes_up_to, render_sieve};
    use image::{GrayImage, ImageFormat, Luma};
    use std::io::Cursor;

    fn encode(img: &GrayImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn ramp_buckets_by_32() {
        assert_eq!(glyph_for(0), '@');
        assert_eq!(glyph_for(31), '@');
        assert_eq!(glyph_for(32), '%');
        assert_eq!(glyph_for(128), '+');
        assert_eq!(glyph_for(224), ':');
        assert_eq!(glyph_for(255), ':');
    }

    #[test]
    fn height_follows_aspect_ratio() {
        assert_eq!(target_height(200, 200), 55);
        assert_eq!(target_height(100, 200), 110);
        assert_eq!(target_height(1000, 1), 1);
    }

    #[test]
    fn black_image_fills_every_cell() {
        let img = GrayImage::from_pixel(40, 40, Luma([0]));
        let ascii = image_to_ascii(&encode(&img)).unwrap();
        let lines: Vec<&str> = ascii.lines().collect();
        assert_eq!(lines.len(), 55);
        assert!(lines.iter().all(|l| *l == "@".repeat(100)));
    }

    #[test]
    fn white_never_reaches_the_blank_end_of_the_ramp() {
        let img = GrayImage::from_pixel(10, 20, Luma([255]));
        let ascii = image_to_ascii(&encode(&img)).unwrap();
        assert_eq!(ascii.lines().count(), 110);
        assert!(ascii.chars().all(|c| c == ':' || c == '\n'));
    }

    #[test]
    fn sieve_conversion_is_deterministic_and_bounded() {
        let png = render_sieve(30, &primes_up_to(30)).unwrap();
        let first = image_to_ascii(&png).unwrap();
        let second = image_to_ascii(&png).unwrap();
        assert_eq!(first, second);

        let decoded = image::load_from_memory(&png).unwrap();
        let expected = target_height(decoded.width(), decoded.height()) as usize;
        let lines: Vec<&str> = first.lines().collect();
        assert!(!lines.is_empty() && lines.len() <= expected);
        assert!(lines.iter().all(|l| l.chars().count() <= TARGET_WIDTH as usize));
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(image_to_ascii(b"not an image").is_err());
    }
}
