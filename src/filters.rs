//! Pure image filters over a [`PixelGrid`].
//!
//! Each filter borrows its input and returns a freshly built grid, so
//! outputs can be chained or fanned out without aliasing. All four
//! reject an empty grid up front.
//!
//! Boundary handling differs between the two convolutions on purpose:
//! `blur` averages only the in-bounds neighbors, while `edges` treats
//! out-of-bounds neighbors as black. The reference output depends on
//! both behaviors, including the darker border `edges` produces.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::ValidationError;
use crate::image::{Pixel, PixelGrid};

/// Sobel horizontal-gradient kernel.
const GX: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
/// Sobel vertical-gradient kernel.
const GY: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// A named filter, dispatched by name from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Grayscale,
    Reflect,
    Blur,
    Edges,
}

impl FilterKind {
    /// Every filter, in the order the `all` sentinel expands to.
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Grayscale,
        FilterKind::Reflect,
        FilterKind::Blur,
        FilterKind::Edges,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Reflect => "reflect",
            FilterKind::Blur => "blur",
            FilterKind::Edges => "edges",
        }
    }

    /// Apply this filter, producing a new grid.
    pub fn apply(self, pixels: &PixelGrid) -> Result<PixelGrid, ValidationError> {
        match self {
            FilterKind::Grayscale => grayscale(pixels),
            FilterKind::Reflect => reflect(pixels),
            FilterKind::Blur => blur(pixels),
            FilterKind::Edges => edges(pixels),
        }
    }
}

impl FromStr for FilterKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grayscale" => Ok(FilterKind::Grayscale),
            "reflect" => Ok(FilterKind::Reflect),
            "blur" => Ok(FilterKind::Blur),
            "edges" => Ok(FilterKind::Edges),
            other => Err(ValidationError::UnknownFilter(other.to_string())),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn ensure_non_empty(pixels: &PixelGrid) -> Result<(), ValidationError> {
    if pixels.is_empty() {
        return Err(ValidationError::EmptyImage);
    }
    Ok(())
}

/// Luminosity grayscale: every channel becomes
/// `trunc(0.299 r + 0.587 g + 0.114 b)`. The conversion truncates, it
/// does not round.
pub fn grayscale(pixels: &PixelGrid) -> Result<PixelGrid, ValidationError> {
    ensure_non_empty(pixels)?;
    let rows = pixels
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|px| {
                    let gray = (0.299 * f64::from(px.r)
                        + 0.587 * f64::from(px.g)
                        + 0.114 * f64::from(px.b)) as u8;
                    Pixel::new(gray, gray, gray)
                })
                .collect()
        })
        .collect();
    debug!("grayscale filter applied");
    PixelGrid::from_rows(rows)
}

/// Horizontal mirror: each row's pixels reversed, row order unchanged.
pub fn reflect(pixels: &PixelGrid) -> Result<PixelGrid, ValidationError> {
    ensure_non_empty(pixels)?;
    let rows = pixels
        .rows()
        .iter()
        .map(|row| row.iter().rev().copied().collect())
        .collect();
    debug!("reflect filter applied");
    PixelGrid::from_rows(rows)
}

/// 3x3 box blur. Out-of-bounds neighbors are excluded from both the sum
/// and the divisor, so corner pixels average 4 samples, edge pixels 6,
/// interior pixels 9.
pub fn blur(pixels: &PixelGrid) -> Result<PixelGrid, ValidationError> {
    ensure_non_empty(pixels)?;
    let mut rows = Vec::with_capacity(pixels.height());
    for y in 0..pixels.height() {
        let mut row = Vec::with_capacity(pixels.width());
        for x in 0..pixels.width() {
            let (mut sum_b, mut sum_g, mut sum_r) = (0u32, 0u32, 0u32);
            let mut count = 0u32;
            for dy in -1..=1isize {
                for dx in -1..=1isize {
                    let Some(px) = pixels.pixel_at(y as isize + dy, x as isize + dx) else {
                        continue;
                    };
                    sum_b += u32::from(px.b);
                    sum_g += u32::from(px.g);
                    sum_r += u32::from(px.r);
                    count += 1;
                }
            }
            row.push(Pixel::new(
                round_div(sum_b, count),
                round_div(sum_g, count),
                round_div(sum_r, count),
            ));
        }
        rows.push(row);
    }
    debug!("blur filter applied");
    PixelGrid::from_rows(rows)
}

fn round_div(sum: u32, count: u32) -> u8 {
    (f64::from(sum) / f64::from(count)).round() as u8
}

/// Sobel edge detection, applied independently per channel.
///
/// Out-of-bounds neighbors contribute zero to the weighted sums — the
/// border responds as if the image were ringed with black, and the sums
/// are not renormalized the way `blur`'s average is. Per channel the
/// result is `round(sqrt(gx^2 + gy^2))` capped at 255.
pub fn edges(pixels: &PixelGrid) -> Result<PixelGrid, ValidationError> {
    ensure_non_empty(pixels)?;
    let mut rows = Vec::with_capacity(pixels.height());
    for y in 0..pixels.height() {
        let mut row = Vec::with_capacity(pixels.width());
        for x in 0..pixels.width() {
            // per-channel weighted sums, indexed b, g, r
            let mut gx = [0i32; 3];
            let mut gy = [0i32; 3];
            for dy in -1..=1isize {
                for dx in -1..=1isize {
                    let Some(px) = pixels.pixel_at(y as isize + dy, x as isize + dx) else {
                        continue;
                    };
                    let wx = GX[(dy + 1) as usize][(dx + 1) as usize];
                    let wy = GY[(dy + 1) as usize][(dx + 1) as usize];
                    for (c, value) in [px.b, px.g, px.r].into_iter().enumerate() {
                        gx[c] += wx * i32::from(value);
                        gy[c] += wy * i32::from(value);
                    }
                }
            }
            let magnitude = |c: usize| -> u8 {
                let mag = f64::from(gx[c].pow(2) + gy[c].pow(2)).sqrt().round();
                mag.min(255.0) as u8
            };
            row.push(Pixel::new(magnitude(0), magnitude(1), magnitude(2)));
        }
        rows.push(row);
    }
    debug!("edges filter applied");
    PixelGrid::from_rows(rows)
}
