//! Resolution-dependent sampling of a source image onto an output grid
//!
//! Three regimes, chosen by comparing source and output sizes:
//! - equal sizes return the source pixel unchanged
//! - upscaling on both axes blends four neighbours with Lanczos-2 weights
//! - anything else averages a Gaussian-weighted window of source pixels
//!
//! Reads outside the source are clamped to the nearest edge pixel.

use image::{Rgba, RgbaImage};
use ndarray::Array2;

use crate::io::configuration::{
    GAUSSIAN_BASE_DEVIATION, GAUSSIAN_RATIO_DIVISOR, LANCZOS_FILTER_SIZE,
};
use crate::io::error::{Result, TileMapError};
use crate::math::kernels::{gaussian, lanczos_blend};
use crate::spatial::grid::GridDimensions;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// How output cells pick their source color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SamplingMode {
    /// Lanczos upscaling and Gaussian area averaging
    #[default]
    Interpolated,
    /// Nearest source pixel at the cell's top-left corner
    Point,
}

fn channel(pixel: Rgba<u8>, index: usize) -> f32 {
    pixel.0.get(index).copied().map_or(0.0, f32::from)
}

fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// RGBA source image stored as `[row, col]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pixels: Array2<Rgba<u8>>,
}

impl SourceImage {
    /// Create a source image from row-major pixels
    ///
    /// # Errors
    ///
    /// Returns an error if either side is zero or the pixel count does not
    /// match the dimensions
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba<u8>>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TileMapError::InvalidSourceData {
                reason: format!("source image {width}x{height} has no pixels"),
            });
        }
        let pixels = Array2::from_shape_vec((height, width), pixels)
            .map_err(|e| TileMapError::InvalidSourceData {
                reason: format!("pixel data does not match {width}x{height}: {e}"),
            })?;
        Ok(Self { pixels })
    }

    /// Create a source image filled with one color
    ///
    /// # Errors
    ///
    /// Returns an error if either side is zero
    pub fn filled(width: usize, height: usize, color: Rgba<u8>) -> Result<Self> {
        Self::new(width, height, vec![color; width * height])
    }

    /// Copy pixels out of a decoded image
    ///
    /// # Errors
    ///
    /// Returns an error if the image is empty
    pub fn from_rgba_image(image: &RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::new(
            width as usize,
            height as usize,
            image.pixels().copied().collect(),
        )
    }

    /// Source width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Source height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Pixel at `(x, y)`, clamped to the image bounds
    pub fn pixel(&self, x: usize, y: usize) -> Rgba<u8> {
        let x = x.min(self.width().saturating_sub(1));
        let y = y.min(self.height().saturating_sub(1));
        self.pixels.get([y, x]).copied().unwrap_or(TRANSPARENT)
    }

    fn ratios(&self, out: GridDimensions) -> (f32, f32) {
        (
            self.width() as f32 / out.width() as f32,
            self.height() as f32 / out.height() as f32,
        )
    }

    /// Sample with the given mode
    pub fn sample_with(
        &self,
        mode: SamplingMode,
        x: usize,
        y: usize,
        out: GridDimensions,
    ) -> Rgba<u8> {
        match mode {
            SamplingMode::Interpolated => self.sample(x, y, out),
            SamplingMode::Point => self.point_sample(x, y, out),
        }
    }

    /// Nearest source pixel for output cell `(x, y)`
    pub fn point_sample(&self, x: usize, y: usize, out: GridDimensions) -> Rgba<u8> {
        let (x_ratio, y_ratio) = self.ratios(out);
        let source_x = (x as f32 * x_ratio).floor() as usize;
        let source_y = (y as f32 * y_ratio).floor() as usize;
        self.pixel(source_x, source_y)
    }

    /// Representative color for output cell `(x, y)`
    pub fn sample(&self, x: usize, y: usize, out: GridDimensions) -> Rgba<u8> {
        let same_width = self.width() == out.width();
        let same_height = self.height() == out.height();

        if same_width && same_height {
            self.pixel(x, y)
        } else if self.width() < out.width() && self.height() < out.height() {
            self.upscale_sample(x, y, out)
        } else {
            self.area_sample(x, y, out)
        }
    }

    fn upscale_sample(&self, x: usize, y: usize, out: GridDimensions) -> Rgba<u8> {
        let (x_ratio, y_ratio) = self.ratios(out);

        let scaled_x = x as f32 * x_ratio;
        let scaled_y = y as f32 * y_ratio;
        let floor_x = scaled_x.floor();
        let floor_y = scaled_y.floor();
        let u = scaled_x - floor_x;
        let v = scaled_y - floor_y;

        let x0 = floor_x as usize;
        let y0 = floor_y as usize;
        let top_left = self.pixel(x0, y0);
        let top_right = self.pixel(x0 + 1, y0);
        let bottom_left = self.pixel(x0, y0 + 1);
        let bottom_right = self.pixel(x0 + 1, y0 + 1);

        Rgba(std::array::from_fn(|c| {
            let corners = [top_left, top_right, bottom_left, bottom_right].map(|p| channel(p, c));
            to_channel(lanczos_blend(u, v, LANCZOS_FILTER_SIZE, corners))
        }))
    }

    fn area_sample(&self, x: usize, y: usize, out: GridDimensions) -> Rgba<u8> {
        let (x_ratio, y_ratio) = self.ratios(out);

        let full_x = (x as f32 * x_ratio).floor() as usize;
        let full_y = (y as f32 * y_ratio).floor() as usize;
        let sample_width = x_ratio.ceil().max(1.0) as usize;
        let sample_height = y_ratio.ceil().max(1.0) as usize;

        let average_ratio = (x_ratio + y_ratio) / 2.0;
        let deviation = GAUSSIAN_BASE_DEVIATION + (average_ratio / GAUSSIAN_RATIO_DIVISOR - 1.0);

        let center_x = sample_width as f32 / 2.0;
        let center_y = sample_height as f32 / 2.0;

        let mut totals = [0.0f32; 4];
        let mut weight_sum = 0.0f32;

        for xs in 0..sample_width {
            for ys in 0..sample_height {
                let pixel = self.pixel(full_x + xs, full_y + ys);
                let weight = gaussian(xs as f32 - center_x, ys as f32 - center_y, deviation);

                for (c, total) in totals.iter_mut().enumerate() {
                    *total += channel(pixel, c) * weight;
                }
                weight_sum += weight;
            }
        }

        if weight_sum <= 0.0 {
            return self.pixel(full_x, full_y);
        }

        Rgba(totals.map(|total| to_channel(total / weight_sum)))
    }
}
