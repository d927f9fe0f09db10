use std::path::Path;

use rayon::prelude::*;

use crate::{material::Color, math::Vector3};

/// A rendered image: one linear RGB color per pixel, each component in `[0, 1]`.
///
/// Pixels are stored column by column, so a column is a contiguous slice that
/// a single render task can own. Row 0 is the bottom of the picture.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Vector3>,
}

impl Image {
    /// A black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vector3::zero(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        x as usize * self.height as usize + y as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Vector3 {
        self.pixels[self.index(x, y)]
    }

    /// Store a pixel, clamping every component into `[0, 1]`.
    pub fn set(&mut self, x: u32, y: u32, color: Vector3) {
        let i = self.index(x, y);
        self.pixels[i] = color.clamp(0., 1.);
    }

    /// Parallel mutable access to every column, left to right. Each slice
    /// holds one column from bottom to top; no two tasks share a pixel.
    ///
    /// Values written through these slices are stored as is, so writers must
    /// clamp them the way [`Image::set`] does.
    pub fn par_columns_mut(&mut self) -> rayon::slice::ChunksMut<'_, Vector3> {
        self.pixels.par_chunks_mut(self.height.max(1) as usize)
    }

    /// Quantize to 8-bit RGB, top row first.
    pub fn to_rgb(&self) -> image::RgbImage {
        let mut imgbuf: image::RgbImage = image::ImageBuffer::new(self.width, self.height);

        for x in 0..self.width {
            for y in 0..self.height {
                let color: Color = self.get(x, y).into();
                imgbuf.put_pixel(x, self.height - 1 - y, color.into());
            }
        }

        imgbuf
    }

    /// Save the image; the format is picked from the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.to_rgb().save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clamps() {
        let mut img = Image::new(2, 3);
        img.set(1, 2, Vector3::new(2., -1., 0.5));
        assert_eq!(img.get(1, 2), Vector3::new(1., 0., 0.5));
        assert_eq!(img.get(0, 0), Vector3::zero());
    }

    #[test]
    fn columns_are_contiguous() {
        let mut img = Image::new(3, 2);
        img.par_columns_mut().enumerate().for_each(|(x, column)| {
            assert_eq!(column.len(), 2);
            column[1] = Vector3::splat(x as f64 / 2.);
        });
        assert_eq!(img.get(2, 1), Vector3::splat(1.));
        assert_eq!(img.get(2, 0), Vector3::zero());
    }

    #[test]
    fn export_flips_rows() {
        let mut img = Image::new(1, 2);
        img.set(0, 0, Vector3::new(1., 0., 0.));
        let rgb = img.to_rgb();
        assert_eq!(rgb.get_pixel(0, 1).0, [255, 0, 0]);
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
