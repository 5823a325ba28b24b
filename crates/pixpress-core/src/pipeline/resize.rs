//! Fit-resize: scale down into a bounding box, preserving aspect ratio.

use image::imageops::FilterType;
use image::DynamicImage;

/// Bounding box for output images. A zero side is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FitBox {
    pub max_width: u32,
    pub max_height: u32,
}

impl FitBox {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Whether an image of `width` x `height` overflows the box.
    pub fn needs_resize(&self, width: u32, height: u32) -> bool {
        (self.max_width > 0 && width > self.max_width)
            || (self.max_height > 0 && height > self.max_height)
    }

    /// Target dimensions for an image of `width` x `height`.
    ///
    /// Returns `None` when the image already fits. Otherwise the largest
    /// size inside the box with the same aspect ratio, never below 1px.
    pub fn fit(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        if width == 0 || height == 0 || !self.needs_resize(width, height) {
            return None;
        }

        let mut scale = f64::INFINITY;
        if self.max_width > 0 {
            scale = scale.min(self.max_width as f64 / width as f64);
        }
        if self.max_height > 0 {
            scale = scale.min(self.max_height as f64 / height as f64);
        }

        let new_width = ((width as f64 * scale).round() as u32).max(1);
        let new_height = ((height as f64 * scale).round() as u32).max(1);
        Some((
            self.clamp_side(new_width, self.max_width),
            self.clamp_side(new_height, self.max_height),
        ))
    }

    fn clamp_side(&self, value: u32, max: u32) -> u32 {
        if max > 0 {
            value.min(max)
        } else {
            value
        }
    }

    /// Apply the fit policy with a Lanczos3 filter.
    ///
    /// Images that already fit are returned untouched.
    pub fn apply(&self, image: DynamicImage) -> DynamicImage {
        match self.fit(image.width(), image.height()) {
            Some((w, h)) => {
                tracing::trace!(
                    "  Resize {}x{} -> {}x{}",
                    image.width(),
                    image.height(),
                    w,
                    h
                );
                image.resize_exact(w, h, FilterType::Lanczos3)
            }
            None => image,
        }
    }
}
