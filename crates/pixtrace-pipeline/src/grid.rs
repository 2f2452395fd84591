//! Read-only pixel grid access.
//!
//! The tracer probes neighbours one cell outside the image along every
//! border, so lookups take signed coordinates and answer `None` for
//! anything off the grid. `None` never equals a real color, transparent
//! pixels included, which is what makes the image border a boundary.

use image::RgbaImage;

use crate::types::{Color, Dimensions};

/// A random-access grid of RGBA pixels.
pub trait PixelGrid {
    /// Grid width in cells.
    fn width(&self) -> u32;

    /// Grid height in cells.
    fn height(&self) -> u32;

    /// Color at `(x, y)`, or `None` outside `[0, width) x [0, height)`.
    fn get(&self, x: i64, y: i64) -> Option<Color>;

    /// Width and height as [`Dimensions`].
    fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width(),
            height: self.height(),
        }
    }
}

impl PixelGrid for RgbaImage {
    fn width(&self) -> u32 {
        Self::width(self)
    }

    fn height(&self) -> u32 {
        Self::height(self)
    }

    fn get(&self, x: i64, y: i64) -> Option<Color> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        self.get_pixel_checked(x, y).map(|p| Color::from(*p))
    }
}

impl<G: PixelGrid + ?Sized> PixelGrid for &G {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn get(&self, x: i64, y: i64) -> Option<Color> {
        (**self).get(x, y)
    }
}
