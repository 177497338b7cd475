use image::{DynamicImage, ImageFormat};

/// Virtual canvas bookkeeping, what imagemagick calls the page geometry.
///
/// After a crop the image remembers how large the canvas it was cut from was
/// and where on that canvas it sits. A zero width and height means there is no virtual canvas.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Page {
    pub width: u32,
    pub height: u32,
    pub x: i64,
    pub y: i64,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.width == 0 && self.height == 0 && self.x == 0 && self.y == 0
    }
}

#[derive(Debug, Clone)]
pub struct Image {
    pub format: Option<ImageFormat>,
    pub page: Page,
    pub pixels: DynamicImage,
}

impl Image {
    pub fn new(pixels: DynamicImage) -> Self {
        Self {
            format: None,
            page: Page::default(),
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixels.width(), self.pixels.height())
    }

    /// The virtual canvas size, falling back to the image size when there is none.
    pub fn canvas_size(&self) -> (u32, u32) {
        if self.page.width == 0 || self.page.height == 0 {
            self.dimensions()
        } else {
            (self.page.width, self.page.height)
        }
    }
}

impl From<DynamicImage> for Image {
    fn from(pixels: DynamicImage) -> Self {
        Self::new(pixels)
    }
}
