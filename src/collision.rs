/// Pixel-exact collision.
///
/// Every sprite carries a `Mask` of its opaque pixels.  Two bodies collide
/// when their masks share a set pixel at their relative offset.

use crate::assets::Image;
use crate::capabilities::Body;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    /// Row-major bitset, 64 pixels per word.
    bits: Vec<u64>,
}

impl Mask {
    pub fn new(width: u32, height: u32) -> Mask {
        let len = (width as usize * height as usize).div_ceil(64);
        Mask {
            width: width as i32,
            height: height as i32,
            bits: vec![0; len],
        }
    }

    pub fn from_image(image: &Image) -> Mask {
        let mut mask = Mask::new(image.width(), image.height());
        for y in 0..mask.height {
            for x in 0..mask.width {
                if image.pixel(x, y).is_some() {
                    mask.set(x, y);
                }
            }
        }
        mask
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn set(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.bits[i / 64] |= 1 << (i % 64);
        }
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) => self.bits[i / 64] & (1 << (i % 64)) != 0,
            None => false,
        }
    }

    /// Number of set pixels.
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// True if `other`, placed at `offset` relative to this mask's origin,
    /// shares at least one set pixel with it.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + other.width).min(self.width);
        let y1 = (dy + other.height).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - dx, y - dy) {
                    return true;
                }
            }
        }
        false
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }
}

/// Pixel overlap between two positioned bodies.  Symmetric in its arguments.
pub fn collide(a: &Body, b: &Body) -> bool {
    let offset = (b.x - a.x, b.y - a.y);
    a.sprite.mask.overlap(&b.sprite.mask, offset)
}
