//! CPU framebuffer: row-major RGBA pixels, top-left origin.
use bytemuck::{Pod, Zeroable};

/// Plain RGBA colour, 8 bits per channel.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const MAP_LINES: Color = Color::new(87, 87, 87, 120);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Multiplies the colour channels by `k` (alpha untouched).
    #[inline]
    pub fn scale(self, k: f32) -> Color {
        let s = k.max(0.0);
        let mul = |v: u8| -> u8 { (v as f32 * s).min(255.0) as u8 };
        Color::new(mul(self.r), mul(self.g), mul(self.b), self.a)
    }

    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let f = |x: u8, y: u8| -> u8 { ((x as f32) * (1.0 - t) + (y as f32) * t) as u8 };
        Color::rgb(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub current_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
            current_color: Color::WHITE,
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32) {
        let c = self.current_color;
        self.set_pixel_color(x, y, c);
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    /// Source-over blend of `color` onto the pixel using its alpha.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) as usize;
        let dst = self.color_buffer[idx];
        let a = color.a as u16;
        let mix = |s: u8, d: u8| -> u8 { ((s as u16 * a + d as u16 * (255 - a)) / 255) as u8 };
        self.color_buffer[idx] = Color::new(mix(color.r, dst.r), mix(color.g, dst.g), mix(color.b, dst.b), 255);
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline] pub fn set_current_color(&mut self, c: Color) { self.current_color = c; }

    /// Fills rows `[y0, y1)` of columns `[x0, x1)` with the current colour, clipped.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) {
        let (x1, y1) = (x1.min(self.width), y1.min(self.height));
        let c = self.current_color;
        for y in y0..y1 {
            let row = (y * self.width) as usize;
            self.color_buffer[row + x0.min(x1) as usize..row + x1 as usize].fill(c);
        }
    }

    /// One-pixel outline of the rectangle `[x0, x1) × [y0, y1)`, alpha-blended.
    pub fn outline_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Color) {
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        for x in x0..x1 {
            self.blend_pixel(x, y0, color);
            self.blend_pixel(x, y1 - 1, color);
        }
        for y in y0 + 1..y1 - 1 {
            self.blend_pixel(x0, y, color);
            self.blend_pixel(x1 - 1, y, color);
        }
    }

    /// Bresenham line with the current colour, clipped per pixel.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if x >= 0 && y >= 0 {
                self.set_pixel(x as u32, y as u32);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Pixels as RGBA8 bytes, ready for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clip() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_pixel_color(3, 2, Color::RED);
        fb.set_pixel_color(4, 0, Color::RED);
        assert_eq!(fb.get_pixel(3, 2), Color::RED);
        assert_eq!(fb.color_buffer.iter().filter(|&&c| c == Color::RED).count(), 1);
        assert_eq!(fb.get_pixel(10, 10), fb.background_color);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_current_color(Color::BLUE);
        fb.fill_rect(2, 1, 10, 3);
        assert_eq!(fb.get_pixel(2, 1), Color::BLUE);
        assert_eq!(fb.get_pixel(3, 2), Color::BLUE);
        assert_eq!(fb.get_pixel(1, 1), Color::BLACK);
        assert_eq!(fb.get_pixel(2, 3), Color::BLACK);
    }

    #[test]
    fn test_blend_half_alpha() {
        let mut fb = Framebuffer::new(1, 1);
        fb.set_pixel_color(0, 0, Color::WHITE);
        fb.blend_pixel(0, 0, Color::new(0, 0, 0, 128));
        let c = fb.get_pixel(0, 0);
        assert!(c.r > 120 && c.r < 135, "{c:?}");
        assert_eq!(c.a, 255);
    }

    #[test]
    fn test_line_endpoints() {
        let mut fb = Framebuffer::new(8, 8);
        fb.set_current_color(Color::YELLOW);
        fb.draw_line(1, 1, 6, 4);
        assert_eq!(fb.get_pixel(1, 1), Color::YELLOW);
        assert_eq!(fb.get_pixel(6, 4), Color::YELLOW);
    }

    #[test]
    fn test_bytes_layout() {
        let mut fb = Framebuffer::new(2, 1);
        fb.set_pixel_color(1, 0, Color::new(1, 2, 3, 4));
        assert_eq!(fb.as_bytes(), &[0, 0, 0, 255, 1, 2, 3, 4]);
    }
}
