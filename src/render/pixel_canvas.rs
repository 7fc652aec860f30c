//=========================================================================
// Pixel Canvas
//
// Software `Canvas` backed by a `0x00RRGGBB` framebuffer, the layout
// expected by the presentation surface.
//
// Blending is source-over per channel:
//   out = src * alpha + dst * (1 - alpha)
//
// Circles are anti-aliased by pixel-center distance. Glow is a Gaussian
// halo (sigma = blur / 2) painted in the shadow color before the body,
// reaching `blur` pixels past the circle edge.
//
//=========================================================================

//=== Internal Imports ====================================================
use super::{Canvas, Rgb, Rgba};

//=== Shadow ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct Shadow {
    blur: f32,
    color: Rgb,
}

//=== PixelCanvas =========================================================

/// CPU framebuffer implementing [`Canvas`].
///
/// The buffer is only cleared on construction and [`PixelCanvas::resize`];
/// frames accumulate on top of each other.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    fill: Rgba,
    shadow: Option<Shadow>,
}

impl PixelCanvas {
    //--- Construction -----------------------------------------------------

    /// Creates a black canvas with opaque white fill and no glow.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK.to_u32(); width as usize * height as usize],
            fill: Rgba::opaque(Rgb::WHITE),
            shadow: None,
        }
    }

    /// Reallocates the framebuffer and clears it to black.
    ///
    /// Drawing state (fill style, shadow) is kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, Rgb::BLACK.to_u32());
    }

    //--- Access -----------------------------------------------------------

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Reads a single pixel, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Rgb::from_u32(self.pixels[self.index(x, y)]))
    }

    /// Copies the framebuffer into a presentation buffer.
    ///
    /// Copies as many pixels as both buffers hold; a mismatch means the
    /// surface and canvas disagree on size for one frame, which is harmless.
    pub fn copy_to(&self, target: &mut [u32]) {
        let n = target.len().min(self.pixels.len());
        target[..n].copy_from_slice(&self.pixels[..n]);
    }

    //--- Internal Helpers -------------------------------------------------

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Clipped, half-open pixel span covering `[lo, hi)` on an axis of `len`.
    fn span(lo: f32, hi: f32, len: u32) -> (u32, u32) {
        // Float-to-int casts saturate, so negatives and NaN become 0.
        let start = lo.max(0.0) as u32;
        let start = start.min(len);
        let end = (hi.min(len as f32) as u32).clamp(start, len);
        (start, end)
    }

    /// Blends `color` into every pixel within `reach` of the center,
    /// with per-pixel opacity given by `alpha_at(distance)`.
    fn paint_disc(
        &mut self,
        cx: f32,
        cy: f32,
        reach: f32,
        color: Rgb,
        alpha_at: impl Fn(f32) -> f32,
    ) {
        let (x0, x1) = Self::span((cx - reach).floor(), (cx + reach).ceil(), self.width);
        let (y0, y1) = Self::span((cy - reach).floor(), (cy + reach).ceil(), self.height);

        for y in y0..y1 {
            let dy = y as f32 + 0.5 - cy;
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                let alpha = alpha_at((dx * dx + dy * dy).sqrt());
                let index = self.index(x, y);
                blend(&mut self.pixels[index], color, alpha);
            }
        }
    }
}

//--- Canvas Implementation -----------------------------------------------

impl Canvas for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_fill_style(&mut self, style: Rgba) {
        self.fill = style;
    }

    fn set_shadow(&mut self, blur: f32, color: Rgb) {
        self.shadow = (blur > 0.0).then_some(Shadow { blur, color });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (left, right) = if width < 0.0 { (x + width, x) } else { (x, x + width) };
        let (top, bottom) = if height < 0.0 { (y + height, y) } else { (y, y + height) };

        let (x0, x1) = Self::span(left.round(), right.round(), self.width);
        let (y0, y1) = Self::span(top.round(), bottom.round(), self.height);

        let Rgba { rgb, alpha } = self.fill;
        for y in y0..y1 {
            let row = self.index(0, y);
            for pixel in &mut self.pixels[row + x0 as usize..row + x1 as usize] {
                blend(pixel, rgb, alpha);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        if radius.is_nan() || radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }

        let Rgba { rgb, alpha } = self.fill;

        if let Some(Shadow { blur, color }) = self.shadow {
            let sigma = blur / 2.0;
            self.paint_disc(cx, cy, radius + blur, color, |d| {
                if d <= radius || d > radius + blur {
                    return 0.0;
                }
                let t = d - radius;
                alpha * (-(t * t) / (2.0 * sigma * sigma)).exp()
            });
        }

        self.paint_disc(cx, cy, radius + 0.5, rgb, |d| {
            alpha * (radius + 0.5 - d).clamp(0.0, 1.0)
        });
    }
}

//=== Blending ============================================================

fn blend(pixel: &mut u32, src: Rgb, alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    if alpha >= 1.0 {
        *pixel = src.to_u32();
        return;
    }

    let dst = Rgb::from_u32(*pixel);
    let mix = |s: u8, d: u8| (s as f32 * alpha + d as f32 * (1.0 - alpha)).round() as u8;
    *pixel = Rgb::new(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b)).to_u32();
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn white_canvas(width: u32, height: u32) -> PixelCanvas {
        let mut canvas = PixelCanvas::new(width, height);
        canvas.set_fill_style(Rgba::opaque(Rgb::WHITE));
        canvas.fill_rect(0.0, 0.0, width as f32, height as f32);
        canvas
    }

    #[test]
    fn new_canvas_is_black() {
        let canvas = PixelCanvas::new(4, 3);
        assert_eq!(canvas.size(), (4, 3));
        assert_eq!(canvas.pixels().len(), 12);
        assert!(canvas.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn opaque_rect_overwrites() {
        let canvas = white_canvas(4, 4);
        assert!(canvas.pixels().iter().all(|&p| p == Rgb::WHITE.to_u32()));
    }

    #[test]
    fn translucent_rect_blends_source_over() {
        let mut canvas = white_canvas(2, 2);
        canvas.set_fill_style(Rgb::new(5, 5, 5).with_alpha(0.2));
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0);

        // 5 * 0.2 + 255 * 0.8 = 205
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::new(205, 205, 205)));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.set_fill_style(Rgba::opaque(Rgb::WHITE));
        canvas.fill_rect(-10.0, 2.0, 100.0, 100.0);

        assert_eq!(canvas.pixel(0, 1), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(0, 2), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(3, 3), Some(Rgb::WHITE));
    }

    #[test]
    fn fill_rect_accepts_negative_extent() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.set_fill_style(Rgba::opaque(Rgb::WHITE));
        canvas.fill_rect(2.0, 2.0, -2.0, -2.0);

        assert_eq!(canvas.pixel(0, 0), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(1, 1), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(2, 2), Some(Rgb::BLACK));
    }

    #[test]
    fn circle_lights_its_center() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.set_fill_style(Rgba::opaque(Rgb::WHITE));
        canvas.fill_circle(5.0, 5.0, 2.0);

        assert_eq!(canvas.pixel(5, 5), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn zero_radius_circle_draws_nothing() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.fill_circle(5.0, 5.0, 0.0);
        canvas.fill_circle(5.0, 5.0, -1.0);
        canvas.fill_circle(5.0, 5.0, f32::NAN);

        assert!(canvas.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn circle_partially_offscreen_does_not_panic() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.set_shadow(10.0, Rgb::WHITE);
        canvas.fill_circle(-1.0, 9.5, 3.0);
        canvas.fill_circle(1e9, -1e9, 3.0);
        assert_eq!(canvas.pixel(0, 9), Some(Rgb::WHITE));
    }

    #[test]
    fn glow_lights_pixels_beyond_the_edge() {
        let mut plain = PixelCanvas::new(30, 30);
        plain.fill_circle(15.0, 15.0, 2.0);

        let mut glowing = PixelCanvas::new(30, 30);
        glowing.set_shadow(10.0, Rgb::WHITE);
        glowing.fill_circle(15.0, 15.0, 2.0);

        // 5 px from the center, well outside the body
        assert_eq!(plain.pixel(20, 15), Some(Rgb::BLACK));
        assert_ne!(glowing.pixel(20, 15), Some(Rgb::BLACK));
    }

    #[test]
    fn clear_shadow_disables_glow() {
        let mut canvas = PixelCanvas::new(30, 30);
        canvas.set_shadow(10.0, Rgb::WHITE);
        canvas.clear_shadow();
        canvas.fill_circle(15.0, 15.0, 2.0);

        assert_eq!(canvas.pixel(20, 15), Some(Rgb::BLACK));
    }

    #[test]
    fn resize_clears_and_reallocates() {
        let mut canvas = white_canvas(4, 4);
        canvas.resize(2, 3);

        assert_eq!(canvas.size(), (2, 3));
        assert_eq!(canvas.pixels().len(), 6);
        assert!(canvas.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn pixel_outside_is_none() {
        let canvas = PixelCanvas::new(2, 2);
        assert_eq!(canvas.pixel(2, 0), None);
        assert_eq!(canvas.pixel(0, 2), None);
    }

    #[test]
    fn copy_to_handles_mismatched_lengths() {
        let canvas = white_canvas(2, 2);

        let mut short = [0u32; 2];
        canvas.copy_to(&mut short);
        assert_eq!(short, [Rgb::WHITE.to_u32(); 2]);

        let mut long = [7u32; 6];
        canvas.copy_to(&mut long);
        assert_eq!(&long[..4], &[Rgb::WHITE.to_u32(); 4]);
        assert_eq!(&long[4..], &[7, 7]);
    }
}
