//! Canvas 2D surface
//!
//! Draws onto a `CanvasRenderingContext2d`. Sprites whose images are missing
//! or broken get a flat placeholder rectangle.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::Surface;
use crate::assets::Sprite;
use crate::assets::web::ImageSet;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::Rect;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: ImageSet,
}

impl CanvasSurface {
    /// Size the canvas to the logical screen and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, images: ImageSet) -> Result<Self, wasm_bindgen::JsValue> {
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self { ctx, images })
    }

    /// An image is drawable once it decoded with real pixels
    fn usable_image(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        self.images
            .get(&sprite)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }

    fn draw_placeholder(&self, sprite: Sprite, rect: Rect) {
        self.ctx.save();
        self.ctx.set_fill_style_str(sprite.placeholder_color());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.width as f64, rect.height as f64);
        self.ctx.restore();
    }
}

impl Surface for CanvasSurface {
    fn draw_image(&mut self, sprite: Sprite, rect: Rect) {
        let Some(img) = self.usable_image(sprite) else {
            self.draw_placeholder(sprite, rect);
            return;
        };

        let drawn = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
        if drawn.is_err() {
            log::debug!("drawImage failed for {:?}", sprite);
            self.draw_placeholder(sprite, rect);
        }
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}
