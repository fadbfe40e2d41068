//! 2D canvas renderer
//!
//! Draws the sprite list in arena units; the context transform set by
//! [`CanvasRenderer::apply_layout`] maps them onto the backing store.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::Sprite;
use super::viewport::CanvasLayout;
use crate::platform::{Asset, Renderer};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: [HtmlImageElement; 3],
    arena: (f64, f64),
}

impl CanvasRenderer {
    /// Returns None when the browser refuses a 2D context
    pub fn new(
        canvas: HtmlCanvasElement,
        images: [HtmlImageElement; 3],
        arena: (f32, f32),
    ) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            images,
            arena: (f64::from(arena.0), f64::from(arena.1)),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Resize the canvas and reset the arena → pixel transform
    pub fn apply_layout(&self, layout: &CanvasLayout) {
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", layout.css_width));
        let _ = style.set_property("height", &format!("{}px", layout.css_height));
        self.canvas.set_width(layout.pixel_width);
        self.canvas.set_height(layout.pixel_height);
        let _ = self
            .ctx
            .set_transform(layout.scale_x, 0.0, 0.0, layout.scale_y, 0.0, 0.0);
    }

    fn image(&self, asset: Asset) -> &HtmlImageElement {
        match asset {
            Asset::Player => &self.images[0],
            Asset::Collectible => &self.images[1],
            Asset::Hazard => &self.images[2],
        }
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, sprites: &[Sprite]) {
        self.ctx.clear_rect(0.0, 0.0, self.arena.0, self.arena.1);
        for sprite in sprites {
            let result = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                self.image(sprite.asset),
                f64::from(sprite.pos.x),
                f64::from(sprite.pos.y),
                f64::from(sprite.size.x),
                f64::from(sprite.size.y),
            );
            if let Err(e) = result {
                log::warn!("Draw failed for {:?}: {:?}", sprite.asset, e);
            }
        }
    }
}
