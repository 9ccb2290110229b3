//! raylib host: textures as images, a render texture as the drawing surface.

pub mod texture_loader;

use raylib::prelude::*;
use tracing::warn;

use crate::geometry::Rect;
use crate::image::{Image, ImageId};
use crate::surface::Surface;

/// GPU textures addressed by the `ImageId`s handed to the gallery.
#[derive(Default)]
pub struct TextureStore {
    textures: Vec<Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, texture: Texture2D) -> ImageId {
        self.textures.push(texture);
        ImageId(self.textures.len() - 1)
    }

    pub fn get(&self, id: ImageId) -> Option<&Texture2D> {
        self.textures.get(id.0)
    }
}

/// Surface over any raylib draw target, typically the texture mode of the
/// wall's render texture so earlier draws persist between frames.
pub struct Painter<'a, D: RaylibDraw> {
    draw: &'a mut D,
    textures: &'a TextureStore,
}

impl<'a, D: RaylibDraw> Painter<'a, D> {
    pub fn new(draw: &'a mut D, textures: &'a TextureStore) -> Self {
        Self { draw, textures }
    }
}

fn rectangle(rect: Rect) -> Rectangle {
    Rectangle::new(rect.x as f32, rect.y as f32, rect.width as f32, rect.height as f32)
}

impl<D: RaylibDraw> Surface for Painter<'_, D> {
    fn draw_image(&mut self, image: &Image, source: Rect, destination: Rect, alpha: f32) {
        if source.width == 0 || destination.width == 0 {
            return;
        }
        let Some(texture) = self.textures.get(image.id()) else {
            warn!("no texture for {:?}", image.id());
            return;
        };

        self.draw.draw_texture_pro(
            texture,
            rectangle(source),
            rectangle(destination),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE.fade(alpha),
        );
    }
}
