//! Software lighting backend
//!
//! Rasterizes the CPU lighting path into an RGBA8888 pixel buffer and
//! presents it through an SDL streaming texture. Carries no GPU state at all,
//! so it works wherever SDL can create a plain 2D renderer.

use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};

use crate::display::PixelBuffer;
use crate::lighting::Light;
use crate::map::Map;
use crate::player::Player;
use crate::render::scene::{self, QuadSink, CLEAR_COLOR};

#[inline]
fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0) as u8
}

/// Quad sink that scanline-fills into the pixel buffer
struct BufferSink<'a> {
    buffer: &'a mut PixelBuffer,
}

impl QuadSink for BufferSink<'_> {
    fn quad(&mut self, corners: [(f32, f32); 4], color: [f32; 3]) {
        self.buffer.fill_quad(
            &corners,
            to_byte(color[0]),
            to_byte(color[1]),
            to_byte(color[2]),
        );
    }
}

pub struct SoftwareBackend {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    texture: Option<Texture>,
    buffer: PixelBuffer,
}

impl SoftwareBackend {
    pub fn new(window: Window, vsync: bool) -> Result<Self, String> {
        let mut builder = window.into_canvas().accelerated();
        if vsync {
            builder = builder.present_vsync();
        }
        let canvas = builder.build().map_err(|e| e.to_string())?;
        let texture_creator = canvas.texture_creator();
        let (width, height) = canvas.output_size()?;

        Ok(Self {
            canvas,
            texture_creator,
            texture: None,
            buffer: PixelBuffer::new(width.max(1), height.max(1)),
        })
    }

    /// Match the pixel buffer and streaming texture to the current output
    /// size, recreating the texture when the window was resized
    fn ensure_surfaces(&mut self, width: u32, height: u32) -> Result<(), String> {
        let resized = width != self.buffer.width() || height != self.buffer.height();
        self.buffer.resize(width, height);

        if resized || self.texture.is_none() {
            if let Some(old) = self.texture.take() {
                // Safety: the canvas that created this texture is still alive
                unsafe { old.destroy() };
            }
            let texture = self
                .texture_creator
                .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
                .map_err(|e| e.to_string())?;
            self.texture = Some(texture);
        }
        Ok(())
    }

    pub fn render(
        &mut self,
        map: &Map,
        player: &Player,
        player_light: &Light,
        lamp_light: &Light,
        ambient: f32,
        tint: [f32; 3],
    ) -> Result<(), String> {
        let (width, height) = self.canvas.output_size()?;
        if width == 0 || height == 0 {
            // Minimized window; nothing to rasterize this frame
            return Ok(());
        }
        self.ensure_surfaces(width, height)?;

        self.buffer.clear(
            to_byte(CLEAR_COLOR[0]),
            to_byte(CLEAR_COLOR[1]),
            to_byte(CLEAR_COLOR[2]),
        );
        scene::emit_lit(
            map,
            player,
            player_light,
            lamp_light,
            ambient,
            tint,
            &mut BufferSink {
                buffer: &mut self.buffer,
            },
        );

        let texture = self.texture.as_mut().ok_or("streaming texture missing")?;
        texture
            .update(None, self.buffer.as_bytes(), (width * 4) as usize)
            .map_err(|e| e.to_string())?;
        self.canvas.copy(texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

impl Drop for SoftwareBackend {
    fn drop(&mut self) {
        if let Some(texture) = self.texture.take() {
            // Safety: dropped before the canvas field, which owns the
            // renderer the texture belongs to
            unsafe { texture.destroy() };
        }
    }
}
