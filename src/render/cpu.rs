use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::{HeatmapError, HeatmapResult};
use crate::render::surface::DrawSurface;

/// A rendered frame as RGBA8 pixels.
///
/// Frames come out of the rasterizer **premultiplied**; the flag keeps that explicit at API
/// boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as stored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Copy with straight (non-premultiplied) alpha.
    pub fn to_straight(&self) -> Self {
        if !self.premultiplied {
            return self.clone();
        }
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        Self {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }

    pub fn save_png(&self, path: &Path) -> HeatmapResult<()> {
        let straight = self.to_straight();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &straight.data,
            straight.width,
            straight.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// CPU raster surface powered by `vello_cpu`.
pub struct PixmapSurface {
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    background: Option<Rgba8>,
    width: u16,
    height: u16,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> HeatmapResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| HeatmapError::validation(format!("surface width exceeds u16: {width}")))?;
        let h: u16 = height.try_into().map_err(|_| {
            HeatmapError::validation(format!("surface height exceeds u16: {height}"))
        })?;
        if w == 0 || h == 0 {
            return Err(HeatmapError::validation("surface width/height must be > 0"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            background: None,
            width: w,
            height: h,
        })
    }

    /// Fill every frame with `color` before painting cells.
    pub fn with_background(mut self, color: Option<Rgba8>) -> Self {
        self.background = color;
        self
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// The most recently finished frame.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl DrawSurface for PixmapSurface {
    fn begin_frame(&mut self) -> HeatmapResult<()> {
        self.ctx.reset();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        if let Some(bg) = self.background {
            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8, opacity: f64) -> HeatmapResult<()> {
        let c = color.with_opacity(opacity);
        if c.a == 0 {
            return Ok(());
        }
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
        Ok(())
    }

    fn end_frame(&mut self) -> HeatmapResult<()> {
        self.ctx.flush();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
