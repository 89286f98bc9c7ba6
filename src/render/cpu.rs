use std::path::PathBuf;

use crate::foundation::core::{Affine, Canvas};
use crate::foundation::error::{StoryError, StoryResult};
use crate::layout::measure::{TextMeasure, TextRole};
use crate::layout::text_engine::{FontSet, TextBrushRgba8, TextLayoutEngine};
use crate::render::backend::{DisplayList, DrawOp, FrameRGBA, RasterSurface};

/// `vello_cpu` raster surface with Parley text.
pub struct CpuSurface {
    canvas: Canvas,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    engine: TextLayoutEngine,
    regular: vello_cpu::peniko::FontData,
    bold: Option<vello_cpu::peniko::FontData>,
}

impl CpuSurface {
    /// Allocate a surface of `canvas` size drawing text in `ink_rgba`.
    pub fn new(canvas: Canvas, fonts: &FontSet, ink_rgba: [u8; 4]) -> StoryResult<Self> {
        let (width, height) = canvas.as_u16()?;
        let [r, g, b, a] = ink_rgba;
        let engine = TextLayoutEngine::new(fonts, TextBrushRgba8 { r, g, b, a })?;
        let font_data = |bytes: &[u8]| {
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.to_vec()), 0)
        };
        Ok(Self {
            canvas,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            engine,
            regular: font_data(&fonts.regular),
            bold: fonts.bold.as_deref().map(|b| font_data(b)),
        })
    }

    fn font_for(&self, role: TextRole) -> &vello_cpu::peniko::FontData {
        match (role, self.bold.as_ref()) {
            (TextRole::Title | TextRole::Closing, Some(bold)) => bold,
            _ => &self.regular,
        }
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        role: TextRole,
        size_px: f64,
        transform: impl FnOnce(f64, f64) -> Affine,
        opacity: f32,
    ) -> StoryResult<()> {
        let layout = self.engine.layout_line(text, role, size_px as f32)?;
        let font = self.font_for(role).clone();
        let tr = transform(f64::from(layout.width()), f64::from(layout.height()));

        ctx.set_transform(affine_to_cpu(tr));
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }
}

impl TextMeasure for CpuSurface {
    fn advance_width(&mut self, text: &str, role: TextRole, size_px: f64) -> f64 {
        self.engine.advance_width(text, role, size_px)
    }
}

impl RasterSurface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn paint(&mut self, list: &DisplayList) -> StoryResult<()> {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        let mut cleared = false;

        for op in &list.ops {
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            match op {
                DrawOp::Clear => {
                    // Discard anything queued before the clear.
                    ctx = vello_cpu::RenderContext::new(self.width, self.height);
                    cleared = true;
                }
                DrawOp::FillBackground { rgba } => {
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        rgba[0], rgba[1], rgba[2], rgba[3],
                    ));
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(self.width),
                        f64::from(self.height),
                    ));
                }
                DrawOp::Text {
                    text,
                    role,
                    size_px,
                    center,
                    opacity,
                    scale,
                } => {
                    if *opacity <= 0.0 || text.is_empty() {
                        continue;
                    }
                    let (center, scale) = (*center, *scale);
                    self.draw_text(
                        &mut ctx,
                        text,
                        *role,
                        *size_px,
                        |w, h| {
                            Affine::translate(center.to_vec2())
                                * Affine::scale(scale)
                                * Affine::translate((-w / 2.0, -h / 2.0))
                        },
                        opacity.min(1.0),
                    )?;
                }
            }
        }

        if cleared {
            clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }

    fn read_frame(&mut self) -> StoryResult<FrameRGBA> {
        let data = self.pixmap.data_as_u8_slice().to_vec();
        if data.len() != self.canvas.width as usize * self.canvas.height as usize * 4 {
            return Err(StoryError::render("pixmap size does not match canvas"));
        }
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
            premultiplied: true,
        })
    }
}

/// Look for a usable TTF on the host: `STORYREEL_FONT` first, then common system locations.
pub fn find_system_font() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os("STORYREEL_FONT").map(PathBuf::from)
        && p.is_file()
    {
        return Some(p);
    }
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        "/Library/Fonts/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];
    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

pub(crate) fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = (a as u16) + 1;
    let premul = |c: u8| -> u8 { (((c as u16) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
