// File: crates/benchplot-core/src/raster.rs
// Summary: Headless raster backend: draws a Scene onto a Skia CPU surface and encodes PNG.

use std::io::Cursor;

use anyhow::{anyhow, bail, Context, Result};
use skia_safe as skia;

use crate::path::{LinePath, PathCommand};
use crate::scene::{Node, Scene, Stroke};
use crate::text::TextShaper;
use crate::theme::Theme;

/// Rasterize `scene`; returns `(pixels, width, height, row_stride)` in RGBA8.
pub fn render_rgba8(scene: &Scene) -> Result<(Vec<u8>, u32, u32, usize)> {
    let (w, h) = (scene.width as i32, scene.height as i32);
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| anyhow!("failed to create raster surface {w}x{h}"))?;
    draw_scene(surface.canvas(), scene);

    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let stride = scene.width as usize * 4;
    let mut pixels = vec![0u8; stride * scene.height as usize];
    if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
        bail!("reading back raster pixels failed");
    }
    Ok((pixels, scene.width, scene.height, stride))
}

/// Rasterize `scene` and encode it as PNG.
pub fn render_png(scene: &Scene) -> Result<Vec<u8>> {
    let (pixels, w, h, _) = render_rgba8(scene)?;
    let img = image::RgbaImage::from_raw(w, h, pixels).context("raster buffer does not match surface size")?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).context("encode PNG failed")?;
    Ok(out.into_inner())
}

/// Draw every layer of `scene` onto `canvas`.
pub fn draw_scene(canvas: &skia::Canvas, scene: &Scene) {
    let theme = &scene.theme;
    canvas.clear(theme.resolve(scene.background).to_skia());
    let shaper = TextShaper::new();

    for layer in &scene.layers {
        canvas.save();
        if let Some(c) = layer.clip {
            canvas.clip_rect(sk_rect(c.left, c.top, c.right, c.bottom), None, Some(true));
        }
        for node in &layer.nodes {
            draw_node(canvas, &shaper, theme, node);
        }
        canvas.restore();
    }
}

fn draw_node(canvas: &skia::Canvas, shaper: &TextShaper, theme: &Theme, node: &Node) {
    match node {
        Node::Rect { rect, fill, stroke, corner_radius } => {
            let r = sk_rect(rect.left, rect.top, rect.right, rect.bottom);
            let radius = *corner_radius as f32;
            let mut paints = Vec::with_capacity(2);
            if let Some(fill) = fill {
                paints.push(fill_paint(theme.resolve(*fill).to_skia()));
            }
            if let Some(stroke) = stroke {
                paints.push(stroke_paint(theme, stroke));
            }
            for paint in &paints {
                if radius > 0.0 {
                    canvas.draw_round_rect(r, radius, radius, paint);
                } else {
                    canvas.draw_rect(r, paint);
                }
            }
        }
        Node::Line { from, to, stroke } => {
            let paint = stroke_paint(theme, stroke);
            canvas.draw_line((from.x as f32, from.y as f32), (to.x as f32, to.y as f32), &paint);
        }
        Node::Path { path, stroke } => {
            let mut paint = stroke_paint(theme, stroke);
            paint.set_stroke_join(skia::paint::Join::Round);
            canvas.draw_path(&sk_path(path), &paint);
        }
        Node::Circle { center, radius, fill, stroke } => {
            let c = (center.x as f32, center.y as f32);
            if let Some(fill) = fill {
                canvas.draw_circle(c, *radius as f32, &fill_paint(theme.resolve(*fill).to_skia()));
            }
            if let Some(stroke) = stroke {
                canvas.draw_circle(c, *radius as f32, &stroke_paint(theme, stroke));
            }
        }
        Node::Text(text) => {
            shaper.draw(canvas, text, theme.resolve(text.color).to_skia());
        }
    }
}

fn sk_rect(l: f64, t: f64, r: f64, b: f64) -> skia::Rect {
    skia::Rect::from_ltrb(l as f32, t as f32, r as f32, b as f32)
}

fn sk_path(path: &LinePath) -> skia::Path {
    let mut out = skia::Path::new();
    for cmd in &path.commands {
        match *cmd {
            PathCommand::MoveTo(p) => {
                out.move_to((p.x as f32, p.y as f32));
            }
            PathCommand::LineTo(p) => {
                out.line_to((p.x as f32, p.y as f32));
            }
        }
    }
    out
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

fn stroke_paint(theme: &Theme, stroke: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(stroke.width as f32);
    paint.set_color(theme.resolve(stroke.color).to_skia());
    if let Some([on, off]) = stroke.dash {
        paint.set_path_effect(skia::PathEffect::dash(&[on as f32, off as f32], 0.0));
    }
    paint
}
