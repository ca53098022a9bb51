// Copyright 2026 the Keycap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG export backend for the Keycap imaging IR.
//!
//! This crate provides a small implementation of
//! [`ImagingBackend`] and [`ResourceBackend`] that turns imaging ops into an
//! SVG document, for glyph previews and debugging.
//!
//! Each draw op is written out as soon as it is applied, using the paint,
//! stroke and transform current at that moment. The document therefore stays
//! complete after the drawing code destroys its paths and paints.
//!
//! Only solid brushes are exported; other brushes fall back to black. Fills
//! use the non-zero rule.

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;
use keycap_imaging::{
    Affine, DrawOp, ImagingBackend, PaintDesc, PaintId, PathCmd, PathDesc, PathId,
    ResourceBackend, StateOp, StrokeStyle,
};
use kurbo::{Cap, Join};
use peniko::{Brush, Color};

#[derive(Clone, Debug, Default)]
struct SvgState {
    transform: Affine,
    paint: Option<PaintId>,
    stroke: Option<StrokeStyle>,
}

/// An SVG writing backend.
#[derive(Default, Debug)]
pub struct SvgBackend {
    paths: Vec<Option<PathDesc>>,
    paints: Vec<Option<PaintDesc>>,

    state: SvgState,
    body: String,
}

impl SvgBackend {
    /// Export everything drawn so far as an SVG document.
    ///
    /// `width`/`height` are used both as the SVG `width`/`height` attributes and to set
    /// `viewBox="0 0 width height"`.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }

    fn path_desc(&self, id: PathId) -> Option<&PathDesc> {
        self.paths.get(id.0 as usize)?.as_ref()
    }
}

impl ResourceBackend for SvgBackend {
    fn create_path(&mut self, desc: PathDesc) -> PathId {
        let id =
            u32::try_from(self.paths.len()).expect("SvgBackend: too many paths for u32 PathId");
        self.paths.push(Some(desc));
        PathId(id)
    }

    fn destroy_path(&mut self, id: PathId) {
        if let Some(slot) = self.paths.get_mut(id.0 as usize) {
            *slot = None;
        }
    }

    fn create_paint(&mut self, desc: PaintDesc) -> PaintId {
        let id =
            u32::try_from(self.paints.len()).expect("SvgBackend: too many paints for u32 PaintId");
        self.paints.push(Some(desc));
        PaintId(id)
    }

    fn destroy_paint(&mut self, id: PaintId) {
        if let Some(slot) = self.paints.get_mut(id.0 as usize) {
            *slot = None;
        }
    }
}

impl ImagingBackend for SvgBackend {
    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::SetTransform(xf) => self.state.transform = *xf,
            StateOp::SetPaint(id) => self.state.paint = Some(*id),
            StateOp::SetStroke(style) => self.state.stroke = Some(style.clone()),
        }
    }

    fn draw(&mut self, op: DrawOp) {
        let mut element = String::new();
        write_draw_op(self, &mut element, &op);
        self.body.push_str(&element);
    }
}

fn write_draw_op(backend: &SvgBackend, out: &mut String, op: &DrawOp) {
    let state = &backend.state;
    let attrs = svg_transform_attr(state.transform);
    match op {
        DrawOp::FillPath(path_id) => {
            if let Some(path) = backend.path_desc(*path_id) {
                let d = path_to_svg_d(path);
                let style = style_for_paint(backend, PaintKind::Fill);
                let _ = write!(
                    out,
                    "<path d=\"{d}\"{attrs} fill-rule=\"nonzero\"{style}/>"
                );
            }
        }
        DrawOp::StrokePath(path_id) => {
            if let Some(path) = backend.path_desc(*path_id) {
                let d = path_to_svg_d(path);
                let style = style_for_paint(backend, PaintKind::Stroke);
                let _ = write!(out, "<path d=\"{d}\"{attrs}{style}/>");
            }
        }
    }
}

fn svg_transform_attr(transform: Affine) -> String {
    if transform == Affine::IDENTITY {
        String::new()
    } else {
        format!(" transform=\"{}\"", affine_to_svg_matrix(transform))
    }
}

#[derive(Copy, Clone)]
enum PaintKind {
    Fill,
    Stroke,
}

fn solid_color(backend: &SvgBackend) -> Option<Color> {
    let id = backend.state.paint?;
    match &backend.paints.get(id.0 as usize)?.as_ref()?.brush {
        Brush::Solid(color) => Some(*color),
        _ => None,
    }
}

fn style_for_paint(backend: &SvgBackend, kind: PaintKind) -> String {
    let mut out = String::new();
    let (rgb, a) = color_to_svg(solid_color(backend).unwrap_or(Color::BLACK));

    match kind {
        PaintKind::Fill => {
            let _ = write!(out, " fill=\"{rgb}\" stroke=\"none\"");
            if a < 1.0 {
                let _ = write!(out, " fill-opacity=\"{}\"", fmt_f32(a));
            }
        }
        PaintKind::Stroke => {
            let _ = write!(out, " fill=\"none\" stroke=\"{rgb}\"");
            if a < 1.0 {
                let _ = write!(out, " stroke-opacity=\"{}\"", fmt_f32(a));
            }
        }
    }

    if let PaintKind::Stroke = kind
        && let Some(stroke) = backend.state.stroke.as_ref()
    {
        let _ = write!(out, " stroke-width=\"{}\"", fmt_f64_to_f32(stroke.width));
        // SVG has a single linecap, while kurbo can specify start/end caps.
        // Use the start cap when they differ.
        let _ = write!(
            out,
            " stroke-linecap=\"{}\"",
            stroke_cap_svg(stroke.start_cap)
        );
        let _ = write!(out, " stroke-linejoin=\"{}\"", stroke_join_svg(stroke.join));
        if stroke.miter_limit.is_finite() && stroke.join == Join::Miter {
            let _ = write!(
                out,
                " stroke-miterlimit=\"{}\"",
                fmt_f64_to_f32(stroke.miter_limit)
            );
        }
    }

    out
}

fn stroke_cap_svg(cap: Cap) -> &'static str {
    match cap {
        Cap::Butt => "butt",
        Cap::Round => "round",
        Cap::Square => "square",
    }
}

fn stroke_join_svg(join: Join) -> &'static str {
    match join {
        Join::Miter => "miter",
        Join::Round => "round",
        Join::Bevel => "bevel",
    }
}

fn color_to_svg(color: Color) -> (String, f32) {
    let rgba = color.to_rgba8();
    let a = f32::from(rgba.a) / 255.0;
    (format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b), a)
}

fn affine_to_svg_matrix(xf: Affine) -> String {
    // kurbo::Affine stores [a, b, c, d, e, f] corresponding to:
    // [ a c e ]
    // [ b d f ]
    // [ 0 0 1 ]
    let c = xf.as_coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        fmt_f64_to_f32(c[0]),
        fmt_f64_to_f32(c[1]),
        fmt_f64_to_f32(c[2]),
        fmt_f64_to_f32(c[3]),
        fmt_f64_to_f32(c[4]),
        fmt_f64_to_f32(c[5]),
    )
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "SVG uses f32-like scalar formatting"
)]
fn fmt_f64_to_f32(v: f64) -> String {
    fmt_f32(v as f32)
}

fn path_to_svg_d(path: &PathDesc) -> String {
    let mut d = String::new();
    for cmd in path.commands.iter() {
        match *cmd {
            PathCmd::MoveTo { x, y } => {
                let _ = write!(d, "M{} {}", fmt_f32(x), fmt_f32(y));
            }
            PathCmd::LineTo { x, y } => {
                let _ = write!(d, "L{} {}", fmt_f32(x), fmt_f32(y));
            }
            PathCmd::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let _ = write!(
                    d,
                    "C{} {} {} {} {} {}",
                    fmt_f32(x1),
                    fmt_f32(y1),
                    fmt_f32(x2),
                    fmt_f32(y2),
                    fmt_f32(x),
                    fmt_f32(y)
                );
            }
            PathCmd::Close => {
                d.push('Z');
            }
        }
    }
    d
}

fn fmt_f32(v: f32) -> String {
    // Keep output readable and stable enough for previews.
    if v.is_finite() {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "best-effort pretty formatting"
        )]
        let i = v as i32;
        #[allow(
            clippy::cast_precision_loss,
            reason = "only compared against the original value"
        )]
        let diff = (i as f32) - v;
        if diff > -1e-6 && diff < 1e-6 {
            return format!("{i}");
        }
    } else {
        return format!("{v}");
    }

    let mut s = format!("{v:.3}");
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}
