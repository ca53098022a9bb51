// Copyright 2026 the Keycap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vello CPU–backed implementation of the imaging backend.
//!
//! This crate implements [`ImagingBackend`] on top of
//! the sparse-strips [`vello_cpu::RenderContext`], so that keyboard glyphs can
//! be rasterized without a GPU.
//!
//! The caller owns the render context and is responsible for flushing it and
//! reading back pixels once drawing is done. Only solid brushes are applied,
//! and fills use the context's default non-zero rule.

#![deny(unsafe_code)]
#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use keycap_imaging::{
    DrawOp, ImagingBackend, PaintDesc, PaintId, PathCmd, PathDesc, PathId, ResourceBackend,
    StateOp, StrokeStyle,
};
use kurbo::{Affine, Cap, Join};
use peniko::Brush;
use vello_cpu::RenderContext;
use vello_cpu::kurbo::{Affine as CpuAffine, BezPath, Cap as CpuCap, Join as CpuJoin, Stroke};

/// CPU-backed implementation of the imaging backend using `vello_cpu`.
pub struct VelloCpuImagingBackend<'ctx> {
    /// Underlying Vello CPU render context to draw into.
    pub ctx: &'ctx mut RenderContext,
    paths: Vec<Option<BezPath>>,
    paints: Vec<Option<PaintDesc>>,

    current_paint: Option<PaintId>,
    current_transform: Affine,
}

impl fmt::Debug for VelloCpuImagingBackend<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VelloCpuImagingBackend { .. }")
    }
}

impl<'ctx> VelloCpuImagingBackend<'ctx> {
    /// Create a new backend that renders into the given CPU render context.
    pub fn new(ctx: &'ctx mut RenderContext) -> Self {
        Self {
            ctx,
            paths: Vec::new(),
            paints: Vec::new(),
            current_paint: None,
            current_transform: Affine::IDENTITY,
        }
    }

    /// The transform most recently set through [`StateOp::SetTransform`].
    pub fn current_transform(&self) -> Affine {
        self.current_transform
    }

    fn affine_to_cpu(xf: Affine) -> CpuAffine {
        CpuAffine::new(xf.as_coeffs())
    }

    fn stroke_to_cpu(style: &StrokeStyle) -> Stroke {
        let mut stroke = Stroke::new(style.width);
        stroke.miter_limit = style.miter_limit;
        stroke.join = match style.join {
            Join::Bevel => CpuJoin::Bevel,
            Join::Miter => CpuJoin::Miter,
            Join::Round => CpuJoin::Round,
        };
        stroke.start_cap = Self::cap_to_cpu(style.start_cap);
        stroke.end_cap = Self::cap_to_cpu(style.end_cap);
        stroke
    }

    fn cap_to_cpu(cap: Cap) -> CpuCap {
        match cap {
            Cap::Butt => CpuCap::Butt,
            Cap::Round => CpuCap::Round,
            Cap::Square => CpuCap::Square,
        }
    }

    fn apply_current_paint(&mut self) {
        let Some(id) = self.current_paint else {
            return;
        };
        let idx = id.0 as usize;
        // Glyphs only paint with solid colors; other brushes keep the previous paint.
        if let Some(Some(PaintDesc {
            brush: Brush::Solid(color),
        })) = self.paints.get(idx)
        {
            self.ctx.set_paint(*color);
        }
    }
}

impl ResourceBackend for VelloCpuImagingBackend<'_> {
    fn create_path(&mut self, desc: PathDesc) -> PathId {
        let mut p = BezPath::new();
        for cmd in desc.commands.iter() {
            match *cmd {
                PathCmd::MoveTo { x, y } => p.move_to((f64::from(x), f64::from(y))),
                PathCmd::LineTo { x, y } => p.line_to((f64::from(x), f64::from(y))),
                PathCmd::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => p.curve_to(
                    (f64::from(x1), f64::from(y1)),
                    (f64::from(x2), f64::from(y2)),
                    (f64::from(x), f64::from(y)),
                ),
                PathCmd::Close => p.close_path(),
            }
        }
        let id = u32::try_from(self.paths.len())
            .expect("VelloCpuImagingBackend: too many paths for u32 PathId");
        self.paths.push(Some(p));
        PathId(id)
    }

    fn destroy_path(&mut self, id: PathId) {
        let idx = id.0 as usize;
        if let Some(slot) = self.paths.get_mut(idx) {
            *slot = None;
        }
    }

    fn create_paint(&mut self, desc: PaintDesc) -> PaintId {
        let id = u32::try_from(self.paints.len())
            .expect("VelloCpuImagingBackend: too many paints for u32 PaintId");
        self.paints.push(Some(desc));
        PaintId(id)
    }

    fn destroy_paint(&mut self, id: PaintId) {
        let idx = id.0 as usize;
        if let Some(slot) = self.paints.get_mut(idx) {
            *slot = None;
        }
    }
}

impl ImagingBackend for VelloCpuImagingBackend<'_> {
    fn state(&mut self, op: StateOp) {
        match op {
            StateOp::SetTransform(xf) => {
                self.current_transform = xf;
                self.ctx.set_transform(Self::affine_to_cpu(xf));
            }
            StateOp::SetPaint(id) => {
                self.current_paint = Some(id);
                self.apply_current_paint();
            }
            StateOp::SetStroke(style) => {
                self.ctx.set_stroke(Self::stroke_to_cpu(&style));
            }
        }
    }

    fn draw(&mut self, op: DrawOp) {
        match op {
            DrawOp::FillPath(id) => {
                if let Some(Some(path)) = self.paths.get(id.0 as usize) {
                    self.ctx.fill_path(path);
                }
            }
            DrawOp::StrokePath(id) => {
                if let Some(Some(path)) = self.paths.get(id.0 as usize) {
                    self.ctx.stroke_path(path);
                }
            }
        }
    }
}
