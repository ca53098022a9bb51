// Copyright 2026 the Keycap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keycap Imaging: the drawing-context IR that keyboard glyphs are rendered through.
//!
//! This crate defines a small, plain‑old‑data (POD) imaging intermediate
//! representation and the traits a drawing backend implements to consume it.
//! Glyph renderers in `keycap_glyphs` only ever talk to these traits; whether
//! the ops end up as pixels, an SVG document, or a test log is the backend's
//! business.
//!
//! # Core concepts
//!
//! - **Resources**: small, opaque handles ([`PathId`], [`PaintId`]) whose
//!   lifetimes are managed via [`ResourceBackend`].
//! - **Imaging operations**: [`StateOp`] (mutate state) and [`DrawOp`]
//!   (produce pixels), combined into [`ImagingOp`] for logging backends.
//! - **Backends**: [`ImagingBackend`] accepts imaging ops.
//!
//! The transform is absolute state: [`StateOp::SetTransform`] replaces the
//! current transform rather than concatenating onto it. Saving and restoring
//! a transform is therefore expressed by the caller remembering the previous
//! value and setting it again. Paths are always filled with the non-zero rule.
//!
//! # Example
//!
//! ```
//! # use keycap_imaging::*;
//! # use peniko::{Brush, Color};
//! fn fill_triangle(backend: &mut impl ImagingBackend) {
//!     let paint = backend.create_paint(PaintDesc {
//!         brush: Brush::Solid(Color::BLACK),
//!     });
//!     let path = backend.create_path(PathDesc {
//!         commands: Box::new([
//!             PathCmd::MoveTo { x: 0.0, y: 0.0 },
//!             PathCmd::LineTo { x: 10.0, y: 0.0 },
//!             PathCmd::LineTo { x: 5.0, y: 8.0 },
//!             PathCmd::Close,
//!         ]),
//!     });
//!
//!     backend.state(StateOp::SetPaint(paint));
//!     backend.draw(DrawOp::FillPath(path));
//!
//!     backend.destroy_path(path);
//!     backend.destroy_paint(paint);
//! }
//! ```

#![no_std]

extern crate alloc;

use alloc::{boxed::Box, vec::Vec};
use kurbo::{BezPath, PathEl, Point, QuadBez};
use peniko::Brush;

/// Identifier for a path resource.
///
/// This is a small, opaque handle that is stable for the lifetime of the
/// resource.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathId(pub u32);

/// Identifier for a paint resource.
///
/// This is a small, opaque handle that is stable for the lifetime of the
/// resource. Paints may be shared by many paths.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PaintId(pub u32);

/// Affine transform type used by the imaging IR.
pub type Affine = kurbo::Affine;

/// Stroke style used by `StateOp::SetStroke`.
///
/// This is a re-export of [`kurbo::Stroke`], which captures width,
/// joins, caps, dashes, and related stroke parameters.
pub type StrokeStyle = kurbo::Stroke;

/// State operations that mutate the current imaging state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Set the current transform matrix.
    SetTransform(Affine),
    /// Set the current paint resource.
    SetPaint(PaintId),
    /// Set the current stroke style.
    SetStroke(StrokeStyle),
}

/// Draw operations that produce pixels given the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill the given path with the current paint.
    FillPath(PathId),
    /// Stroke the given path with the current stroke and paint.
    StrokePath(PathId),
}

/// Description of a path resource.
#[derive(Clone, Debug, PartialEq)]
pub struct PathDesc {
    /// Command buffer describing the path geometry.
    pub commands: Box<[PathCmd]>,
}

impl PathDesc {
    /// Build a path description from a kurbo path.
    ///
    /// Coordinates are narrowed to `f32`. Quadratic segments are raised to
    /// cubics.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "the IR stores coordinates as f32"
    )]
    pub fn from_bez_path(path: &BezPath) -> Self {
        let p = |pt: Point| (pt.x as f32, pt.y as f32);
        let cubic = |a: Point, b: Point, c: Point| {
            let (x1, y1) = p(a);
            let (x2, y2) = p(b);
            let (x, y) = p(c);
            PathCmd::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            }
        };
        let mut last = Point::ZERO;
        let mut start = Point::ZERO;
        let commands: Vec<PathCmd> = path
            .elements()
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(a) => {
                    (last, start) = (a, a);
                    let (x, y) = p(a);
                    PathCmd::MoveTo { x, y }
                }
                PathEl::LineTo(a) => {
                    last = a;
                    let (x, y) = p(a);
                    PathCmd::LineTo { x, y }
                }
                PathEl::QuadTo(a, b) => {
                    let raised = QuadBez::new(last, a, b).raise();
                    last = b;
                    cubic(raised.p1, raised.p2, raised.p3)
                }
                PathEl::CurveTo(a, b, c) => {
                    last = c;
                    cubic(a, b, c)
                }
                PathEl::ClosePath => {
                    last = start;
                    PathCmd::Close
                }
            })
            .collect();
        Self {
            commands: commands.into_boxed_slice(),
        }
    }

    /// Convert this description back into a kurbo path.
    pub fn to_bez_path(&self) -> BezPath {
        let pt = |x: f32, y: f32| Point::new(f64::from(x), f64::from(y));
        let mut out = BezPath::new();
        for cmd in self.commands.iter() {
            match *cmd {
                PathCmd::MoveTo { x, y } => out.push(PathEl::MoveTo(pt(x, y))),
                PathCmd::LineTo { x, y } => out.push(PathEl::LineTo(pt(x, y))),
                PathCmd::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => out.push(PathEl::CurveTo(pt(x1, y1), pt(x2, y2), pt(x, y))),
                PathCmd::Close => out.push(PathEl::ClosePath),
            }
        }
        out
    }
}

/// Simple path command enumeration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathCmd {
    /// Move the current point without drawing.
    MoveTo {
        /// X coordinate of the new point.
        x: f32,
        /// Y coordinate of the new point.
        y: f32,
    },
    /// Draw a line from the current point to the given point.
    LineTo {
        /// X coordinate of the line end.
        x: f32,
        /// Y coordinate of the line end.
        y: f32,
    },
    /// Draw a cubic Bézier curve from the current point to the given point,
    /// using two control points.
    CurveTo {
        /// X coordinate of the first control point.
        x1: f32,
        /// Y coordinate of the first control point.
        y1: f32,
        /// X coordinate of the second control point.
        x2: f32,
        /// Y coordinate of the second control point.
        y2: f32,
        /// X coordinate of the curve end.
        x: f32,
        /// Y coordinate of the curve end.
        y: f32,
    },
    /// Close the current subpath.
    Close,
}

/// Description of a paint resource.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintDesc {
    /// Brush used when rendering.
    ///
    /// This is a [`peniko::Brush`], so backends can directly map it onto their
    /// native paint representation. Glyphs only ever use solid colors.
    pub brush: Brush,
}

/// Resource lifetime interface.
///
/// Backends implement this to manage their own resource storage.
///
/// Implementations are free to choose how resources are allocated and stored,
/// but they must ensure that IDs remain valid and refer to the same logical
/// resource until the corresponding `destroy_*` function is called.
/// Destroying an unknown or already destroyed ID must be a no-op.
pub trait ResourceBackend {
    /// Create a path resource.
    fn create_path(&mut self, desc: PathDesc) -> PathId;
    /// Destroy a previously created path.
    fn destroy_path(&mut self, id: PathId);

    /// Create a paint resource.
    fn create_paint(&mut self, desc: PaintDesc) -> PaintId;
    /// Destroy a previously created paint.
    fn destroy_paint(&mut self, id: PaintId);
}

/// Unified imaging operation, as logged by backends that keep a history.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagingOp {
    /// State-changing operation.
    State(StateOp),
    /// Drawing operation.
    Draw(DrawOp),
}

impl ImagingOp {
    /// Returns `true` for draw operations.
    #[inline]
    pub fn is_draw(&self) -> bool {
        matches!(self, Self::Draw(_))
    }
}

/// Minimal imaging backend trait.
///
/// This is the drawing context glyphs are rendered into.
pub trait ImagingBackend: ResourceBackend {
    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);
}
