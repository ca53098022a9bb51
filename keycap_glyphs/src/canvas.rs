// Copyright 2026 the Keycap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform tracking and resource ownership on top of an [`ImagingBackend`].
//!
//! The imaging IR only knows absolute transforms. [`GlyphCanvas`] remembers
//! the transform it last set so drawing code can concatenate onto it, and
//! [`TransformScope`] puts the previous transform back when it goes out of
//! scope, including while unwinding.

use alloc::vec::Vec;
use core::fmt;
use core::ops::{Deref, DerefMut};

use keycap_imaging::{
    Affine, DrawOp, ImagingBackend, PaintDesc, PaintId, PathDesc, PathId, StateOp, StrokeStyle,
};
use kurbo::{BezPath, Rect, Size};
use peniko::{Brush, Color};

use crate::fit::centering_offset;

/// A drawing context for one glyph draw call.
///
/// Paths and paints created through the canvas live until the canvas is
/// dropped, at which point they are destroyed on the backend.
pub struct GlyphCanvas<'b, B: ImagingBackend + ?Sized> {
    backend: &'b mut B,
    transform: Affine,
    current_paint: Option<(Color, PaintId)>,
    paints: Vec<PaintId>,
    paths: Vec<PathId>,
}

impl<B: ImagingBackend + ?Sized> fmt::Debug for GlyphCanvas<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphCanvas")
            .field("transform", &self.transform)
            .field("paints", &self.paints.len())
            .field("paths", &self.paths.len())
            .finish_non_exhaustive()
    }
}

impl<'b, B: ImagingBackend + ?Sized> GlyphCanvas<'b, B> {
    /// Creates a canvas over a backend whose current transform is the identity.
    pub fn new(backend: &'b mut B) -> Self {
        Self::with_transform(backend, Affine::IDENTITY)
    }

    /// Creates a canvas over a backend whose current transform is `base`.
    ///
    /// Nothing is emitted; `base` is what scopes restore to.
    pub fn with_transform(backend: &'b mut B, base: Affine) -> Self {
        Self {
            backend,
            transform: base,
            current_paint: None,
            paints: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// The transform currently set on the backend.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Concatenates `local` onto the current transform until the returned
    /// scope is dropped.
    pub fn scoped(&mut self, local: Affine) -> TransformScope<'_, 'b, B> {
        let saved = self.transform;
        self.set_transform(saved * local);
        TransformScope {
            canvas: self,
            saved,
        }
    }

    /// Translates so that a box of size `scaled` sits centered in `dest`.
    pub fn center(&mut self, scaled: Size, dest: Rect) -> TransformScope<'_, 'b, B> {
        let offset = centering_offset(scaled, dest);
        self.scoped(Affine::translate(dest.origin().to_vec2() + offset))
    }

    /// Fills `path` with a solid `color` using the non-zero rule.
    pub fn fill(&mut self, path: &BezPath, color: Color) {
        self.use_color(color);
        let id = self.create_path(path);
        self.backend.draw(DrawOp::FillPath(id));
    }

    /// Strokes `path` with `style` and a solid `color`.
    pub fn stroke(&mut self, path: &BezPath, style: &StrokeStyle, color: Color) {
        self.use_color(color);
        self.backend.state(StateOp::SetStroke(style.clone()));
        let id = self.create_path(path);
        self.backend.draw(DrawOp::StrokePath(id));
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.backend.state(StateOp::SetTransform(transform));
    }

    fn use_color(&mut self, color: Color) {
        if matches!(self.current_paint, Some((c, _)) if c == color) {
            return;
        }
        let id = self.backend.create_paint(PaintDesc {
            brush: Brush::Solid(color),
        });
        self.paints.push(id);
        self.current_paint = Some((color, id));
        self.backend.state(StateOp::SetPaint(id));
    }

    fn create_path(&mut self, path: &BezPath) -> PathId {
        let id = self.backend.create_path(PathDesc::from_bez_path(path));
        self.paths.push(id);
        id
    }
}

impl<B: ImagingBackend + ?Sized> Drop for GlyphCanvas<'_, B> {
    fn drop(&mut self) {
        for id in self.paths.drain(..) {
            self.backend.destroy_path(id);
        }
        for id in self.paints.drain(..) {
            self.backend.destroy_paint(id);
        }
    }
}

/// Guard returned by [`GlyphCanvas::scoped`] and [`GlyphCanvas::center`].
///
/// Dereferences to the canvas. Dropping it sets the transform that was
/// current before the scope was opened.
#[must_use = "the transform is restored as soon as the scope is dropped"]
pub struct TransformScope<'c, 'b, B: ImagingBackend + ?Sized> {
    canvas: &'c mut GlyphCanvas<'b, B>,
    saved: Affine,
}

impl<B: ImagingBackend + ?Sized> fmt::Debug for TransformScope<'_, '_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformScope")
            .field("saved", &self.saved)
            .field("canvas", &self.canvas)
            .finish()
    }
}

impl<'b, B: ImagingBackend + ?Sized> Deref for TransformScope<'_, 'b, B> {
    type Target = GlyphCanvas<'b, B>;

    fn deref(&self) -> &Self::Target {
        &*self.canvas
    }
}

impl<B: ImagingBackend + ?Sized> DerefMut for TransformScope<'_, '_, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.canvas
    }
}

impl<B: ImagingBackend + ?Sized> Drop for TransformScope<'_, '_, B> {
    fn drop(&mut self) {
        self.canvas.set_transform(self.saved);
    }
}
