// Copyright 2026 the Keycap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph-hosting shapes with an overflow drawing surface.
//!
//! A [`Shape`] owns an [`OverflowCanvas`] whose frame is larger than the
//! shape's bounds and centered on them, so strokes near the edges are not
//! clipped. The canvas keeps no reference to its owner; it is handed a
//! read-only [`ShapeHandle`] each time it draws.
//!
//! ```
//! use keycap_glyphs::shape::{GlobeShape, Shape};
//! use keycap_imaging_ref::RefBackend;
//! use kurbo::Rect;
//!
//! let mut shape = Shape::new(GlobeShape);
//! shape.set_bounds(Rect::new(0.0, 0.0, 40.0, 40.0));
//! assert_eq!(shape.overflow_frame(), Rect::new(-5.0, -5.0, 45.0, 45.0));
//!
//! let mut backend = RefBackend::default();
//! assert!(shape.display(&mut backend));
//! assert!(!shape.display(&mut backend), "already up to date");
//! ```

use keycap_imaging::{Affine, ImagingBackend};
use kurbo::Rect;
use peniko::Color;

use crate::canvas::GlyphCanvas;
use crate::render::{draw_backspace, draw_globe, draw_return, draw_shift};

/// Default ratio of the overflow frame to the owner's bounds.
pub const DEFAULT_OVERFLOW_RATIO: f64 = 1.25;

/// Runtime options for a [`Shape`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeConfig {
    /// Overflow frame size relative to the shape's bounds, per axis.
    pub overflow_ratio: f64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            overflow_ratio: DEFAULT_OVERFLOW_RATIO,
        }
    }
}

/// A glyph a [`Shape`] can host.
pub trait ShapeGlyph {
    /// Draws the glyph into `bounds`, in the owner's coordinate space.
    fn draw_call<B: ImagingBackend + ?Sized>(
        &self,
        canvas: &mut GlyphCanvas<'_, B>,
        bounds: Rect,
        color: Color,
    );
}

/// Hosts the backspace glyph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BackspaceShape;

impl ShapeGlyph for BackspaceShape {
    fn draw_call<B: ImagingBackend + ?Sized>(
        &self,
        canvas: &mut GlyphCanvas<'_, B>,
        bounds: Rect,
        color: Color,
    ) {
        draw_backspace(canvas, bounds, color);
    }
}

/// Hosts the shift glyph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShiftShape {
    /// Draw the caps-lock bar.
    pub with_lock: bool,
}

impl ShapeGlyph for ShiftShape {
    fn draw_call<B: ImagingBackend + ?Sized>(
        &self,
        canvas: &mut GlyphCanvas<'_, B>,
        bounds: Rect,
        color: Color,
    ) {
        draw_shift(canvas, bounds, color, self.with_lock);
    }
}

/// Hosts the globe glyph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobeShape;

impl ShapeGlyph for GlobeShape {
    fn draw_call<B: ImagingBackend + ?Sized>(
        &self,
        canvas: &mut GlyphCanvas<'_, B>,
        bounds: Rect,
        color: Color,
    ) {
        draw_globe(canvas, bounds, color);
    }
}

/// Hosts the return glyph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReturnShape;

impl ShapeGlyph for ReturnShape {
    fn draw_call<B: ImagingBackend + ?Sized>(
        &self,
        canvas: &mut GlyphCanvas<'_, B>,
        bounds: Rect,
        color: Color,
    ) {
        draw_return(canvas, bounds, color);
    }
}

/// Read-only view of a shape, passed to its overflow canvas at draw time.
#[derive(Debug)]
pub struct ShapeHandle<'a, G> {
    glyph: &'a G,
    bounds: Rect,
    color: Option<Color>,
}

impl<G> Clone for ShapeHandle<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for ShapeHandle<'_, G> {}

impl<'a, G: ShapeGlyph> ShapeHandle<'a, G> {
    /// The owner's glyph.
    pub fn glyph(&self) -> &'a G {
        self.glyph
    }

    /// The owner's bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The owner's color, if one has been set.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// The color the glyph is painted with; black when none is set.
    pub fn draw_color(&self) -> Color {
        self.color.unwrap_or(Color::BLACK)
    }
}

/// Oversized surface a [`Shape`] paints its glyph on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverflowCanvas {
    frame: Rect,
    needs_display: bool,
}

impl OverflowCanvas {
    /// Frame in the owner's coordinate space.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Whether the canvas has a pending repaint.
    pub fn needs_display(&self) -> bool {
        self.needs_display
    }

    /// Requests a repaint.
    pub fn set_needs_display(&mut self) {
        self.needs_display = true;
    }

    /// Sizes the frame to `ratio` times `owner_bounds`, centered on them, and
    /// requests a repaint.
    pub fn layout(&mut self, owner_bounds: Rect, ratio: f64) {
        let (w, h) = (owner_bounds.width(), owner_bounds.height());
        let (cw, ch) = (w * ratio, h * ratio);
        let x0 = owner_bounds.x0 + (w - cw) / 2.0;
        let y0 = owner_bounds.y0 + (h - ch) / 2.0;
        self.frame = Rect::new(x0, y0, x0 + cw, y0 + ch);
        self.set_needs_display();
    }

    /// Paints the owner's glyph onto this canvas and clears the pending
    /// repaint.
    ///
    /// `backend` is in the canvas's local space: its origin is the top-left
    /// corner of [`frame`](Self::frame). The owner's bounds are centered in it.
    pub fn draw<B: ImagingBackend + ?Sized, G: ShapeGlyph>(
        &mut self,
        backend: &mut B,
        owner: ShapeHandle<'_, G>,
    ) {
        let bounds = owner.bounds();
        let inset = Affine::translate((
            (self.frame.width() - bounds.width()) / 2.0 - bounds.x0,
            (self.frame.height() - bounds.height()) / 2.0 - bounds.y0,
        ));
        let mut canvas = GlyphCanvas::new(backend);
        {
            let mut local = canvas.scoped(inset);
            owner.glyph().draw_call(&mut *local, bounds, owner.draw_color());
        }
        self.needs_display = false;
    }
}

/// A glyph hosted in a rectangle, with color and repaint tracking.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape<G> {
    glyph: G,
    color: Option<Color>,
    bounds: Rect,
    laid_out: Option<Rect>,
    config: ShapeConfig,
    overflow: OverflowCanvas,
}

impl<G: ShapeGlyph> Shape<G> {
    /// Creates a shape with empty bounds and the default configuration.
    pub fn new(glyph: G) -> Self {
        Self::with_config(glyph, ShapeConfig::default())
    }

    /// Creates a shape with empty bounds.
    pub fn with_config(glyph: G, config: ShapeConfig) -> Self {
        Self {
            glyph,
            color: None,
            bounds: Rect::ZERO,
            laid_out: None,
            config,
            overflow: OverflowCanvas::default(),
        }
    }

    /// The hosted glyph.
    pub fn glyph(&self) -> &G {
        &self.glyph
    }

    /// The configuration this shape was created with.
    pub fn config(&self) -> ShapeConfig {
        self.config
    }

    /// The color set on this shape, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Sets the glyph color. Setting a color requests a repaint; clearing it
    /// does not.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
        if color.is_some() {
            self.overflow.set_needs_display();
        }
    }

    /// The shape's bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Sets the bounds and lays out the overflow canvas.
    ///
    /// Returns `true` if the overflow frame was repositioned.
    pub fn set_bounds(&mut self, bounds: Rect) -> bool {
        self.bounds = bounds;
        self.layout()
    }

    /// Lays out the overflow canvas for the current bounds.
    ///
    /// Degenerate bounds and bounds equal to the last laid-out bounds are
    /// skipped. Returns `true` if the overflow frame was repositioned.
    pub fn layout(&mut self) -> bool {
        let bounds = self.bounds;
        if bounds.width() == 0.0 || bounds.height() == 0.0 {
            log::trace!("shape layout skipped: degenerate bounds {bounds:?}");
            return false;
        }
        if self.laid_out == Some(bounds) {
            log::trace!("shape layout skipped: bounds unchanged");
            return false;
        }
        self.laid_out = Some(bounds);
        self.overflow.layout(bounds, self.config.overflow_ratio);
        log::trace!("overflow frame now {:?}", self.overflow.frame());
        true
    }

    /// Frame of the overflow canvas in this shape's coordinate space.
    pub fn overflow_frame(&self) -> Rect {
        self.overflow.frame()
    }

    /// The overflow canvas.
    pub fn overflow_canvas(&self) -> &OverflowCanvas {
        &self.overflow
    }

    /// Whether a repaint is pending.
    pub fn needs_display(&self) -> bool {
        self.overflow.needs_display()
    }

    /// Requests a repaint.
    pub fn set_needs_display(&mut self) {
        self.overflow.set_needs_display();
    }

    /// A read-only view of this shape.
    pub fn handle(&self) -> ShapeHandle<'_, G> {
        ShapeHandle {
            glyph: &self.glyph,
            bounds: self.bounds,
            color: self.color,
        }
    }

    /// Paints the glyph onto the overflow canvas unconditionally.
    ///
    /// `backend` is in the overflow canvas's local space.
    pub fn draw<B: ImagingBackend + ?Sized>(&mut self, backend: &mut B) {
        let owner = ShapeHandle {
            glyph: &self.glyph,
            bounds: self.bounds,
            color: self.color,
        };
        self.overflow.draw(backend, owner);
    }

    /// Paints the glyph if a repaint is pending.
    ///
    /// Returns `true` if anything was painted.
    pub fn display<B: ImagingBackend + ?Sized>(&mut self, backend: &mut B) -> bool {
        if !self.needs_display() {
            return false;
        }
        log::trace!("repainting shape at {:?}", self.bounds);
        self.draw(backend);
        true
    }
}

impl Shape<ShiftShape> {
    /// Whether the caps-lock bar is drawn.
    pub fn with_lock(&self) -> bool {
        self.glyph.with_lock
    }

    /// Shows or hides the caps-lock bar and requests a repaint.
    pub fn set_with_lock(&mut self, with_lock: bool) {
        self.glyph.with_lock = with_lock;
        self.overflow.set_needs_display();
    }
}
