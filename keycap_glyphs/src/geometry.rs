// Copyright 2026 the Keycap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static glyph outlines in design-space coordinates.
//!
//! Coordinates are reproduced exactly as traced; do not round or simplify
//! them. Repeated points and zero-length curves are part of the outlines.

use kurbo::{BezPath, Cap, Ellipse, Join, Point, Rect, Shape as _, Size, Vec2};

/// Tolerance used when flattening ovals into cubic segments.
const OVAL_TOLERANCE: f64 = 0.01;

const fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// One element of a glyph outline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Segment {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight line to a point.
    LineTo(Point),
    /// Cubic Bézier: first control point, second control point, end point.
    CurveTo(Point, Point, Point),
    /// Close the current subpath.
    Close,
    /// Ellipse inscribed in a rectangle.
    Oval(Rect),
    /// Axis-aligned rectangle.
    Rect(Rect),
}

/// How a glyph path is painted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PaintMode {
    /// Filled with the non-zero rule.
    Fill,
    /// Stroked. `width` is in design units.
    Stroke {
        /// Line width before scaling.
        width: f64,
        /// Line cap.
        cap: Cap,
        /// Line join.
        join: Join,
    },
}

impl PaintMode {
    const fn stroke(width: f64) -> Self {
        Self::Stroke {
            width,
            cap: Cap::Butt,
            join: Join::Miter,
        }
    }

    const fn stroke_with(width: f64, cap: Cap, join: Join) -> Self {
        Self::Stroke { width, cap, join }
    }
}

/// A single painted path of a glyph.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphPath {
    /// Outline.
    pub segments: &'static [Segment],
    /// Fill or stroke.
    pub paint: PaintMode,
    /// Extra translation, in design units, applied while drawing this path only.
    pub offset: Option<Vec2>,
}

impl GlyphPath {
    /// Builds the outline with every coordinate multiplied by `scale`.
    pub fn to_path(&self, scale: f64) -> BezPath {
        let s = |p: Point| pt(p.x * scale, p.y * scale);
        let r = |r: Rect| Rect::new(r.x0 * scale, r.y0 * scale, r.x1 * scale, r.y1 * scale);
        let mut path = BezPath::new();
        for segment in self.segments {
            match *segment {
                Segment::MoveTo(p) => path.move_to(s(p)),
                Segment::LineTo(p) => path.line_to(s(p)),
                Segment::CurveTo(c1, c2, p) => path.curve_to(s(c1), s(c2), s(p)),
                Segment::Close => path.close_path(),
                Segment::Oval(rect) => {
                    path.extend(Ellipse::from_rect(r(rect)).path_elements(OVAL_TOLERANCE));
                }
                Segment::Rect(rect) => path.extend(r(rect).path_elements(OVAL_TOLERANCE)),
            }
        }
        path
    }
}

/// How table coordinates relate to the fitted scale.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Coordinates {
    /// Coordinates and widths are multiplied by the fit scale.
    Fitted,
    /// Coordinates and widths were traced at [`MAX_FIT`](crate::fit::MAX_FIT)
    /// and are multiplied by `scale / MAX_FIT`, so they are drawn unchanged at
    /// the native fit.
    Native,
}

/// Translate then uniform scale, applied around the whole glyph.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroupTransform {
    /// Translation applied first.
    pub translate: Vec2,
    /// Uniform scale applied after the translation.
    pub scale: f64,
}

/// A complete glyph outline table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphTable {
    /// Extent of the outline in design units, used for fitting.
    pub design_size: Size,
    /// Transform wrapped around every path.
    pub group: Option<GroupTransform>,
    /// Coordinate convention of `paths`.
    pub coordinates: Coordinates,
    /// Paths in paint order.
    pub paths: &'static [GlyphPath],
}

/// Left-pointing key outline with an X cut into it.
pub const BACKSPACE: GlyphTable = GlyphTable {
    design_size: Size::new(46.0, 34.0),
    group: Some(GroupTransform {
        translate: Vec2::new(1.0, 0.5),
        scale: 0.5,
    }),
    coordinates: Coordinates::Native,
    paths: &[
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(18.28, 1.5)),
                Segment::LineTo(pt(7.79, 1.5)),
                Segment::LineTo(pt(5.12, 1.8)),
                Segment::CurveTo(pt(5.12, 1.8), pt(3.85, 2.19), pt(3.5, 2.57)),
                Segment::CurveTo(pt(2.91, 3.22), pt(2.9, 3.2), pt(2.5, 3.64)),
                Segment::CurveTo(pt(1.87, 4.32), pt(1.5, 5.78), pt(1.5, 5.78)),
                Segment::LineTo(pt(1.5, 7.91)),
                Segment::LineTo(pt(1.5, 26.09)),
                Segment::LineTo(pt(1.5, 28.22)),
                Segment::CurveTo(pt(1.5, 28.22), pt(1.97, 29.49), pt(2.5, 30.36)),
                Segment::CurveTo(pt(2.87, 30.99), pt(3.3, 31.26), pt(3.5, 31.43)),
                Segment::CurveTo(pt(3.91, 31.78), pt(5.07, 32.18), pt(5.07, 32.18)),
                Segment::LineTo(pt(7.5, 32.5)),
                Segment::LineTo(pt(27.72, 32.5)),
                Segment::LineTo(pt(30.01, 31.87)),
                Segment::LineTo(pt(30.87, 31.43)),
                Segment::LineTo(pt(32.24, 30.03)),
                Segment::LineTo(pt(33.5, 28.75)),
                Segment::LineTo(pt(44.5, 17.53)),
                Segment::LineTo(pt(44.5, 16.47)),
                Segment::LineTo(pt(33.55, 5.3)),
                Segment::LineTo(pt(32.33, 4.06)),
                Segment::LineTo(pt(30.87, 2.57)),
                Segment::LineTo(pt(30.02, 2.14)),
                Segment::LineTo(pt(27.72, 1.5)),
                Segment::LineTo(pt(18.28, 1.5)),
            ],
            paint: PaintMode::stroke(3.0),
            offset: None,
        },
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(12.5, 10.5)),
                Segment::CurveTo(pt(25.0, 23.0), pt(25.0, 23.0), pt(25.0, 23.0)),
            ],
            paint: PaintMode::stroke_with(3.0, Cap::Round, Join::Round),
            offset: None,
        },
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(25.0, 10.5)),
                Segment::CurveTo(pt(12.5, 23.0), pt(12.5, 23.0), pt(12.5, 23.0)),
            ],
            paint: PaintMode::stroke_with(3.0, Cap::Round, Join::Round),
            offset: None,
        },
    ],
};

/// Upward arrow with a stem.
pub const SHIFT: GlyphTable = GlyphTable {
    design_size: Size::new(38.0, 32.0),
    group: None,
    coordinates: Coordinates::Fitted,
    paths: &[GlyphPath {
        segments: &[
            Segment::MoveTo(pt(28.0, 18.0)),
            Segment::LineTo(pt(38.0, 18.0)),
            Segment::LineTo(pt(38.0, 18.0)),
            Segment::LineTo(pt(19.0, 0.0)),
            Segment::LineTo(pt(0.0, 18.0)),
            Segment::LineTo(pt(0.0, 18.0)),
            Segment::LineTo(pt(10.0, 18.0)),
            Segment::LineTo(pt(10.0, 28.0)),
            Segment::CurveTo(pt(10.0, 28.0), pt(10.0, 32.0), pt(14.0, 32.0)),
            Segment::CurveTo(pt(16.0, 32.0), pt(24.0, 32.0), pt(24.0, 32.0)),
            Segment::CurveTo(pt(24.0, 32.0), pt(28.0, 32.0), pt(28.0, 28.0)),
            Segment::CurveTo(pt(28.0, 26.0), pt(28.0, 18.0), pt(28.0, 18.0)),
            Segment::Close,
        ],
        paint: PaintMode::Fill,
        offset: None,
    }],
};

/// Bar under the shift arrow when caps lock is engaged.
pub const SHIFT_LOCK_BAR: GlyphPath = GlyphPath {
    segments: &[Segment::Rect(Rect::new(10.0, 34.0, 28.0, 38.0))],
    paint: PaintMode::Fill,
    offset: None,
};

/// Design height of the shift glyph with its lock bar (bar top plus bar height).
pub const SHIFT_WITH_LOCK_HEIGHT: f64 = 34.0 + 4.0;

/// Circle with meridians and parallels.
pub const GLOBE: GlyphTable = GlyphTable {
    design_size: Size::new(41.0, 40.0),
    group: Some(GroupTransform {
        translate: Vec2::new(1.0, 0.92),
        scale: 0.92,
    }),
    coordinates: Coordinates::Fitted,
    paths: &[
        GlyphPath {
            segments: &[Segment::Oval(Rect::new(0.0, 0.0, 40.0, 40.0))],
            paint: PaintMode::stroke(2.0),
            offset: None,
        },
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(20.0, 0.0)),
                Segment::LineTo(pt(20.0, 40.0)),
                Segment::LineTo(pt(20.0, 0.0)),
                Segment::Close,
            ],
            paint: PaintMode::stroke(2.0),
            offset: None,
        },
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(0.5, 19.5)),
                Segment::LineTo(pt(39.5, 19.5)),
                Segment::LineTo(pt(0.5, 19.5)),
                Segment::Close,
            ],
            paint: PaintMode::stroke(2.0),
            offset: None,
        },
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(21.63, 0.42)),
                Segment::CurveTo(pt(21.63, 0.42), pt(41.0, 19.0), pt(21.63, 39.6)),
            ],
            paint: PaintMode::stroke_with(2.0, Cap::Round, Join::Miter),
            offset: None,
        },
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(17.76, 0.74)),
                Segment::CurveTo(pt(17.76, 0.74), pt(-2.5, 19.04), pt(18.72, 39.6)),
            ],
            paint: PaintMode::stroke_with(2.0, Cap::Round, Join::Miter),
            offset: None,
        },
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(6.0, 7.0)),
                Segment::CurveTo(pt(6.0, 7.0), pt(19.0, 21.0), pt(34.0, 7.0)),
            ],
            paint: PaintMode::stroke_with(2.0, Cap::Round, Join::Miter),
            offset: None,
        },
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(6.0, 33.0)),
                Segment::CurveTo(pt(6.0, 33.0), pt(19.0, 22.0), pt(34.0, 33.0)),
            ],
            paint: PaintMode::stroke_with(2.0, Cap::Round, Join::Miter),
            offset: None,
        },
    ],
};

/// Hooked arrow pointing left, with a short tick at its tail.
pub const RETURN: GlyphTable = GlyphTable {
    design_size: Size::new(37.0, 31.0),
    group: Some(GroupTransform {
        translate: Vec2::new(1.0, 0.5),
        scale: 0.5,
    }),
    coordinates: Coordinates::Native,
    paths: &[
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(9.0, 17.0)),
                Segment::LineTo(pt(5.0, 17.0)),
                Segment::LineTo(pt(3.0, 17.0)),
                Segment::LineTo(pt(1.0, 16.11)),
                Segment::LineTo(pt(0.0, 14.32)),
                Segment::LineTo(pt(0.0, 12.53)),
                Segment::LineTo(pt(0.0, 10.74)),
                Segment::LineTo(pt(0.0, 9.84)),
                Segment::LineTo(pt(0.0, 8.95)),
                Segment::LineTo(pt(0.0, 5.37)),
                Segment::LineTo(pt(0.0, 3.58)),
                Segment::LineTo(pt(0.0, 1.79)),
                Segment::LineTo(pt(0.0, 0.0)),
            ],
            paint: PaintMode::stroke_with(3.0, Cap::Square, Join::Bevel),
            offset: None,
        },
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(-1.36, -0.75)),
                Segment::LineTo(pt(-1.36, 2.75)),
                Segment::LineTo(pt(-1.36, -0.75)),
                Segment::LineTo(pt(-1.36, 2.75)),
            ],
            paint: PaintMode::stroke_with(2.5, Cap::Square, Join::Miter),
            offset: Some(Vec2::new(29.36, 15.25)),
        },
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(10.0, 17.0)),
                Segment::CurveTo(pt(25.18, 17.0), pt(26.0, 17.0), pt(26.0, 17.0)),
            ],
            paint: PaintMode::stroke_with(3.0, Cap::Square, Join::Round),
            offset: None,
        },
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(32.5, 16.0)),
                Segment::CurveTo(pt(21.25, 25.37), pt(20.5, 26.0), pt(20.5, 26.0)),
            ],
            paint: PaintMode::stroke(3.0),
            offset: None,
        },
        GlyphPath {
            segments: &[
                Segment::MoveTo(pt(33.0, 17.5)),
                Segment::CurveTo(pt(21.28, 8.59), pt(20.5, 8.0), pt(20.5, 8.0)),
            ],
            paint: PaintMode::stroke(3.0),
            offset: None,
        },
        GlyphPath {
            segments: &[Segment::MoveTo(pt(28.0, 17.0)), Segment::LineTo(pt(30.0, 17.0))],
            paint: PaintMode::stroke(2.5),
            offset: None,
        },
    ],
};
