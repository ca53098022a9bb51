// Copyright 2026 the Keycap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shrink-to-fit scale factors for glyph geometry.
//!
//! Every glyph is authored in its own design space (for example 46×34 units
//! for backspace). Fitting never enlarges a glyph beyond [`MAX_FIT`]; it only
//! shrinks it when half of the design extent on an axis exceeds the space
//! available on that axis. The smaller per-axis factor wins, so glyphs keep
//! their aspect ratio.

use kurbo::{Rect, Size, Vec2};

/// Largest scale factor a glyph is ever drawn at.
///
/// Design tables are authored at twice their natural on-key size.
pub const MAX_FIT: f64 = 0.5;

/// Result of fitting a design size into a destination rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FitFactors {
    /// Uniform scale applied along x.
    pub x_scale: f64,
    /// Uniform scale applied along y. Always equal to `x_scale`.
    pub y_scale: f64,
    /// Scale applied to stroke widths. Always equal to `x_scale`.
    ///
    /// Glyphs whose tables use [`Coordinates::Native`](crate::geometry::Coordinates::Native)
    /// multiply their widths by `line_width_scale / MAX_FIT` instead.
    pub line_width_scale: f64,
    /// Vestigial orientation flag, always `false`. No renderer reads it.
    pub fill_is_horizontal: bool,
    /// Vestigial offset, always `0.0`. No renderer reads it.
    pub offset: f64,
}

impl FitFactors {
    /// The uniform scale factor.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.x_scale
    }

    /// Size of `design` after scaling by the fitted factor.
    pub fn scaled_size(&self, design: Size) -> Size {
        Size::new(design.width * self.x_scale, design.height * self.y_scale)
    }
}

/// Computes uniform scale factors for drawing `design` into `dest`.
///
/// For each axis, if half the design extent is larger than the destination
/// extent the axis factor is `(available / (design / 2)) / 2`, otherwise it is
/// [`MAX_FIT`]. The result uses the minimum of the two.
///
/// This does not guard against degenerate destinations; callers check
/// [`is_degenerate`] first.
pub fn fit_factors(design: Size, dest: Rect) -> FitFactors {
    let sx = axis_fit(design.width, dest.width());
    let sy = axis_fit(design.height, dest.height());
    let s = sx.min(sy);
    FitFactors {
        x_scale: s,
        y_scale: s,
        line_width_scale: s,
        fill_is_horizontal: false,
        offset: 0.0,
    }
}

fn axis_fit(design: f64, available: f64) -> f64 {
    let half = design / 2.0;
    if half > available {
        (available / half) / 2.0
    } else {
        MAX_FIT
    }
}

/// Returns `true` if `dest` has no drawable area.
///
/// Zero, negative and NaN extents are all degenerate.
pub fn is_degenerate(dest: Rect) -> bool {
    let (w, h) = (dest.width(), dest.height());
    w.is_nan() || h.is_nan() || w <= 0.0 || h <= 0.0
}

/// Offset that centers a box of size `scaled` inside `dest`.
///
/// The offset is relative to the origin of `dest`. It is negative on an axis
/// where the scaled glyph is larger than the destination.
pub fn centering_offset(scaled: Size, dest: Rect) -> Vec2 {
    Vec2::new(
        (dest.width() - scaled.width) / 2.0,
        (dest.height() - scaled.height) / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_destination_uses_max_fit() {
        let fit = fit_factors(Size::new(46.0, 34.0), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(fit.scale(), MAX_FIT);
        assert_eq!(fit.x_scale, fit.y_scale);
        assert_eq!(fit.x_scale, fit.line_width_scale);
    }

    #[test]
    fn narrow_axis_wins() {
        // Half of 46 is 23 > 11.5, so sx = (11.5 / 23) / 2 = 0.25; sy stays 0.5.
        let fit = fit_factors(Size::new(46.0, 34.0), Rect::new(0.0, 0.0, 11.5, 100.0));
        assert_eq!(fit.scale(), 0.25);
    }

    #[test]
    fn backspace_into_half_its_design_keeps_max_fit() {
        // Shrinking needs half the design to strictly exceed the extent. 23x17 is
        // exactly half of 46x34 on both axes, so neither axis shrinks.
        let fit = fit_factors(Size::new(46.0, 34.0), Rect::new(0.0, 0.0, 23.0, 17.0));
        assert_eq!(fit.scale(), 0.5);
        let fit = fit_factors(Size::new(46.0, 34.0), Rect::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(fit.scale(), 0.5);
        // Just under half on one axis starts shrinking.
        let fit = fit_factors(Size::new(46.0, 34.0), Rect::new(0.0, 0.0, 23.0, 16.0));
        assert!(fit.scale() < 0.5);
    }

    #[test]
    fn exactly_half_the_design_is_not_shrunk() {
        let fit = fit_factors(Size::new(40.0, 40.0), Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(fit.scale(), MAX_FIT);
    }

    #[test]
    fn vestigial_fields_are_constant() {
        let fit = fit_factors(Size::new(37.0, 31.0), Rect::new(0.0, 0.0, 3.0, 2.0));
        assert!(!fit.fill_is_horizontal);
        assert_eq!(fit.offset, 0.0);
    }

    #[test]
    fn degenerate_destinations() {
        assert!(is_degenerate(Rect::new(0.0, 0.0, 0.0, 10.0)));
        assert!(is_degenerate(Rect::new(0.0, 0.0, 10.0, 0.0)));
        assert!(is_degenerate(Rect::new(5.0, 5.0, 1.0, 10.0)));
        assert!(is_degenerate(Rect::new(0.0, 0.0, f64::NAN, 10.0)));
        assert!(!is_degenerate(Rect::new(0.0, 0.0, 0.5, 0.5)));
    }

    #[test]
    fn centering_is_symmetric() {
        let dest = Rect::new(10.0, 20.0, 110.0, 80.0);
        let scaled = Size::new(23.0, 17.0);
        let off = centering_offset(scaled, dest);
        assert_eq!(off, Vec2::new(38.5, 21.5));
        // Equal margins on both sides of each axis.
        assert_eq!(off.x, dest.width() - scaled.width - off.x);
        assert_eq!(off.y, dest.height() - scaled.height - off.y);
    }
}
