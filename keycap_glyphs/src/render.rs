// Copyright 2026 the Keycap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph renderers.
//!
//! Each renderer fits its table into the destination rectangle, centers it,
//! and paints every path with a single solid color. A degenerate destination
//! draws nothing and returns `None`.

use keycap_imaging::{Affine, ImagingBackend, StrokeStyle};
use kurbo::{Rect, Size};
use peniko::Color;

use crate::canvas::GlyphCanvas;
use crate::fit::{FitFactors, MAX_FIT, fit_factors, is_degenerate};
use crate::geometry::{
    BACKSPACE, Coordinates, GLOBE, GlyphPath, GlyphTable, PaintMode, RETURN, SHIFT,
    SHIFT_LOCK_BAR, SHIFT_WITH_LOCK_HEIGHT,
};

/// Core Graphics style miter limit, used by every stroked glyph path.
const MITER_LIMIT: f64 = 10.0;

/// The glyphs this crate can draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Delete-backward key.
    Backspace,
    /// Shift key, optionally with the caps-lock bar.
    Shift {
        /// Draw the bar under the arrow.
        with_lock: bool,
    },
    /// Input-mode switch key.
    Globe,
    /// Return key.
    Return,
}

impl Glyph {
    /// Outline table for this glyph, without the shift lock bar.
    pub fn table(self) -> GlyphTable {
        match self {
            Self::Backspace => BACKSPACE,
            Self::Shift { .. } => SHIFT,
            Self::Globe => GLOBE,
            Self::Return => RETURN,
        }
    }

    /// Size of the glyph in design units, used for fitting.
    pub fn design_size(self) -> Size {
        match self {
            Self::Shift { with_lock: true } => {
                Size::new(SHIFT.design_size.width, SHIFT_WITH_LOCK_HEIGHT)
            }
            _ => self.table().design_size,
        }
    }
}

/// Draws `glyph` into `dest`.
///
/// Returns the fit used, or `None` if `dest` is degenerate and nothing was
/// drawn. The canvas transform is the same on return as on entry.
pub fn draw_glyph<B: ImagingBackend + ?Sized>(
    canvas: &mut GlyphCanvas<'_, B>,
    glyph: Glyph,
    dest: Rect,
    color: Color,
) -> Option<FitFactors> {
    let extra = match glyph {
        Glyph::Shift { with_lock: true } => Some(&SHIFT_LOCK_BAR),
        _ => None,
    };
    draw_table(canvas, glyph.table(), glyph.design_size(), extra, dest, color)
}

/// Draws the backspace glyph. See [`draw_glyph`].
///
/// The backspace table is traced at [`MAX_FIT`] inside its group transform, so
/// its coordinates and stroke widths are multiplied by `s / MAX_FIT` (that is
/// `2s`) rather than by [`FitFactors::line_width_scale`]. At `s = MAX_FIT`
/// the traced widths are drawn unchanged.
pub fn draw_backspace<B: ImagingBackend + ?Sized>(
    canvas: &mut GlyphCanvas<'_, B>,
    dest: Rect,
    color: Color,
) -> Option<FitFactors> {
    draw_glyph(canvas, Glyph::Backspace, dest, color)
}

/// Draws the shift glyph, with the lock bar when `with_lock` is set.
pub fn draw_shift<B: ImagingBackend + ?Sized>(
    canvas: &mut GlyphCanvas<'_, B>,
    dest: Rect,
    color: Color,
    with_lock: bool,
) -> Option<FitFactors> {
    draw_glyph(canvas, Glyph::Shift { with_lock }, dest, color)
}

/// Draws the globe glyph. See [`draw_glyph`].
pub fn draw_globe<B: ImagingBackend + ?Sized>(
    canvas: &mut GlyphCanvas<'_, B>,
    dest: Rect,
    color: Color,
) -> Option<FitFactors> {
    draw_glyph(canvas, Glyph::Globe, dest, color)
}

/// Draws the return glyph. See [`draw_glyph`].
///
/// The return table is traced at [`MAX_FIT`] inside its group transform, so
/// its coordinates and stroke widths are multiplied by `s / MAX_FIT` (that is
/// `2s`) rather than by [`FitFactors::line_width_scale`]. At `s = MAX_FIT`
/// the traced widths are drawn unchanged.
pub fn draw_return<B: ImagingBackend + ?Sized>(
    canvas: &mut GlyphCanvas<'_, B>,
    dest: Rect,
    color: Color,
) -> Option<FitFactors> {
    draw_glyph(canvas, Glyph::Return, dest, color)
}

/// Draws `glyph` directly onto a backend whose current transform is the
/// identity, releasing every resource it created before returning.
pub fn render<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    glyph: Glyph,
    dest: Rect,
    color: Color,
) -> Option<FitFactors> {
    let mut canvas = GlyphCanvas::new(backend);
    draw_glyph(&mut canvas, glyph, dest, color)
}

fn draw_table<B: ImagingBackend + ?Sized>(
    canvas: &mut GlyphCanvas<'_, B>,
    table: GlyphTable,
    design: Size,
    extra: Option<&GlyphPath>,
    dest: Rect,
    color: Color,
) -> Option<FitFactors> {
    if is_degenerate(dest) {
        log::debug!("skipping glyph draw into degenerate rect {dest:?}");
        return None;
    }

    let fit = fit_factors(design, dest);
    let scale = match table.coordinates {
        Coordinates::Fitted => fit.scale(),
        Coordinates::Native => fit.scale() / MAX_FIT,
    };
    let paths = table.paths.iter().chain(extra);

    let mut centered = canvas.center(fit.scaled_size(design), dest);
    match table.group {
        Some(group) => {
            let mut grouped = centered
                .scoped(Affine::translate(group.translate) * Affine::scale(group.scale));
            draw_paths(&mut *grouped, paths, scale, color);
        }
        None => draw_paths(&mut *centered, paths, scale, color),
    }
    Some(fit)
}

fn draw_paths<'p, B: ImagingBackend + ?Sized>(
    canvas: &mut GlyphCanvas<'_, B>,
    paths: impl Iterator<Item = &'p GlyphPath>,
    scale: f64,
    color: Color,
) {
    for path in paths {
        match path.offset {
            Some(offset) => {
                let mut nested = canvas.scoped(Affine::translate(offset * scale));
                paint_path(&mut *nested, path, scale, color);
            }
            None => paint_path(canvas, path, scale, color),
        }
    }
}

fn paint_path<B: ImagingBackend + ?Sized>(
    canvas: &mut GlyphCanvas<'_, B>,
    path: &GlyphPath,
    scale: f64,
    color: Color,
) {
    let outline = path.to_path(scale);
    match path.paint {
        PaintMode::Fill => canvas.fill(&outline, color),
        PaintMode::Stroke { width, cap, join } => {
            let style = StrokeStyle::new(width * scale)
                .with_caps(cap)
                .with_join(join)
                .with_miter_limit(MITER_LIMIT);
            canvas.stroke(&outline, &style, color);
        }
    }
}
