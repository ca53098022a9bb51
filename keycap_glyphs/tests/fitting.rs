// Copyright 2026 the Keycap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting, centering and transform restoration of the glyph renderers,
//! observed through the reference backend.

use std::panic::{AssertUnwindSafe, catch_unwind};

use keycap_glyphs::fit::{MAX_FIT, centering_offset};
use keycap_glyphs::{Glyph, GlyphCanvas, draw_glyph, fit_factors, render};
use keycap_imaging::{
    Affine, DrawOp, ImagingBackend, ImagingOp, PaintDesc, PaintId, PathCmd, PathDesc, PathId,
    ResourceBackend, StateOp,
};
use keycap_imaging_ref::{Event, RefBackend};
use kurbo::{Rect, Size};
use peniko::{Brush, Color};

const ALL: [Glyph; 5] = [
    Glyph::Backspace,
    Glyph::Shift { with_lock: false },
    Glyph::Shift { with_lock: true },
    Glyph::Globe,
    Glyph::Return,
];

/// A render with resource ids replaced by what they resolved to.
#[derive(Clone, Debug, PartialEq)]
enum Step {
    Transform(Affine),
    Stroke(f64),
    Fill(PathDesc),
    StrokePath(PathDesc),
    Other,
}

fn steps(backend: &RefBackend) -> Vec<Step> {
    backend
        .events()
        .iter()
        .map(|event| match event {
            Event::State {
                op: StateOp::SetTransform(xf),
                ..
            } => Step::Transform(*xf),
            Event::State {
                op: StateOp::SetStroke(style),
                ..
            } => Step::Stroke(style.width),
            Event::Draw {
                op: DrawOp::FillPath(_),
                path: Some(path),
                ..
            } => Step::Fill(path.clone()),
            Event::Draw {
                op: DrawOp::StrokePath(_),
                path: Some(path),
                ..
            } => Step::StrokePath(path.clone()),
            _ => Step::Other,
        })
        .collect()
}

fn first_transform(backend: &RefBackend) -> Affine {
    match backend.ops().first() {
        Some(ImagingOp::State(StateOp::SetTransform(xf))) => *xf,
        other => panic!("expected the centering transform first, got {other:?}"),
    }
}

#[test]
fn narrow_destination_shrinks_to_a_quarter() {
    // Half the backspace width is 23, so an 11.5 wide rect gives (11.5 / 23) / 2.
    let dest = Rect::new(0.0, 0.0, 11.5, 100.0);
    let mut backend = RefBackend::default();
    let fit = render(&mut backend, Glyph::Backspace, dest, Color::BLACK).expect("drawable rect");
    assert_eq!(fit.scale(), 0.25);

    let widths: Vec<f64> = steps(&backend)
        .into_iter()
        .filter_map(|s| match s {
            Step::Stroke(w) => Some(w),
            _ => None,
        })
        .collect();
    assert_eq!(widths, [1.5, 1.5, 1.5], "widths shrink with the glyph");

    let Some(Step::StrokePath(outline)) = steps(&backend)
        .into_iter()
        .find(|s| matches!(s, Step::StrokePath(_)))
    else {
        panic!("backspace strokes its outline");
    };
    let PathCmd::MoveTo { x, y } = outline.commands[0] else {
        panic!("outline starts with a move");
    };
    assert!((x - 9.14).abs() < 1e-5, "x was {x}");
    assert_eq!(y, 0.75);
}

#[test]
fn half_size_destination_keeps_native_widths() {
    // 23x17 is exactly half of 46x34. Shrinking only starts once half the
    // design strictly exceeds the destination, so the fit stays at 0.5.
    let dest = Rect::new(0.0, 0.0, 23.0, 17.0);
    let mut backend = RefBackend::default();
    let fit = render(&mut backend, Glyph::Backspace, dest, Color::BLACK).expect("drawable rect");
    assert_eq!(fit.scale(), 0.5);

    let widths: Vec<f64> = steps(&backend)
        .into_iter()
        .filter_map(|s| match s {
            Step::Stroke(w) => Some(w),
            _ => None,
        })
        .collect();
    assert_eq!(widths, [3.0, 3.0, 3.0]);
    assert_eq!(first_transform(&backend), Affine::IDENTITY);
}

#[test]
fn roomy_destination_uses_max_fit() {
    let mut backend = RefBackend::default();
    let fit = render(
        &mut backend,
        Glyph::Globe,
        Rect::new(0.0, 0.0, 400.0, 400.0),
        Color::BLACK,
    )
    .expect("drawable rect");
    assert_eq!(fit.scale(), MAX_FIT);
}

#[test]
fn scale_is_bounded_and_monotonic() {
    for glyph in ALL {
        let mut previous = f64::INFINITY;
        for side in [200.0, 60.0, 30.0, 19.0, 12.0, 5.0, 1.0, 0.1] {
            let dest = Rect::new(0.0, 0.0, side, side * 0.75);
            let s = fit_factors(glyph.design_size(), dest).scale();
            assert!(s > 0.0 && s <= MAX_FIT, "{glyph:?} at {side}: {s}");
            assert!(s <= previous, "{glyph:?} grew when shrinking to {side}");
            previous = s;
        }
    }
}

#[test]
fn glyphs_are_centered_in_the_destination() {
    let dest = Rect::new(7.0, 3.0, 107.0, 63.0);
    for glyph in ALL {
        let mut backend = RefBackend::default();
        let fit = render(&mut backend, glyph, dest, Color::BLACK).expect("drawable rect");
        let scaled = fit.scaled_size(glyph.design_size());
        let offset = centering_offset(scaled, dest);

        assert_eq!(
            first_transform(&backend),
            Affine::translate((dest.x0 + offset.x, dest.y0 + offset.y)),
            "{glyph:?}"
        );
        let right = dest.width() - scaled.width - offset.x;
        let bottom = dest.height() - scaled.height - offset.y;
        assert!((right - offset.x).abs() < 1e-9, "{glyph:?} horizontal margins");
        assert!((bottom - offset.y).abs() < 1e-9, "{glyph:?} vertical margins");
    }
}

#[test]
fn shift_example_offset() {
    // 38x32 at 0.5 is 19x16, centered in 100x60.
    let mut backend = RefBackend::default();
    render(
        &mut backend,
        Glyph::Shift { with_lock: false },
        Rect::new(0.0, 0.0, 100.0, 60.0),
        Color::BLACK,
    );
    assert_eq!(first_transform(&backend), Affine::translate((40.5, 22.0)));
}

#[test]
fn rendering_is_idempotent() {
    let dest = Rect::new(2.0, 2.0, 30.0, 22.0);
    for glyph in ALL {
        let mut first = RefBackend::default();
        let mut second = RefBackend::default();
        render(&mut first, glyph, dest, Color::BLACK);
        render(&mut second, glyph, dest, Color::BLACK);
        render(&mut second, glyph, dest, Color::BLACK);

        let once = steps(&first);
        let twice = steps(&second);
        assert_eq!(twice.len(), once.len() * 2, "{glyph:?}");
        assert_eq!(twice[..once.len()], once[..], "{glyph:?} first pass");
        assert_eq!(twice[once.len()..], once[..], "{glyph:?} second pass");
    }
}

#[test]
fn lock_adds_one_fill() {
    let dest = Rect::new(0.0, 0.0, 40.0, 40.0);
    let fills = |with_lock| {
        let mut backend = RefBackend::default();
        render(&mut backend, Glyph::Shift { with_lock }, dest, Color::BLACK);
        steps(&backend)
            .iter()
            .filter(|s| matches!(s, Step::Fill(_)))
            .count()
    };
    assert_eq!(fills(false), 1);
    assert_eq!(fills(true), 2);
}

/// Bounding box of a path's on-curve and control points.
fn bounds_of(path: &PathDesc) -> Rect {
    let mut bounds: Option<Rect> = None;
    let mut add = |x: f32, y: f32| {
        let p = kurbo::Point::new(f64::from(x), f64::from(y));
        bounds = Some(match bounds {
            Some(b) => b.union_pt(p),
            None => Rect::from_points(p, p),
        });
    };
    for cmd in path.commands.iter() {
        match *cmd {
            PathCmd::MoveTo { x, y } | PathCmd::LineTo { x, y } => add(x, y),
            PathCmd::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                add(x1, y1);
                add(x2, y2);
                add(x, y);
            }
            PathCmd::Close => {}
        }
    }
    bounds.expect("path has points")
}

#[test]
fn lock_bar_sits_below_the_body_and_scales_with_it() {
    // 38x38 with the bar; half is 19, so 9.5 gives s = 0.25 and 100 gives 0.5.
    for (side, s) in [(9.5, 0.25), (100.0, 0.5)] {
        let mut backend = RefBackend::default();
        let fit = render(
            &mut backend,
            Glyph::Shift { with_lock: true },
            Rect::new(0.0, 0.0, side, side),
            Color::BLACK,
        )
        .expect("drawable rect");
        assert_eq!(fit.scale(), s);

        let fills: Vec<(PathDesc, Affine)> = backend
            .events()
            .iter()
            .filter_map(|event| match event {
                Event::Draw {
                    op: DrawOp::FillPath(_),
                    path: Some(path),
                    state,
                    ..
                } => Some((path.clone(), state.transform)),
                _ => None,
            })
            .collect();
        let [(body, body_xf), (bar, bar_xf)] = &fills[..] else {
            panic!("expected the arrow and the bar, got {} fills", fills.len());
        };

        assert_eq!(bar_xf, body_xf, "the bar is drawn in the body's space");
        assert_eq!(
            bounds_of(bar),
            Rect::new(10.0 * s, 34.0 * s, 28.0 * s, 38.0 * s),
            "bar at {s}"
        );
        let body = bounds_of(body);
        assert_eq!(body.y1, 32.0 * s, "body bottom at {s}");
        assert!(bounds_of(bar).y0 > body.y1, "bar is below the body at {s}");
    }
}

#[test]
fn degenerate_destinations_emit_nothing() {
    let rects = [
        Rect::new(0.0, 0.0, 0.0, 0.0),
        Rect::new(0.0, 0.0, 30.0, 0.0),
        Rect::new(0.0, 0.0, 0.0, 30.0),
        Rect::new(10.0, 10.0, 0.0, 30.0),
        Rect::new(0.0, 0.0, f64::NAN, 30.0),
    ];
    for glyph in ALL {
        for dest in rects {
            let mut backend = RefBackend::default();
            assert!(render(&mut backend, glyph, dest, Color::BLACK).is_none());
            assert!(backend.ops().is_empty(), "{glyph:?} drew into {dest:?}");
            assert_eq!(backend.live_resources(), 0);
        }
    }
}

#[test]
fn every_draw_uses_the_requested_color() {
    let color = Color::from_rgba8(12, 34, 56, 255);
    for glyph in ALL {
        let mut backend = RefBackend::default();
        render(&mut backend, glyph, Rect::new(0.0, 0.0, 50.0, 50.0), color);
        for event in backend.events() {
            if let Event::Draw { paint, .. } = event {
                assert_eq!(
                    paint.as_ref().map(|p| p.brush.clone()),
                    Some(Brush::Solid(color)),
                    "{glyph:?}"
                );
            }
        }
    }
}

#[test]
fn transform_is_restored_onto_the_base() {
    let base = Affine::translate((100.0, 40.0)) * Affine::scale(2.0);
    for glyph in ALL {
        let mut backend = RefBackend::default();
        {
            let mut canvas = GlyphCanvas::with_transform(&mut backend, base);
            draw_glyph(
                &mut canvas,
                glyph,
                Rect::new(0.0, 0.0, 25.0, 25.0),
                Color::BLACK,
            );
            assert_eq!(canvas.transform(), base, "{glyph:?}");
        }
        assert_eq!(backend.current_state().transform, base, "{glyph:?}");
        assert_eq!(backend.live_resources(), 0, "{glyph:?} leaked resources");
    }
}

/// Backend that panics on a given draw, to simulate a failing draw call.
#[derive(Debug)]
struct FailingBackend {
    inner: RefBackend,
    draws_before_failure: usize,
}

impl ResourceBackend for FailingBackend {
    fn create_path(&mut self, desc: PathDesc) -> PathId {
        self.inner.create_path(desc)
    }

    fn destroy_path(&mut self, id: PathId) {
        self.inner.destroy_path(id);
    }

    fn create_paint(&mut self, desc: PaintDesc) -> PaintId {
        self.inner.create_paint(desc)
    }

    fn destroy_paint(&mut self, id: PaintId) {
        self.inner.destroy_paint(id);
    }
}

impl ImagingBackend for FailingBackend {
    fn state(&mut self, op: StateOp) {
        self.inner.state(op);
    }

    fn draw(&mut self, op: DrawOp) {
        if self.draws_before_failure == 0 {
            panic!("draw failed");
        }
        self.draws_before_failure -= 1;
        self.inner.draw(op);
    }
}

#[test]
fn transform_is_restored_when_drawing_fails() {
    for glyph in [Glyph::Globe, Glyph::Return, Glyph::Backspace] {
        let mut backend = FailingBackend {
            inner: RefBackend::default(),
            draws_before_failure: 1,
        };
        let result = catch_unwind(AssertUnwindSafe(|| {
            render(
                &mut backend,
                glyph,
                Rect::new(5.0, 5.0, 45.0, 45.0),
                Color::BLACK,
            )
        }));
        assert!(result.is_err(), "{glyph:?} should have failed");
        assert_eq!(
            backend.inner.current_state().transform,
            Affine::IDENTITY,
            "{glyph:?} left a transform behind"
        );
        assert_eq!(backend.inner.live_resources(), 0, "{glyph:?}");
    }
}

#[test]
fn nested_tick_offset_scales_with_the_glyph() {
    let at = |dest: Rect| {
        let mut backend = RefBackend::default();
        render(&mut backend, Glyph::Return, dest, Color::BLACK);
        let transforms: Vec<Affine> = steps(&backend)
            .into_iter()
            .filter_map(|s| match s {
                Step::Transform(xf) => Some(xf),
                _ => None,
            })
            .collect();
        // centered, grouped, tick, grouped (restored), centered (restored), identity.
        assert_eq!(transforms.len(), 6);
        (transforms[1].inverse() * transforms[2]).translation()
    };
    let full = at(Rect::new(0.0, 0.0, 100.0, 100.0));
    assert!((full.x - 29.36).abs() < 1e-9, "x was {}", full.x);
    assert!((full.y - 15.25).abs() < 1e-9, "y was {}", full.y);
    // Half the return width is 18.5; 9.25 wide halves the fit.
    let shrunk = at(Rect::new(0.0, 0.0, 9.25, 100.0));
    assert!((shrunk.x - 14.68).abs() < 1e-9, "x was {}", shrunk.x);
    assert!((shrunk.y - 7.625).abs() < 1e-9, "y was {}", shrunk.y);
}

#[test]
fn design_sizes_drive_the_fit() {
    let dest = Rect::new(0.0, 0.0, 19.0, 16.0);
    // Shift is exactly 38x32, so it just fits at 0.5. The lock bar makes it taller.
    assert_eq!(
        fit_factors(Glyph::Shift { with_lock: false }.design_size(), dest).scale(),
        0.5
    );
    let locked = fit_factors(Glyph::Shift { with_lock: true }.design_size(), dest).scale();
    assert!(locked < 0.5, "lock bar should need more room, got {locked}");
    assert_eq!(Glyph::Globe.design_size(), Size::new(41.0, 40.0));
}
