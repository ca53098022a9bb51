// Copyright 2026 the Keycap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keycap Glyphs: scale-to-fit vector glyphs for software keyboard keys.
//!
//! This crate draws four key glyphs (backspace, shift, globe and return) into
//! an arbitrary destination rectangle through the [`keycap_imaging`] IR.
//!
//! - [`fit`] computes a uniform shrink-to-fit scale for a design size.
//! - [`canvas`] tracks the current transform over any backend and restores it
//!   with scope guards.
//! - [`geometry`] holds the static outline tables.
//! - [`render`] draws a [`Glyph`] fitted and centered in a rectangle.
//! - [`shape`] hosts a glyph with color, layout and repaint tracking.
//!
//! Glyphs never draw larger than half their design size, and they always
//! keep their aspect ratio. A zero-sized destination draws nothing.
//!
//! # Example
//!
//! ```
//! use keycap_glyphs::{Glyph, render};
//! use keycap_imaging_ref::RefBackend;
//! use kurbo::Rect;
//! use peniko::Color;
//!
//! let mut backend = RefBackend::default();
//! let fit = render(
//!     &mut backend,
//!     Glyph::Return,
//!     Rect::new(0.0, 0.0, 30.0, 20.0),
//!     Color::BLACK,
//! )
//! .expect("non-empty destination");
//! assert_eq!(fit.scale(), 0.5);
//! assert_eq!(backend.events().iter().filter(|e| e.is_draw()).count(), 6);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the Rust standard library.
//! - `libm`: Float math for `no_std` builds.

#![no_std]

extern crate alloc;

pub mod canvas;
pub mod fit;
pub mod geometry;
pub mod render;
pub mod shape;

pub use canvas::{GlyphCanvas, TransformScope};
pub use fit::{FitFactors, fit_factors};
pub use render::{Glyph, draw_glyph, render};
pub use shape::{Shape, ShapeConfig, ShapeGlyph};
