// Copyright 2026 the Keycap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keycap Imaging Reference Backend.
//!
//! This crate provides a small, stateful implementation of
//! [`ImagingBackend`] and [`ResourceBackend`]
//! for **IR logging and state tracing**.
//!
//! It is intentionally *not* a renderer:
//! - It does **not** rasterize to pixels.
//! - It is intended primarily for tests and debugging that want to assert on
//!   emitted ops, the imaging state at the time each op is applied, and the
//!   geometry each draw actually used.
//!
//! Draw events resolve their path and paint at draw time, so a log stays
//! meaningful after the drawing code has destroyed its resources.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use keycap_imaging::{
    Affine, DrawOp, ImagingBackend, ImagingOp, PaintDesc, PaintId, PathDesc, PathId,
    ResourceBackend, StateOp, StrokeStyle,
};

/// Snapshot of the current imaging state inside the backend.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StateSnapshot {
    /// Current transform.
    pub transform: Affine,
    /// Current paint, if set.
    pub paint: Option<PaintId>,
    /// Current stroke style, if set.
    pub stroke: Option<StrokeStyle>,
}

/// Event recorded by the reference backend.
#[derive(Clone, Debug)]
pub enum Event {
    /// State operation and the resulting state snapshot.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Snapshot after applying the state operation.
        state: StateSnapshot,
    },
    /// Draw operation and the state snapshot used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// Snapshot at the time of drawing.
        state: StateSnapshot,
        /// Path geometry referenced by the op, resolved at draw time.
        path: Option<PathDesc>,
        /// Current paint, resolved at draw time.
        paint: Option<PaintDesc>,
    },
}

impl Event {
    /// Returns `true` if this is a draw event.
    pub fn is_draw(&self) -> bool {
        matches!(self, Self::Draw { .. })
    }
}

/// Simple reference implementation of the imaging backend.
///
/// This backend:
/// - Stores resource descriptors in vectors keyed by their IDs,
/// - Tracks current imaging state,
/// - Logs high-level [`Event`]s as state and draw operations are applied.
#[derive(Default, Debug)]
pub struct RefBackend {
    paths: Vec<Option<PathDesc>>,
    paints: Vec<Option<PaintDesc>>,

    /// Log of events in the order they were applied.
    events: Vec<Event>,
    /// Underlying imaging ops.
    ops: Vec<ImagingOp>,
    /// Current imaging state.
    state: StateSnapshot,
}

impl RefBackend {
    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns a slice of raw imaging operations.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// Returns the current imaging state.
    pub fn current_state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Returns the live path resource for `id`, if it has not been destroyed.
    pub fn path(&self, id: PathId) -> Option<&PathDesc> {
        self.paths.get(id.0 as usize)?.as_ref()
    }

    /// Returns the live paint resource for `id`, if it has not been destroyed.
    pub fn paint(&self, id: PaintId) -> Option<&PaintDesc> {
        self.paints.get(id.0 as usize)?.as_ref()
    }

    /// Number of path and paint resources that are still alive.
    pub fn live_resources(&self) -> usize {
        self.paths.iter().filter(|p| p.is_some()).count()
            + self.paints.iter().filter(|p| p.is_some()).count()
    }

    /// Clears all recorded events and ops but keeps resources.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.ops.clear();
    }
}

impl ResourceBackend for RefBackend {
    fn create_path(&mut self, desc: PathDesc) -> PathId {
        let id =
            u32::try_from(self.paths.len()).expect("RefBackend: too many paths for u32 PathId");
        self.paths.push(Some(desc));
        PathId(id)
    }

    fn destroy_path(&mut self, id: PathId) {
        let idx = id.0 as usize;
        if let Some(slot) = self.paths.get_mut(idx) {
            *slot = None;
        }
    }

    fn create_paint(&mut self, desc: PaintDesc) -> PaintId {
        let id =
            u32::try_from(self.paints.len()).expect("RefBackend: too many paints for u32 PaintId");
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

impl ImagingBackend for RefBackend {
    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::SetTransform(tx) => self.state.transform = *tx,
            StateOp::SetPaint(id) => self.state.paint = Some(*id),
            StateOp::SetStroke(style) => self.state.stroke = Some(style.clone()),
        }

        self.ops.push(ImagingOp::State(op.clone()));
        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn draw(&mut self, op: DrawOp) {
        let (DrawOp::FillPath(id) | DrawOp::StrokePath(id)) = &op;
        let path = self.path(*id).cloned();
        let paint = self.state.paint.and_then(|id| self.paint(id).cloned());

        self.ops.push(ImagingOp::Draw(op.clone()));
        self.events.push(Event::Draw {
            op,
            state: self.state.clone(),
            path,
            paint,
        });
    }
}
