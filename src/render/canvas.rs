use std::{cell::RefCell, rc::Rc};

use crate::foundation::core::BezPath;

/// Backend-agnostic drawing command emitted by strokes.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Stroke an open or closed outline.
    StrokePath {
        /// Outline to stroke, in path units.
        path: BezPath,
        /// Straight RGBA8.
        color: [u8; 4],
        /// Line width in path units.
        width: f64,
        /// Extra opacity in `[0, 1]`.
        opacity: f32,
    },
}

/// Drawing target a character's strokes are attached to.
pub trait Canvas {
    /// Consume one draw command.
    fn draw(&mut self, op: DrawOp);
}

/// Canvas handle shared between a character and every stroke it owns.
pub type SharedCanvas = Rc<RefCell<dyn Canvas>>;

/// Canvas that keeps every op it receives.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty recorder behind a shareable handle.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Ops recorded so far, oldest first.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded ops.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Canvas for RecordingCanvas {
    fn draw(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}
