//! An editing session: one model, its undo history and the current axis selection
use std::cell::RefCell;
use std::rc::Rc;

use edit3d_core::{
    Amount, Axes, Axis, MeshModel, MessageSink, ModelHandle, Op, Transform, UndoStack,
};
use tracing::{debug, info};

use crate::config::EditorConfig;

/// An undoable or history-changing request from the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorAction {
    SelectAxes(Axes),
    /// Translate by one step; `-1.0` moves backwards
    Translate(f32),
    /// Rotate by one step; `-1.0` turns the other way
    Rotate(f32),
    ScaleUp,
    ScaleDown,
    Floor,
    Center,
    ToggleWireframe,
    Undo,
    ClearHistory,
}

/// Message sink that keeps the latest warning for the status line.
#[derive(Debug, Default)]
pub struct StatusLine {
    message: RefCell<Option<String>>,
}

impl StatusLine {
    pub fn message(&self) -> Option<String> {
        self.message.borrow().clone()
    }

    pub fn set(&self, message: impl Into<String>) {
        *self.message.borrow_mut() = Some(message.into());
    }

    pub fn clear(&self) {
        *self.message.borrow_mut() = None;
    }
}

impl MessageSink for StatusLine {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
        self.set(message);
    }
}

pub struct EditorSession {
    model: Rc<RefCell<MeshModel>>,
    history: UndoStack,
    axes: Axes,
    config: EditorConfig,
    status: Rc<StatusLine>,
}

impl EditorSession {
    pub fn new(model: MeshModel, config: EditorConfig) -> Self {
        let status = Rc::new(StatusLine::default());
        let mut history = UndoStack::new().with_sink(status.clone());
        if let Some(limit) = config.history_limit {
            history = history.with_limit(limit);
        }
        Self {
            model: model.into_handle(),
            history,
            axes: Axes::All,
            config,
            status,
        }
    }

    pub fn model(&self) -> &Rc<RefCell<MeshModel>> {
        &self.model
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn status(&self) -> Option<String> {
        self.status.message()
    }

    pub fn perform(&mut self, action: EditorAction) {
        self.status.clear();
        let (translate, rotate, factor) = (
            self.config.translate_step,
            self.config.rotate_step(),
            self.config.scale_factor,
        );

        let transform = match action {
            EditorAction::SelectAxes(axes) => {
                self.axes = axes;
                self.status.set(format!("Axis: {axes}"));
                return;
            }
            EditorAction::Undo => {
                if self.history.undo() {
                    self.status.set("Undone");
                }
                return;
            }
            EditorAction::ClearHistory => {
                self.history.clear();
                self.status.set("History cleared");
                return;
            }
            EditorAction::Translate(sign) => self.request(Op::Translate, Some(sign * translate)),
            EditorAction::Rotate(sign) => self.request(Op::Rotate, Some(sign * rotate)),
            EditorAction::ScaleUp => self.request(Op::Scale, Some(factor)),
            EditorAction::ScaleDown => self.request(Op::Scale, Some(factor.recip())),
            EditorAction::Floor => self.request(Op::Floor, None),
            EditorAction::Center => self.request(Op::Center, None),
            EditorAction::ToggleWireframe => self.request(Op::ToggleWireframe, None),
        };

        debug!(?transform, "performing edit");
        if self.history.execute(&transform).is_ok() {
            info!(op = %transform.op(), axes = ?transform.axes(), "edit applied");
        }
    }

    /// Build a transform over the selected axes, repeating `step` on each
    /// axis when all are selected.
    fn request(&self, op: Op, step: Option<f32>) -> Transform {
        let amount = step.map(|step| match self.axes {
            Axes::One(_) => Amount::Scalar(step),
            Axes::All => Amount::Triple([step; 3]),
        });
        let model: ModelHandle = self.model.clone();
        Transform::new(
            op,
            Some(self.axes),
            amount,
            Some(model),
            Some(self.status.clone()),
        )
    }

    /// Short description of the session for the status bar
    pub fn summary(&self) -> String {
        let model = self.model.borrow();
        let position = model
            .bounds()
            .map(|b| {
                let min = Axis::ALL.map(|axis| b.min[axis.index()]);
                format!("min [{:.2} {:.2} {:.2}]", min[0], min[1], min[2])
            })
            .unwrap_or_else(|| "empty".to_string());
        format!(
            "axis {} | undo {} | {}{}",
            self.axes,
            self.history.len(),
            position,
            if model.is_wireframe() { " | wireframe" } else { "" }
        )
    }
}
