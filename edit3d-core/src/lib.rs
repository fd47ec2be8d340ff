//! edit3d core library - undoable edits on 3D models
//!
//! Discrete transforms (translate, rotate, scale, floor, center, wireframe
//! toggle) are applied to a shared model handle, produce their own inverses,
//! and are undone through a linear [`UndoStack`]. The mesh model, STL loader
//! and camera are the pieces an editor needs around that core.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod model;
pub mod sink;
pub mod stl;
pub mod transform;
pub mod undo;

// Re-export commonly used types
pub use camera::{Camera, ProjectionMode, RotationState, ScreenPoint};
pub use error::{ParseError, Rejection};
pub use geometry::{Bounds, Mesh, Triangle, Vertex};
pub use model::{Axis, EditableModel, MeshModel, ModelHandle};
pub use sink::{MessageSink, TracingSink};
pub use transform::{Amount, Axes, Op, Transform};
pub use undo::{UndoStack, EMPTY_HISTORY};
