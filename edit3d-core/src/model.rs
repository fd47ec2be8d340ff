//! The editable model contract and its mesh-backed implementation
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use nalgebra::{Matrix4, Vector3};

use crate::error::ParseError;
use crate::geometry::{Bounds, Mesh};

/// A single world axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Every axis, in application order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit_vector(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

impl FromStr for Axis {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(ParseError::UnknownAxis(s.to_string())),
        }
    }
}

/// Capabilities a model must expose to be edited by transforms.
///
/// Rotation amounts are radians. All primitives act relative to the
/// model's current state, so repeating a call compounds its effect.
pub trait EditableModel {
    fn translate(&mut self, axis: Axis, amount: f32);
    fn rotate(&mut self, axis: Axis, amount: f32);
    fn scale(&mut self, axis: Axis, amount: f32);
    fn toggle_wireframe(&mut self);

    /// Minimum bound of the model along `axis`.
    fn min(&self, axis: Axis) -> f32;
    /// Center of the model's bounds along `axis`.
    fn center(&self, axis: Axis) -> f32;
}

/// Shared handle to the model an edit targets.
///
/// The editor, every transform, and every stored inverse hold a clone;
/// the model lives as long as any of them. A transform built or applied
/// while the model is borrowed elsewhere rejects with
/// [`Rejection::ModelBusy`](crate::Rejection::ModelBusy) instead of panicking.
pub type ModelHandle = Rc<RefCell<dyn EditableModel>>;

/// A mesh placed in the world by an accumulated model matrix.
///
/// Edits never rewrite vertex data. Each primitive pre-multiplies the
/// matrix, so rotation and scale act about the world origin.
#[derive(Debug, Clone)]
pub struct MeshModel {
    mesh: Mesh,
    matrix: Matrix4<f32>,
    wireframe: bool,
}

impl MeshModel {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            matrix: Matrix4::identity(),
            wireframe: false,
        }
    }

    /// Wrap the model in a handle that can be shared with transforms.
    pub fn into_handle(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    /// World-space bounds, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Bounds> {
        self.mesh.bounds_under(&self.matrix)
    }

    fn premultiply(&mut self, step: Matrix4<f32>) {
        self.matrix = step * self.matrix;
    }
}

impl EditableModel for MeshModel {
    fn translate(&mut self, axis: Axis, amount: f32) {
        self.premultiply(Matrix4::new_translation(&(axis.unit_vector() * amount)));
    }

    fn rotate(&mut self, axis: Axis, amount: f32) {
        self.premultiply(Matrix4::new_rotation(axis.unit_vector() * amount));
    }

    fn scale(&mut self, axis: Axis, amount: f32) {
        let mut factors = Vector3::repeat(1.0);
        factors[axis.index()] = amount;
        self.premultiply(Matrix4::new_nonuniform_scaling(&factors));
    }

    fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
    }

    fn min(&self, axis: Axis) -> f32 {
        self.bounds().map_or(0.0, |b| b.min[axis.index()])
    }

    fn center(&self, axis: Axis) -> f32 {
        self.bounds().map_or(0.0, |b| b.center()[axis.index()])
    }
}
