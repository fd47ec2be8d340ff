//! Discrete model edits that know how to reverse themselves
//!
//! A [`Transform`] is built from an operation request, applied once to its
//! model, and can describe its own inverse. Requests that cannot be carried
//! out degrade to a noop that carries the reason instead of failing.
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use tracing::debug;

use crate::error::{ParseError, Rejection};
use crate::model::{Axis, EditableModel, ModelHandle};
use crate::sink::{default_sink, MessageSink};

/// Requested or resolved operation kind.
///
/// `Floor` and `Center` only appear in requests; they resolve to
/// `Translate` when the transform is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Noop,
    Translate,
    Rotate,
    Scale,
    Floor,
    Center,
    ToggleWireframe,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Op::Noop => "noop",
            Op::Translate => "translate",
            Op::Rotate => "rotate",
            Op::Scale => "scale",
            Op::Floor => "floor",
            Op::Center => "center",
            Op::ToggleWireframe => "toggleWireframe",
        })
    }
}

impl FromStr for Op {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "noop" => Ok(Op::Noop),
            "translate" => Ok(Op::Translate),
            "rotate" => Ok(Op::Rotate),
            "scale" => Ok(Op::Scale),
            "floor" => Ok(Op::Floor),
            "center" => Ok(Op::Center),
            "toggleWireframe" => Ok(Op::ToggleWireframe),
            _ => Err(ParseError::UnknownOp(s.to_string())),
        }
    }
}

/// Which axes an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axes {
    One(Axis),
    All,
}

impl From<Axis> for Axes {
    fn from(axis: Axis) -> Self {
        Axes::One(axis)
    }
}

impl fmt::Display for Axes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axes::One(axis) => axis.fmt(f),
            Axes::All => f.write_str("all"),
        }
    }
}

impl FromStr for Axes {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Axes::All)
        } else {
            s.parse().map(Axes::One)
        }
    }
}

/// Operation amount: a scalar for one axis, an `[x, y, z]` triple for all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Scalar(f32),
    Triple([f32; 3]),
}

impl Amount {
    fn shape(&self) -> &'static str {
        match self {
            Amount::Scalar(_) => "a scalar",
            Amount::Triple(_) => "a triple",
        }
    }
}

impl From<f32> for Amount {
    fn from(amount: f32) -> Self {
        Amount::Scalar(amount)
    }
}

impl From<[f32; 3]> for Amount {
    fn from(amounts: [f32; 3]) -> Self {
        Amount::Triple(amounts)
    }
}

/// Axes and amounts of a resolved edit, kept together so their shapes agree.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Delta {
    One(Axis, f32),
    All([f32; 3]),
}

impl Delta {
    fn new(op: Op, axes: Axes, amount: Amount) -> Result<Self, Rejection> {
        match (axes, amount) {
            (Axes::One(axis), Amount::Scalar(value)) => Ok(Delta::One(axis, value)),
            (Axes::All, Amount::Triple(values)) => Ok(Delta::All(values)),
            (Axes::One(_), found) => Err(Rejection::AmountShape {
                op,
                axes,
                expected: "a scalar",
                found: found.shape(),
            }),
            (Axes::All, found) => Err(Rejection::AmountShape {
                op,
                axes,
                expected: "a triple",
                found: found.shape(),
            }),
        }
    }

    /// Build a delta by asking `per_axis` for each targeted axis.
    fn from_fn(axes: Axes, mut per_axis: impl FnMut(Axis) -> f32) -> Self {
        match axes {
            Axes::One(axis) => Delta::One(axis, per_axis(axis)),
            Axes::All => Delta::All(Axis::ALL.map(per_axis)),
        }
    }

    fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        match self {
            Delta::One(axis, value) => Delta::One(axis, f(value)),
            Delta::All(values) => Delta::All(values.map(f)),
        }
    }

    fn components(&self) -> &[f32] {
        match self {
            Delta::One(_, value) => std::slice::from_ref(value),
            Delta::All(values) => values,
        }
    }

    /// Per-axis calls in replay order: x, y, z, or z, y, x when `reversed`.
    fn steps(self, reversed: bool) -> Vec<(Axis, f32)> {
        let mut steps = match self {
            Delta::One(axis, value) => vec![(axis, value)],
            Delta::All(values) => Axis::ALL.into_iter().zip(values).collect(),
        };
        if reversed {
            steps.reverse();
        }
        steps
    }

    fn axes(&self) -> Axes {
        match self {
            Delta::One(axis, _) => Axes::One(*axis),
            Delta::All(_) => Axes::All,
        }
    }

    fn amount(&self) -> Amount {
        match self {
            Delta::One(_, value) => Amount::Scalar(*value),
            Delta::All(values) => Amount::Triple(*values),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Edit {
    Translate(Delta),
    Rotate(Delta),
    Scale(Delta),
    ToggleWireframe,
}

impl Edit {
    fn op(&self) -> Op {
        match self {
            Edit::Translate(_) => Op::Translate,
            Edit::Rotate(_) => Op::Rotate,
            Edit::Scale(_) => Op::Scale,
            Edit::ToggleWireframe => Op::ToggleWireframe,
        }
    }

    fn delta(&self) -> Option<&Delta> {
        match self {
            Edit::Translate(delta) | Edit::Rotate(delta) | Edit::Scale(delta) => Some(delta),
            Edit::ToggleWireframe => None,
        }
    }

    fn inverse(self) -> Self {
        match self {
            Edit::Translate(delta) => Edit::Translate(delta.map(|v| -v)),
            Edit::Rotate(delta) => Edit::Rotate(delta.map(|v| -v)),
            // Scale amounts are strictly positive by construction.
            Edit::Scale(delta) => Edit::Scale(delta.map(f32::recip)),
            Edit::ToggleWireframe => Edit::ToggleWireframe,
        }
    }
}

enum Kind {
    Noop(Rejection),
    Live { model: ModelHandle, edit: Edit },
}

/// One discrete edit against a model.
pub struct Transform {
    kind: Kind,
    inverse: bool,
    printout: Rc<dyn MessageSink>,
}

impl Transform {
    /// Resolve an operation request against `model`.
    ///
    /// Never fails: a request that cannot be carried out produces a noop
    /// whose [`reason`](Self::reason) says why. `floor` and `center` read
    /// the model's current bounds here, not when the transform is applied.
    /// Without a `printout` sink, warnings go to `tracing`.
    pub fn new(
        op: Op,
        axes: Option<Axes>,
        amount: Option<Amount>,
        model: Option<ModelHandle>,
        printout: Option<Rc<dyn MessageSink>>,
    ) -> Self {
        let kind = match model {
            None => Kind::Noop(Rejection::MissingModel),
            Some(model) => {
                let resolved = match model.try_borrow() {
                    Ok(target) => resolve(op, axes, amount, &*target),
                    Err(_) => Err(Rejection::ModelBusy),
                };
                match resolved {
                    Ok(edit) => Kind::Live { model, edit },
                    Err(reason) => Kind::Noop(reason),
                }
            }
        };
        if let Kind::Noop(reason) = &kind {
            debug!(%op, %reason, "transform request rejected");
        }
        Self {
            kind,
            inverse: false,
            printout: printout.unwrap_or_else(default_sink),
        }
    }

    pub fn translate(axes: Axes, amount: Amount, model: ModelHandle) -> Self {
        Self::new(Op::Translate, Some(axes), Some(amount), Some(model), None)
    }

    pub fn rotate(axes: Axes, amount: Amount, model: ModelHandle) -> Self {
        Self::new(Op::Rotate, Some(axes), Some(amount), Some(model), None)
    }

    pub fn scale(axes: Axes, amount: Amount, model: ModelHandle) -> Self {
        Self::new(Op::Scale, Some(axes), Some(amount), Some(model), None)
    }

    pub fn floor(axes: Axes, model: ModelHandle) -> Self {
        Self::new(Op::Floor, Some(axes), None, Some(model), None)
    }

    pub fn center(axes: Axes, model: ModelHandle) -> Self {
        Self::new(Op::Center, Some(axes), None, Some(model), None)
    }

    pub fn toggle_wireframe(model: ModelHandle) -> Self {
        Self::new(Op::ToggleWireframe, None, None, Some(model), None)
    }

    /// Replace the sink warnings are reported through.
    pub fn with_printout(mut self, printout: Rc<dyn MessageSink>) -> Self {
        self.printout = printout;
        self
    }

    pub fn op(&self) -> Op {
        match &self.kind {
            Kind::Noop(_) => Op::Noop,
            Kind::Live { edit, .. } => edit.op(),
        }
    }

    pub fn axes(&self) -> Option<Axes> {
        self.delta().map(Delta::axes)
    }

    pub fn amount(&self) -> Option<Amount> {
        self.delta().map(Delta::amount)
    }

    /// Why this transform is a noop, if it is one.
    pub fn reason(&self) -> Option<&Rejection> {
        match &self.kind {
            Kind::Noop(reason) => Some(reason),
            Kind::Live { .. } => None,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self.kind, Kind::Noop(_))
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    fn delta(&self) -> Option<&Delta> {
        match &self.kind {
            Kind::Noop(_) => None,
            Kind::Live { edit, .. } => edit.delta(),
        }
    }

    /// Describe the edit that reverses this one, or `None` for a noop.
    ///
    /// The model is not touched.
    pub fn make_inverse(&self) -> Option<Transform> {
        let Kind::Live { model, edit } = &self.kind else {
            return None;
        };
        Some(Transform {
            kind: Kind::Live {
                model: model.clone(),
                edit: edit.inverse(),
            },
            inverse: true,
            printout: self.printout.clone(),
        })
    }

    /// Mutate the model through its per-axis primitives.
    ///
    /// A noop reports its reason through the sink, leaves the model alone,
    /// and returns the reason as an error. So does a model that is
    /// borrowed elsewhere while the edit runs.
    pub fn apply(&self) -> Result<(), Rejection> {
        let (model, edit) = match &self.kind {
            Kind::Noop(reason) => {
                self.printout.warn(&reason.to_string());
                return Err(reason.clone());
            }
            Kind::Live { model, edit } => (model, edit),
        };
        debug!(op = %edit.op(), inverse = self.inverse, "applying transform");

        let Ok(mut model) = model.try_borrow_mut() else {
            let reason = Rejection::ModelBusy;
            self.printout.warn(&reason.to_string());
            return Err(reason);
        };
        match *edit {
            Edit::Translate(delta) => {
                for (axis, amount) in delta.steps(false) {
                    model.translate(axis, amount);
                }
            }
            Edit::Rotate(delta) => {
                // Rotations do not commute, so an inverse unwinds z, y, x.
                for (axis, amount) in delta.steps(self.inverse) {
                    model.rotate(axis, amount);
                }
            }
            Edit::Scale(delta) => {
                for (axis, amount) in delta.steps(false) {
                    model.scale(axis, amount);
                }
            }
            Edit::ToggleWireframe => model.toggle_wireframe(),
        }
        Ok(())
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("op", &self.op())
            .field("axes", &self.axes())
            .field("amount", &self.amount())
            .field("reason", &self.reason())
            .field("inverse", &self.inverse)
            .finish()
    }
}

fn resolve(
    op: Op,
    axes: Option<Axes>,
    amount: Option<Amount>,
    model: &dyn EditableModel,
) -> Result<Edit, Rejection> {
    let axes_for = |op: Op| axes.ok_or(Rejection::MissingAxis { op });
    let delta_for = |op: Op| -> Result<Delta, Rejection> {
        let axes = axes_for(op)?;
        let amount = amount.ok_or(Rejection::MissingAmount { op })?;
        Delta::new(op, axes, amount)
    };

    match op {
        Op::Noop => Err(Rejection::NothingRequested),
        Op::Translate => Ok(Edit::Translate(delta_for(op)?)),
        Op::Rotate => Ok(Edit::Rotate(delta_for(op)?)),
        Op::Scale => {
            let delta = delta_for(op)?;
            if let Some(&bad) = delta
                .components()
                .iter()
                .find(|a| !a.is_finite() || **a <= 0.0)
            {
                return Err(Rejection::InvalidScale { amount: bad });
            }
            Ok(Edit::Scale(delta))
        }
        Op::Floor => Ok(Edit::Translate(Delta::from_fn(axes_for(op)?, |axis| {
            -model.min(axis)
        }))),
        Op::Center => Ok(Edit::Translate(Delta::from_fn(axes_for(op)?, |axis| {
            -model.center(axis)
        }))),
        Op::ToggleWireframe => Ok(Edit::ToggleWireframe),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::geometry::Mesh;
    use crate::model::testing::{Call, RecordingModel};
    use crate::model::MeshModel;
    use crate::sink::testing::RecordingSink;
    use approx::assert_relative_eq;

    fn recording() -> (Rc<RefCell<RecordingModel>>, ModelHandle) {
        let model = Rc::new(RefCell::new(RecordingModel::default()));
        let handle: ModelHandle = model.clone();
        (model, handle)
    }

    #[test]
    fn test_tags_parse() {
        assert_eq!("toggleWireframe".parse::<Op>(), Ok(Op::ToggleWireframe));
        assert_eq!("floor".parse::<Op>(), Ok(Op::Floor));
        assert_eq!(
            "shear".parse::<Op>(),
            Err(ParseError::UnknownOp("shear".to_string()))
        );
        assert_eq!("all".parse::<Axes>(), Ok(Axes::All));
        assert_eq!("y".parse::<Axes>(), Ok(Axes::One(Axis::Y)));
        assert!("xy".parse::<Axes>().is_err());
    }

    #[test]
    fn test_missing_model_is_noop() {
        let sink = Rc::new(RecordingSink::default());
        let transform = Transform::new(
            Op::Translate,
            Some(Axes::One(Axis::X)),
            Some(Amount::Scalar(1.0)),
            None,
            Some(sink.clone()),
        );
        assert_eq!(transform.op(), Op::Noop);
        assert_eq!(transform.reason(), Some(&Rejection::MissingModel));
        assert_eq!(
            transform.reason().map(ToString::to_string).as_deref(),
            Some("Model doesn't exist.")
        );
        assert!(transform.make_inverse().is_none());

        assert_eq!(transform.apply(), Err(Rejection::MissingModel));
        assert_eq!(sink.take(), vec!["Model doesn't exist.".to_string()]);
    }

    #[test]
    fn test_non_positive_scale_is_noop() {
        let (model, handle) = recording();
        let sink = Rc::new(RecordingSink::default());

        for amount in [Amount::Scalar(0.0), Amount::Scalar(-2.0)] {
            let transform = Transform::new(
                Op::Scale,
                Some(Axes::One(Axis::Z)),
                Some(amount),
                Some(handle.clone()),
                Some(sink.clone()),
            );
            assert!(transform.is_noop());
            assert!(!transform.reason().unwrap().to_string().is_empty());
            assert!(transform.apply().is_err());
        }

        let triple = Transform::scale(Axes::All, Amount::Triple([2.0, 0.0, 1.0]), handle.clone())
            .with_printout(sink.clone());
        assert_eq!(
            triple.reason(),
            Some(&Rejection::InvalidScale { amount: 0.0 })
        );
        assert!(triple.apply().is_err());

        let nan = Transform::scale(Axes::One(Axis::X), Amount::Scalar(f32::NAN), handle);
        assert!(nan.is_noop());
        assert_eq!(
            nan.reason().map(ToString::to_string).as_deref(),
            Some("Scale amount must be a positive finite number, got NaN.")
        );

        assert!(model.borrow().calls.is_empty());
        assert_eq!(sink.take().len(), 3);
    }

    #[test]
    fn test_shape_mismatch_is_noop() {
        let (_, handle) = recording();
        let scalar_for_all = Transform::translate(Axes::All, Amount::Scalar(1.0), handle.clone());
        assert!(matches!(
            scalar_for_all.reason(),
            Some(Rejection::AmountShape { .. })
        ));

        let triple_for_one = Transform::rotate(
            Axes::One(Axis::X),
            Amount::Triple([1.0, 2.0, 3.0]),
            handle.clone(),
        );
        assert!(triple_for_one.is_noop());

        let no_amount = Transform::new(Op::Rotate, Some(Axes::All), None, Some(handle.clone()), None);
        assert_eq!(
            no_amount.reason(),
            Some(&Rejection::MissingAmount { op: Op::Rotate })
        );

        let no_axis = Transform::new(Op::Floor, None, None, Some(handle.clone()), None);
        assert_eq!(
            no_axis.reason(),
            Some(&Rejection::MissingAxis { op: Op::Floor })
        );

        let nothing = Transform::new(Op::Noop, None, None, Some(handle), None);
        assert_eq!(nothing.reason(), Some(&Rejection::NothingRequested));
    }

    #[test]
    fn test_floor_all_negates_minimums() {
        let model = Rc::new(RefCell::new(RecordingModel::with_bounds(
            [-2.0, 0.0, 5.0],
            [0.0; 3],
        )));
        let transform = Transform::floor(Axes::All, model.clone());
        assert_eq!(transform.op(), Op::Translate);
        assert_eq!(transform.axes(), Some(Axes::All));
        assert_eq!(transform.amount(), Some(Amount::Triple([2.0, 0.0, -5.0])));
        assert!(model.borrow().calls.is_empty());
    }

    #[test]
    fn test_center_single_axis() {
        let model = Rc::new(RefCell::new(RecordingModel::with_bounds(
            [0.0; 3],
            [1.5, -4.0, 0.25],
        )));
        let transform = Transform::center(Axes::One(Axis::Y), model.clone());
        assert_eq!(transform.op(), Op::Translate);
        assert_eq!(transform.amount(), Some(Amount::Scalar(4.0)));

        transform.apply().unwrap();
        assert_eq!(model.borrow().calls, vec![Call::Translate(Axis::Y, 4.0)]);
    }

    #[test]
    fn test_center_all_negates_centers() {
        let model = Rc::new(RefCell::new(RecordingModel::with_bounds(
            [0.0; 3],
            [1.5, -4.0, 0.25],
        )));
        let transform = Transform::center(Axes::All, model.clone());
        assert_eq!(transform.op(), Op::Translate);
        assert_eq!(transform.axes(), Some(Axes::All));
        assert_eq!(
            transform.amount(),
            Some(Amount::Triple([-1.5, 4.0, -0.25]))
        );
        assert!(model.borrow().calls.is_empty());

        let mesh = MeshModel::new(Mesh::cube(2.0)).into_handle();
        mesh.borrow_mut().translate(Axis::X, 3.0);
        mesh.borrow_mut().translate(Axis::Z, -2.0);

        let center = Transform::center(Axes::All, mesh.clone());
        center.apply().unwrap();
        for axis in Axis::ALL {
            assert_relative_eq!(mesh.borrow().center(axis), 0.0, epsilon = 1e-5);
        }

        center.make_inverse().unwrap().apply().unwrap();
        assert_relative_eq!(mesh.borrow().center(Axis::X), 3.0, epsilon = 1e-5);
        assert_relative_eq!(mesh.borrow().center(Axis::Y), 0.0, epsilon = 1e-5);
        assert_relative_eq!(mesh.borrow().center(Axis::Z), -2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_borrowed_model_is_not_touched() {
        let (model, handle) = recording();
        let sink = Rc::new(RecordingSink::default());

        let held = model.borrow_mut();
        let blocked = Transform::translate(Axes::One(Axis::X), Amount::Scalar(1.0), handle.clone())
            .with_printout(sink.clone());
        assert_eq!(blocked.reason(), Some(&Rejection::ModelBusy));
        drop(held);

        let transform = Transform::translate(Axes::One(Axis::X), Amount::Scalar(1.0), handle)
            .with_printout(sink.clone());
        let held = model.borrow();
        assert_eq!(transform.apply(), Err(Rejection::ModelBusy));
        assert!(held.calls.is_empty());
        drop(held);
        assert_eq!(sink.take(), vec!["Model is already borrowed elsewhere.".to_string()]);

        transform.apply().unwrap();
        assert_eq!(model.borrow().calls, vec![Call::Translate(Axis::X, 1.0)]);
    }

    #[test]
    fn test_translate_and_rotate_inverse_negates() {
        let (_, handle) = recording();

        let translate = Transform::translate(Axes::One(Axis::X), Amount::Scalar(3.5), handle.clone());
        let inverse = translate.make_inverse().unwrap();
        assert!(inverse.is_inverse());
        assert!(!translate.is_inverse());
        assert_eq!(inverse.op(), Op::Translate);
        assert_eq!(inverse.amount(), Some(Amount::Scalar(-3.5)));

        let rotate = Transform::rotate(Axes::All, Amount::Triple([0.1, -0.2, 0.3]), handle);
        let inverse = rotate.make_inverse().unwrap();
        assert_eq!(inverse.axes(), Some(Axes::All));
        assert_eq!(inverse.amount(), Some(Amount::Triple([-0.1, 0.2, -0.3])));
    }

    #[test]
    fn test_scale_inverse_reciprocates() {
        let (_, handle) = recording();
        let scale = Transform::scale(Axes::All, Amount::Triple([2.0, 4.0, 0.5]), handle);
        let inverse = scale.make_inverse().unwrap();
        assert_eq!(inverse.amount(), Some(Amount::Triple([0.5, 0.25, 2.0])));
    }

    #[test]
    fn test_make_inverse_leaves_model_alone() {
        let (model, handle) = recording();
        let transform = Transform::rotate(Axes::One(Axis::Z), Amount::Scalar(1.0), handle);
        let _inverse = transform.make_inverse();
        assert!(model.borrow().calls.is_empty());
    }

    #[test]
    fn test_translate_all_applies_x_y_z() {
        let (model, handle) = recording();
        let transform = Transform::translate(Axes::All, Amount::Triple([1.0, 2.0, 3.0]), handle);
        transform.apply().unwrap();
        transform.make_inverse().unwrap().apply().unwrap();

        assert_eq!(
            model.borrow().calls,
            vec![
                Call::Translate(Axis::X, 1.0),
                Call::Translate(Axis::Y, 2.0),
                Call::Translate(Axis::Z, 3.0),
                Call::Translate(Axis::X, -1.0),
                Call::Translate(Axis::Y, -2.0),
                Call::Translate(Axis::Z, -3.0),
            ]
        );
    }

    #[test]
    fn test_rotate_all_inverse_replays_reversed() {
        let (model, handle) = recording();
        let transform = Transform::rotate(Axes::All, Amount::Triple([0.5, 1.0, 1.5]), handle);
        transform.apply().unwrap();
        transform.make_inverse().unwrap().apply().unwrap();

        assert_eq!(
            model.borrow().calls,
            vec![
                Call::Rotate(Axis::X, 0.5),
                Call::Rotate(Axis::Y, 1.0),
                Call::Rotate(Axis::Z, 1.5),
                Call::Rotate(Axis::Z, -1.5),
                Call::Rotate(Axis::Y, -1.0),
                Call::Rotate(Axis::X, -0.5),
            ]
        );
    }

    #[test]
    fn test_scale_all_uses_each_component() {
        let (model, handle) = recording();
        Transform::scale(Axes::All, Amount::Triple([2.0, 3.0, 4.0]), handle)
            .apply()
            .unwrap();
        assert_eq!(
            model.borrow().calls,
            vec![
                Call::Scale(Axis::X, 2.0),
                Call::Scale(Axis::Y, 3.0),
                Call::Scale(Axis::Z, 4.0),
            ]
        );
    }

    #[test]
    fn test_toggle_wireframe_is_self_inverse() {
        let (model, handle) = recording();
        let toggle = Transform::new(
            Op::ToggleWireframe,
            Some(Axes::All),
            Some(Amount::Scalar(9.0)),
            Some(handle),
            None,
        );
        assert_eq!(toggle.op(), Op::ToggleWireframe);
        assert_eq!(toggle.axes(), None);
        assert_eq!(toggle.amount(), None);

        let inverse = toggle.make_inverse().unwrap();
        assert_eq!(inverse.op(), Op::ToggleWireframe);
        assert!(inverse.is_inverse());

        toggle.apply().unwrap();
        inverse.apply().unwrap();
        assert_eq!(
            model.borrow().calls,
            vec![Call::ToggleWireframe, Call::ToggleWireframe]
        );
    }

    #[test]
    fn test_reapply_compounds() {
        let (model, handle) = recording();
        let transform = Transform::translate(Axes::One(Axis::X), Amount::Scalar(1.0), handle);
        transform.apply().unwrap();
        transform.apply().unwrap();
        assert_eq!(model.borrow().calls.len(), 2);
    }

    #[test]
    fn test_mesh_rotation_round_trip_restores_orientation() {
        let model = MeshModel::new(Mesh::cube(2.0)).into_handle();
        model.borrow_mut().translate(Axis::X, 1.5);
        let before = *model.borrow().matrix();

        let transform = Transform::rotate(Axes::All, Amount::Triple([0.7, -1.1, 2.3]), model.clone());
        transform.apply().unwrap();
        assert!((model.borrow().matrix() - before).norm() > 0.1);

        transform.make_inverse().unwrap().apply().unwrap();
        assert_relative_eq!(*model.borrow().matrix(), before, epsilon = 1e-5);
    }

    #[test]
    fn test_mesh_scale_round_trip() {
        let model = MeshModel::new(Mesh::cube(2.0)).into_handle();
        for amount in [0.01_f32, 0.5, 3.0, 250.0] {
            let before = *model.borrow().matrix();
            let transform = Transform::scale(Axes::One(Axis::Y), Amount::Scalar(amount), model.clone());
            transform.apply().unwrap();
            transform.make_inverse().unwrap().apply().unwrap();
            assert_relative_eq!(*model.borrow().matrix(), before, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_mesh_floor_then_undo() {
        let model = MeshModel::new(Mesh::cube(2.0)).into_handle();
        model.borrow_mut().translate(Axis::Z, -7.0);

        let floor = Transform::floor(Axes::All, model.clone());
        floor.apply().unwrap();
        for axis in Axis::ALL {
            assert_relative_eq!(model.borrow().min(axis), 0.0, epsilon = 1e-5);
        }

        floor.make_inverse().unwrap().apply().unwrap();
        assert_relative_eq!(model.borrow().min(Axis::Z), -8.0, epsilon = 1e-5);
        assert_relative_eq!(model.borrow().min(Axis::X), -1.0, epsilon = 1e-5);
    }
}
