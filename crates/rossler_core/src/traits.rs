use nalgebra::Vector3;

/// A point `(x, y, z)` in phase space.
pub type State = Vector3<f64>;

/// A deviation vector `(dx, dy, dz)` evolved under the linearized flow.
pub type Tangent = Vector3<f64>;

/// A flow together with its variational equation.
pub trait VectorField {
    /// Evaluates the flow and the Jacobian-vector product at `state`.
    /// Returns `(state_dot, tangent_dot)` with `tangent_dot = J(state) * tangent`.
    fn derivatives(&self, state: &State, tangent: &Tangent) -> (State, Tangent);
}

/// A one-parameter family of flows, e.g. the Rossler system indexed by `b`.
pub trait ParameterizedField {
    type Field: VectorField;

    /// Instantiates the member of the family at `parameter`.
    fn at(&self, parameter: f64) -> Self::Field;
}

/// A trait for solvers that can step a state and its tangent forward together.
pub trait Steppable {
    /// Performs one step of size dt.
    /// t: current time (updated after step)
    /// state, tangent: updated in place with the same dt
    fn step(
        &mut self,
        field: &impl VectorField,
        t: &mut f64,
        state: &mut State,
        tangent: &mut Tangent,
        dt: f64,
    );
}
