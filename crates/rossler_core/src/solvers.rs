use crate::grid::TimeGrid;
use crate::lyapunov::LyapunovEstimator;
use crate::traits::{State, Steppable, Tangent, VectorField};
use crate::trajectory::Trajectory;
use serde::{Deserialize, Serialize};

/// Explicit (forward) Euler: `next = current + dt * f(current)`.
/// First order; the reference scheme for the sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardEuler;

impl Steppable for ForwardEuler {
    fn step(
        &mut self,
        field: &impl VectorField,
        t: &mut f64,
        state: &mut State,
        tangent: &mut Tangent,
        dt: f64,
    ) {
        let (state_dot, tangent_dot) = field.derivatives(state, tangent);
        *state += state_dot * dt;
        *tangent += tangent_dot * dt;
        *t += dt;
    }
}

/// Classic Runge-Kutta 4th Order Solver on the coupled (state, tangent) system
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

impl Steppable for Rk4 {
    fn step(
        &mut self,
        field: &impl VectorField,
        t: &mut f64,
        state: &mut State,
        tangent: &mut Tangent,
        dt: f64,
    ) {
        let half = 0.5 * dt;

        // k1 = f(y)
        let (k1, l1) = field.derivatives(state, tangent);
        // k2 = f(y + dt*k1/2)
        let (k2, l2) = field.derivatives(&(*state + k1 * half), &(*tangent + l1 * half));
        // k3 = f(y + dt*k2/2)
        let (k3, l3) = field.derivatives(&(*state + k2 * half), &(*tangent + l2 * half));
        // k4 = f(y + dt*k3)
        let (k4, l4) = field.derivatives(&(*state + k3 * dt), &(*tangent + l3 * dt));

        // y_next = y + dt/6 * (k1 + 2k2 + 2k3 + k4)
        let sixth = dt / 6.0;
        *state += (k1 + k2 * 2.0 + k3 * 2.0 + k4) * sixth;
        *tangent += (l1 + l2 * 2.0 + l3 * 2.0 + l4) * sixth;
        *t += dt;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepperKind {
    #[default]
    Euler,
    Rk4,
}

impl StepperKind {
    fn build(self) -> InternalStepper {
        match self {
            StepperKind::Euler => InternalStepper::Euler(ForwardEuler),
            StepperKind::Rk4 => InternalStepper::Rk4(Rk4),
        }
    }
}

enum InternalStepper {
    Euler(ForwardEuler),
    Rk4(Rk4),
}

impl InternalStepper {
    fn step(
        &mut self,
        field: &impl VectorField,
        t: &mut f64,
        state: &mut State,
        tangent: &mut Tangent,
        dt: f64,
    ) {
        match self {
            InternalStepper::Euler(s) => s.step(field, t, state, tangent, dt),
            InternalStepper::Rk4(s) => s.step(field, t, state, tangent, dt),
        }
    }
}

/// Fixed-step integrator over a `TimeGrid`.
pub struct Integrator {
    stepper: InternalStepper,
    start: f64,
    dt: f64,
    steps: usize,
}

impl Integrator {
    pub fn new(kind: StepperKind, grid: &TimeGrid) -> Self {
        Self {
            stepper: kind.build(),
            start: grid.start,
            dt: grid.step,
            steps: grid.steps(),
        }
    }

    /// Number of steps N per run.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Integrates N steps from `(state, tangent)`, writing all N + 1 states into
    /// `trajectory` and feeding every tangent to `estimator`. Returns the last state.
    pub fn run(
        &mut self,
        field: &impl VectorField,
        mut state: State,
        mut tangent: Tangent,
        trajectory: &mut Trajectory,
        estimator: &mut LyapunovEstimator,
    ) -> State {
        trajectory.resize(self.steps + 1);
        trajectory.set(0, &state);

        let mut t = self.start;
        for i in 0..self.steps {
            estimator.before_step(&mut tangent);
            self.stepper.step(field, &mut t, &mut state, &mut tangent, self.dt);
            estimator.after_step(&tangent, self.dt);
            trajectory.set(i + 1, &state);
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyapunov::LyapunovMode;
    use crate::system::Rossler;

    struct Exponential {
        rate: f64,
    }

    impl VectorField for Exponential {
        fn derivatives(&self, state: &State, tangent: &Tangent) -> (State, Tangent) {
            (state * self.rate, tangent * self.rate)
        }
    }

    #[test]
    fn euler_step_matches_explicit_formula() {
        let system = Rossler::new(0.4);
        let mut state = State::new(0.5, 0.3, -1.0);
        let mut tangent = Tangent::new(1.0, 0.0, 0.0);
        let (state_dot, tangent_dot) = system.derivatives(&state, &tangent);
        let dt = 0.01;
        let mut t = 1.0;

        ForwardEuler.step(&system, &mut t, &mut state, &mut tangent, dt);

        assert_eq!(state.x, 0.5 + dt * state_dot.x);
        assert_eq!(state.y, 0.3 + dt * state_dot.y);
        assert_eq!(state.z, -1.0 + dt * state_dot.z);
        assert_eq!(tangent.x, 1.0 + dt * tangent_dot.x);
        assert_eq!(tangent.y, 0.0 + dt * tangent_dot.y);
        assert_eq!(tangent.z, 0.0 + dt * tangent_dot.z);
        assert_eq!(t, 1.0 + dt);
    }

    #[test]
    fn steps_are_bit_reproducible() {
        let system = Rossler::new(1.1);
        let run = || {
            let mut state = State::new(2.0, -4.0, 0.1);
            let mut tangent = Tangent::new(1.0, 0.0, 0.0);
            let mut t = 0.0;
            let mut stepper = Rk4;
            for _ in 0..50 {
                stepper.step(&system, &mut t, &mut state, &mut tangent, 0.01);
            }
            (state, tangent)
        };
        let (a_state, a_tangent) = run();
        let (b_state, b_tangent) = run();
        for i in 0..3 {
            assert_eq!(a_state[i].to_bits(), b_state[i].to_bits());
            assert_eq!(a_tangent[i].to_bits(), b_tangent[i].to_bits());
        }
    }

    #[test]
    fn rk4_tracks_exponential_decay() {
        let field = Exponential { rate: -1.0 };
        let mut state = State::new(1.0, 2.0, -3.0);
        let mut tangent = Tangent::new(1.0, 0.0, 0.0);
        let mut t = 0.0;
        let mut stepper = Rk4;
        for _ in 0..100 {
            stepper.step(&field, &mut t, &mut state, &mut tangent, 0.05);
        }
        let decay = (-5.0_f64).exp();
        assert!((state - State::new(1.0, 2.0, -3.0) * decay).norm() < 1e-7);
        assert!((tangent.x - decay).abs() < 1e-7);
        assert!((t - 5.0).abs() < 1e-12);
    }

    #[test]
    fn run_fills_n_plus_one_points() {
        let grid = TimeGrid::new(1.0, 2.0, 0.01).expect("grid");
        let mut integrator = Integrator::new(StepperKind::Euler, &grid);
        let mut trajectory = Trajectory::default();
        let mut estimator = LyapunovEstimator::new(LyapunovMode::MeanLogNorm);
        let initial = State::new(0.5, 0.3, -1.0);

        let last = integrator.run(
            &Rossler::new(0.5),
            initial,
            Tangent::new(1.0, 0.0, 0.0),
            &mut trajectory,
            &mut estimator,
        );

        assert_eq!(integrator.steps(), 100);
        assert_eq!(trajectory.len(), 101);
        assert_eq!(trajectory.first(), Some(initial));
        assert_eq!(trajectory.last(), Some(last));
        assert_eq!(estimator.steps(), 100);
    }

    #[test]
    fn run_reuses_buffer_without_reallocating_length() {
        let grid = TimeGrid::new(0.0, 0.5, 0.1).expect("grid");
        let mut integrator = Integrator::new(StepperKind::Rk4, &grid);
        let mut trajectory = Trajectory::with_len(grid.steps() + 1);
        let mut estimator = LyapunovEstimator::new(LyapunovMode::Benettin);
        let field = Exponential { rate: 0.5 };

        for _ in 0..3 {
            estimator.reset();
            integrator.run(
                &field,
                State::new(1.0, 0.0, 0.0),
                Tangent::new(1.0, 0.0, 0.0),
                &mut trajectory,
                &mut estimator,
            );
            assert_eq!(trajectory.len(), 6);
        }
        assert!((estimator.finish() - 0.5).abs() < 1e-6);
    }
}
