//! The Contribution Protocol: the uniform shape in which a cost or
//! constraint declares its linear contribution to the LP. A small, closed
//! interface every plugin implements, dispatched through a registry rather
//! than inheritance.

use good_lp::Variable;

use crate::adapters::{FilterProperties, Host};
use crate::config::SolverSchedulerConfig;
use crate::model::VariableModel;

/// One `coefficient * variable` term contributed to the objective.
#[derive(Debug, Clone, Copy)]
pub struct Term {
    pub var: Variable,
    pub coef: f64,
}

/// The comparison operator of one constraint row.
///
/// LP solvers have no native strict inequality or inequation: `<` and `>`
/// are accepted here for fidelity with the source catalogue's vocabulary
/// but are assembled as `<=` / `>=` by the Problem Builder (the
/// Nova solver this is modeled on has exactly the same limitation --- its
/// backing LP library only understands `==`, `<=`, `>=`). No constraint
/// implemented in this crate emits `NotEqual`; it exists so the type is a
/// faithful rendering of the protocol and is rejected at assembly time if
/// a future plugin ever produces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Le,
    Lt,
    Ge,
    Gt,
}

/// One linear (in)equality row: `sum(coefs[k] * vars[k]) op constant`.
#[derive(Debug, Clone)]
pub struct ConstraintRow {
    pub vars: Vec<Variable>,
    pub coefs: Vec<f64>,
    pub constant: f64,
    pub op: Operator,
}

impl ConstraintRow {
    pub fn new(vars: Vec<Variable>, coefs: Vec<f64>, constant: f64, op: Operator) -> Self {
        debug_assert_eq!(vars.len(), coefs.len());
        ConstraintRow { vars, coefs, constant, op }
    }

    /// A single-variable `var == 0` row, the shape every host-rejection
    /// constraint emits once per zeroed slot.
    pub fn zero(var: Variable) -> Self {
        ConstraintRow::new(vec![var], vec![1.0], 0.0, Operator::Eq)
    }
}

/// A cost: a linear term added to the minimised objective, weighing
/// host/slot combinations by desirability.
pub trait Cost {
    /// Name this cost is registered and configured under, e.g. `"RamCost"`.
    fn name(&self) -> &'static str;

    /// The multiplier this cost's raw, normalised coefficients are scaled
    /// by before being summed into the objective. Positive multipliers
    /// stack, negative multipliers spread, for costs whose raw coefficient
    /// grows with slot index.
    fn cost_multiplier(&self, cfg: &SolverSchedulerConfig) -> f64;

    /// Returns one term per `(host, slot)` cell this cost has an opinion
    /// about. A cost with nothing to contribute (missing input, disabled
    /// by configuration) returns an empty vector; it never panics and
    /// never mutates `hosts` or `vars`.
    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &[Host],
        fp: &FilterProperties,
        cfg: &SolverSchedulerConfig,
    ) -> Vec<Term>;
}

/// A constraint: a linear (in)equality row that cuts infeasible
/// assignments out of the search space.
pub trait Constraint {
    /// Name this constraint is registered and configured under.
    fn name(&self) -> &'static str;

    /// Returns the rows this constraint contributes. Capacity constraints
    /// (RAM/Disk/VCPU) write the effective allocation cap they enforced
    /// into `host.limits` as a side effect, the one documented mutation
    /// of `Host`; everything else must leave `hosts` untouched.
    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow>;
}
