use crate::error::{QpError, QpResult};
use crate::kernel::{self, KernelInput};
use crate::math::dot;
use crate::params::Parameter;
use crate::sparse::TripletMatrix;
use crate::status::Status;
use std::collections::BTreeMap;

pub const MAX_BOUND: f64 = 1e20;

const FEASIBILITY_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone)]
pub struct QpModel {
    num_var: usize,
    num_con: usize,
    lin_obj: Vec<f64>,
    quad_obj: BTreeMap<(usize, usize), f64>,
    con_coeff: BTreeMap<(usize, usize), f64>,
    row_lower: Vec<f64>,
    row_upper: Vec<f64>,
    params: BTreeMap<Parameter, f64>,
    verbose: bool,
    status: Status,
    opt_primal: Vec<f64>,
    opt_dual: Vec<f64>,
}

impl QpModel {
    pub fn new(num_var: usize, num_con: usize) -> QpResult<Self> {
        if num_var == 0 {
            return Err(QpError::EmptyModel);
        }
        let num_dual = num_con + num_var;
        Ok(Self {
            num_var,
            num_con,
            lin_obj: vec![0.0; num_var],
            quad_obj: BTreeMap::new(),
            con_coeff: BTreeMap::new(),
            row_lower: vec![-MAX_BOUND; num_dual],
            row_upper: vec![MAX_BOUND; num_dual],
            params: BTreeMap::new(),
            verbose: false,
            status: Status::Unsolved,
            opt_primal: vec![f64::NAN; num_var],
            opt_dual: vec![f64::NAN; num_dual],
        })
    }

    pub fn num_variables(&self) -> usize {
        self.num_var
    }

    pub fn num_constraints(&self) -> usize {
        self.num_con
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_solved(&self) -> bool {
        self.status == Status::Solved
    }

    fn bound_row(&self, var: usize) -> usize {
        self.num_con + var
    }

    fn num_dual(&self) -> usize {
        self.num_con + self.num_var
    }

    fn check_var(&self, index: usize) -> QpResult<()> {
        if index < self.num_var {
            Ok(())
        } else {
            Err(QpError::VariableIndex {
                index,
                num_var: self.num_var,
            })
        }
    }

    fn check_con(&self, index: usize) -> QpResult<()> {
        if index < self.num_con {
            Ok(())
        } else {
            Err(QpError::ConstraintIndex {
                index,
                num_con: self.num_con,
            })
        }
    }

    fn check_finite(what: &'static str, value: f64) -> QpResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(QpError::NonFinite { what, value })
        }
    }

    fn check_bounds(what: &'static str, index: usize, lower: f64, upper: f64) -> QpResult<()> {
        if lower.is_nan() {
            return Err(QpError::NanBound {
                side: "lower",
                what,
                index,
            });
        }
        if upper.is_nan() {
            return Err(QpError::NanBound {
                side: "upper",
                what,
                index,
            });
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.status = Status::Unsolved;
    }

    pub fn set_variable_bound(
        &mut self,
        var: usize,
        lower: f64,
        upper: f64,
    ) -> QpResult<&mut Self> {
        self.check_var(var)?;
        Self::check_bounds("variable", var, lower, upper)?;
        let row = self.bound_row(var);
        self.row_lower[row] = lower;
        self.row_upper[row] = upper;
        self.con_coeff.insert((row, var), 1.0);
        self.reset();
        Ok(self)
    }

    pub fn set_constraint_bound(
        &mut self,
        con: usize,
        lower: f64,
        upper: f64,
    ) -> QpResult<&mut Self> {
        self.check_con(con)?;
        Self::check_bounds("constraint", con, lower, upper)?;
        self.row_lower[con] = lower;
        self.row_upper[con] = upper;
        self.reset();
        Ok(self)
    }

    pub fn set_constraint_coeff(
        &mut self,
        con: usize,
        var: usize,
        coeff: f64,
    ) -> QpResult<&mut Self> {
        self.check_con(con)?;
        self.check_var(var)?;
        Self::check_finite("constraint coefficient", coeff)?;
        self.con_coeff.insert((con, var), coeff);
        self.reset();
        Ok(self)
    }

    pub fn set_linear_objective(&mut self, var: usize, coeff: f64) -> QpResult<&mut Self> {
        self.check_var(var)?;
        Self::check_finite("linear objective coefficient", coeff)?;
        self.lin_obj[var] = coeff;
        self.reset();
        Ok(self)
    }

    pub fn set_quadratic_objective(
        &mut self,
        row: usize,
        col: usize,
        coeff: f64,
    ) -> QpResult<&mut Self> {
        self.check_var(row)?;
        self.check_var(col)?;
        if row > col {
            return Err(QpError::LowerTriangle { row, col });
        }
        Self::check_finite("quadratic objective coefficient", coeff)?;
        self.quad_obj.insert((row, col), coeff);
        self.reset();
        Ok(self)
    }

    pub fn set_parameter(&mut self, param: Parameter, value: f64) -> QpResult<&mut Self> {
        Self::check_finite("parameter value", value)?;
        self.params.insert(param, value);
        self.reset();
        Ok(self)
    }

    pub fn set_verbose(&mut self, verbose: bool) -> &mut Self {
        self.verbose = verbose;
        self
    }

    pub fn evaluate(&self, primal: &[f64]) -> QpResult<f64> {
        if primal.len() != self.num_var {
            return Err(QpError::LengthMismatch {
                expected: self.num_var,
                actual: primal.len(),
            });
        }
        let mut total = dot(&self.lin_obj, primal);
        for (&(row, col), &coeff) in &self.quad_obj {
            if row == col {
                total += 0.5 * coeff * primal[row] * primal[row];
            } else {
                total += coeff * primal[row] * primal[col];
            }
        }
        Ok(total)
    }

    pub fn is_feasible(&self, primal: &[f64]) -> QpResult<bool> {
        if primal.len() != self.num_var {
            return Err(QpError::LengthMismatch {
                expected: self.num_var,
                actual: primal.len(),
            });
        }
        for row in 0..self.num_dual() {
            let mut value = 0.0;
            for (&(_, var), &coeff) in self.con_coeff.range((row, 0)..=(row, usize::MAX)) {
                value += coeff * primal[var];
            }
            let lower = self.row_lower[row] - FEASIBILITY_TOLERANCE;
            let upper = self.row_upper[row] + FEASIBILITY_TOLERANCE;
            if !(lower <= value && value <= upper) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn optimal(&self) -> Vec<f64> {
        if self.is_solved() {
            self.opt_primal.clone()
        } else {
            vec![f64::NAN; self.num_var]
        }
    }

    pub fn optimal_value(&self, var: usize) -> QpResult<f64> {
        self.check_var(var)?;
        Ok(if self.is_solved() {
            self.opt_primal[var]
        } else {
            f64::NAN
        })
    }

    pub fn dual(&self) -> Vec<f64> {
        if self.is_solved() {
            self.opt_dual[..self.num_con].to_vec()
        } else {
            vec![f64::NAN; self.num_con]
        }
    }

    pub fn dual_value(&self, con: usize) -> QpResult<f64> {
        self.check_con(con)?;
        Ok(if self.is_solved() {
            self.opt_dual[con]
        } else {
            f64::NAN
        })
    }

    pub fn reduced(&self) -> Vec<f64> {
        if self.is_solved() {
            self.opt_dual[self.num_con..].to_vec()
        } else {
            vec![f64::NAN; self.num_var]
        }
    }

    pub fn reduced_cost(&self, var: usize) -> QpResult<f64> {
        self.check_var(var)?;
        Ok(if self.is_solved() {
            self.opt_dual[self.bound_row(var)]
        } else {
            f64::NAN
        })
    }

    pub fn solve(&mut self) -> QpResult<Status> {
        self.status = Status::Unsolved;
        self.opt_primal.fill(f64::NAN);
        self.opt_dual.fill(f64::NAN);

        let num_dual = self.num_dual();
        let quad = TripletMatrix::from_map(self.num_var, self.num_var, &self.quad_obj)?;
        let cons = TripletMatrix::from_map(num_dual, self.num_var, &self.con_coeff)?;
        let input = KernelInput {
            num_var: self.num_var,
            num_dual,
            lin_obj: &self.lin_obj,
            quad_obj: &quad,
            con_coeff: &cons,
            row_lower: &self.row_lower,
            row_upper: &self.row_upper,
            params: &self.params,
            verbose: self.verbose,
        };
        self.status = kernel::run(&input, &mut self.opt_primal, &mut self.opt_dual)?;
        Ok(self.status)
    }
}
