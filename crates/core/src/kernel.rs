use crate::error::{QpError, QpResult};
use crate::math::Timer;
use crate::params::Parameter;
use crate::sparse::TripletMatrix;
use crate::status::Status;
use osqp::{CscMatrix, Problem, Settings};
use std::collections::BTreeMap;

pub(crate) struct KernelInput<'a> {
    pub num_var: usize,
    pub num_dual: usize,
    pub lin_obj: &'a [f64],
    pub quad_obj: &'a TripletMatrix,
    pub con_coeff: &'a TripletMatrix,
    pub row_lower: &'a [f64],
    pub row_upper: &'a [f64],
    pub params: &'a BTreeMap<Parameter, f64>,
    pub verbose: bool,
}

pub(crate) fn run(
    input: &KernelInput<'_>,
    primal: &mut [f64],
    dual: &mut [f64],
) -> QpResult<Status> {
    debug_assert_eq!(primal.len(), input.num_var);
    debug_assert_eq!(dual.len(), input.num_dual);

    for (row, (&lower, &upper)) in input.row_lower.iter().zip(input.row_upper).enumerate() {
        if !(lower <= upper) {
            tracing::warn!(row, lower, upper, "row bounds rejected before kernel setup");
            return Ok(Status::SetupError);
        }
    }

    let quad = csc_from_triplets(input.quad_obj);
    let cons = csc_from_triplets(input.con_coeff);
    let settings = build_settings(input.params, input.verbose);

    let timer = Timer::start();
    let mut problem = match Problem::new(
        quad,
        input.lin_obj,
        cons,
        input.row_lower,
        input.row_upper,
        &settings,
    ) {
        Ok(problem) => problem,
        Err(err) => {
            tracing::warn!(error = ?err, "kernel setup failed");
            return Ok(Status::SetupError);
        }
    };

    let kernel_status = problem.solve();
    let (status, iterations) = match &kernel_status {
        osqp::Status::Solved(solution) => {
            adopt(solution, primal, dual);
            (Status::Solved, Some(kernel_status.iter()))
        }
        osqp::Status::SolvedInaccurate(solution) => {
            adopt(solution, primal, dual);
            (Status::SolvedInaccurate, Some(kernel_status.iter()))
        }
        osqp::Status::MaxIterationsReached(solution) => {
            adopt(solution, primal, dual);
            (Status::MaxIterReached, Some(kernel_status.iter()))
        }
        osqp::Status::TimeLimitReached(solution) => {
            adopt(solution, primal, dual);
            (Status::TimeLimitReached, Some(kernel_status.iter()))
        }
        osqp::Status::PrimalInfeasible(_) => (Status::PrimalInfeasible, None),
        osqp::Status::PrimalInfeasibleInaccurate(_) => (Status::PrimalInfeasibleInaccurate, None),
        osqp::Status::DualInfeasible(_) => (Status::DualInfeasible, None),
        osqp::Status::DualInfeasibleInaccurate(_) => (Status::DualInfeasibleInaccurate, None),
        osqp::Status::NonConvex(_) => (Status::NonConvex, None),
        _ => return Err(QpError::UnknownKernelStatus),
    };
    tracing::debug!(
        status = %status,
        iterations,
        elapsed = ?timer.elapsed(),
        "kernel solve finished"
    );
    Ok(status)
}

fn adopt(solution: &osqp::Solution<'_>, primal: &mut [f64], dual: &mut [f64]) {
    primal.copy_from_slice(solution.x());
    dual.copy_from_slice(solution.y());
}

fn build_settings(params: &BTreeMap<Parameter, f64>, verbose: bool) -> Settings {
    let mut settings = Settings::default().polish(true).verbose(verbose);
    for (&param, &value) in params {
        settings = apply_parameter(settings, param, value);
    }
    settings
}

fn apply_parameter(settings: Settings, param: Parameter, value: f64) -> Settings {
    match param {
        Parameter::Rho => settings.rho(value),
        Parameter::Sigma => settings.sigma(value),
        Parameter::Alpha => settings.alpha(value),
        Parameter::Polish => settings.polish(value.round() != 0.0),
        Parameter::MaxIter => settings.max_iter(value.round() as u32),
        Parameter::EpsAbs => settings.eps_abs(value),
        Parameter::EpsRel => settings.eps_rel(value),
        Parameter::EpsPrimInf => settings.eps_prim_inf(value),
        Parameter::EpsDualInf => settings.eps_dual_inf(value),
    }
}

fn csc_from_triplets(triplets: &TripletMatrix) -> CscMatrix<'static> {
    let nnz = triplets.nnz();
    let mut indptr = vec![0usize; triplets.ncols + 1];
    for &col in &triplets.cols {
        indptr[col + 1] += 1;
    }
    for col in 0..triplets.ncols {
        indptr[col + 1] += indptr[col];
    }
    let mut cursor = indptr.clone();
    let mut indices = vec![0usize; nnz];
    let mut data = vec![0.0f64; nnz];
    for entry in 0..nnz {
        let col = triplets.cols[entry];
        let slot = cursor[col];
        indices[slot] = triplets.rows[entry];
        data[slot] = triplets.values[entry];
        cursor[col] += 1;
    }
    CscMatrix {
        nrows: triplets.nrows,
        ncols: triplets.ncols,
        indptr: indptr.into(),
        indices: indices.into(),
        data: data.into(),
    }
}
