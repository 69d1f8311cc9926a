use crate::error::{QpError, QpResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Solved,
    SolvedInaccurate,
    PrimalInfeasibleInaccurate,
    DualInfeasibleInaccurate,
    SetupError,
    MaxIterReached,
    PrimalInfeasible,
    DualInfeasible,
    Interrupted,
    TimeLimitReached,
    NonConvex,
    Unsolved,
}

impl Status {
    pub const ALL: [Status; 12] = [
        Status::Solved,
        Status::SolvedInaccurate,
        Status::PrimalInfeasibleInaccurate,
        Status::DualInfeasibleInaccurate,
        Status::SetupError,
        Status::MaxIterReached,
        Status::PrimalInfeasible,
        Status::DualInfeasible,
        Status::Interrupted,
        Status::TimeLimitReached,
        Status::NonConvex,
        Status::Unsolved,
    ];

    pub const fn code(self) -> i32 {
        match self {
            Status::Solved => 1,
            Status::SolvedInaccurate => 2,
            Status::PrimalInfeasibleInaccurate => 3,
            Status::DualInfeasibleInaccurate => 4,
            Status::SetupError => -1,
            Status::MaxIterReached => -2,
            Status::PrimalInfeasible => -3,
            Status::DualInfeasible => -4,
            Status::Interrupted => -5,
            Status::TimeLimitReached => -6,
            Status::NonConvex => -7,
            Status::Unsolved => -10,
        }
    }

    pub fn from_code(code: i32) -> QpResult<Status> {
        Status::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or(QpError::UnknownStatusCode(code))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Status::Solved => "SOLVED",
            Status::SolvedInaccurate => "SOLVED_INACCURATE",
            Status::PrimalInfeasibleInaccurate => "PRIMAL_INFEASIBLE_INACCURATE",
            Status::DualInfeasibleInaccurate => "DUAL_INFEASIBLE_INACCURATE",
            Status::SetupError => "SETUP_ERROR",
            Status::MaxIterReached => "MAX_ITER_REACHED",
            Status::PrimalInfeasible => "PRIMAL_INFEASIBLE",
            Status::DualInfeasible => "DUAL_INFEASIBLE",
            Status::Interrupted => "INTERRUPTED",
            Status::TimeLimitReached => "TIME_LIMIT_REACHED",
            Status::NonConvex => "NON_CONVEX",
            Status::Unsolved => "UNSOLVED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
