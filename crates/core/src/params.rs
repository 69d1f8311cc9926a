use crate::error::QpError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Parameter {
    Rho,
    Sigma,
    Alpha,
    Polish,
    MaxIter,
    EpsAbs,
    EpsRel,
    EpsPrimInf,
    EpsDualInf,
}

impl Parameter {
    pub const ALL: [Parameter; 9] = [
        Parameter::Rho,
        Parameter::Sigma,
        Parameter::Alpha,
        Parameter::Polish,
        Parameter::MaxIter,
        Parameter::EpsAbs,
        Parameter::EpsRel,
        Parameter::EpsPrimInf,
        Parameter::EpsDualInf,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Parameter::Rho => "RHO",
            Parameter::Sigma => "SIGMA",
            Parameter::Alpha => "ALPHA",
            Parameter::Polish => "POLISH",
            Parameter::MaxIter => "MAX_ITER",
            Parameter::EpsAbs => "EPS_ABS",
            Parameter::EpsRel => "EPS_REL",
            Parameter::EpsPrimInf => "EPS_PRIM_INF",
            Parameter::EpsDualInf => "EPS_DUAL_INF",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = QpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parameter::ALL
            .into_iter()
            .find(|param| param.name() == s)
            .ok_or_else(|| QpError::UnknownParameter(s.to_string()))
    }
}
