#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use qprs_core::{Parameter, QpError, QpModel, QpResult, Status};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JsonCoefficient {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JsonBound {
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonQp {
    pub num_variables: usize,
    pub num_constraints: usize,
    #[serde(default)]
    pub linear_objective: Vec<f64>,
    #[serde(default)]
    pub quadratic_objective: Vec<JsonCoefficient>,
    #[serde(default)]
    pub constraint_coefficients: Vec<JsonCoefficient>,
    #[serde(default)]
    pub constraint_bounds: Vec<JsonBound>,
    #[serde(default)]
    pub variable_bounds: Vec<JsonBound>,
    #[serde(default)]
    pub parameters: BTreeMap<Parameter, f64>,
}

impl JsonQp {
    pub fn to_model(&self) -> QpResult<QpModel> {
        let mut model = QpModel::new(self.num_variables, self.num_constraints)?;
        if !self.linear_objective.is_empty() {
            if self.linear_objective.len() != self.num_variables {
                return Err(QpError::LengthMismatch {
                    expected: self.num_variables,
                    actual: self.linear_objective.len(),
                });
            }
            for (var, &coeff) in self.linear_objective.iter().enumerate() {
                model.set_linear_objective(var, coeff)?;
            }
        }
        for entry in &self.quadratic_objective {
            model.set_quadratic_objective(entry.row, entry.col, entry.value)?;
        }
        for entry in &self.constraint_coefficients {
            model.set_constraint_coeff(entry.row, entry.col, entry.value)?;
        }
        for bound in &self.constraint_bounds {
            model.set_constraint_bound(bound.index, bound.lower, bound.upper)?;
        }
        for bound in &self.variable_bounds {
            model.set_variable_bound(bound.index, bound.lower, bound.upper)?;
        }
        for (&param, &value) in &self.parameters {
            model.set_parameter(param, value)?;
        }
        Ok(model)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub status: Status,
    pub code: i32,
    pub solved: bool,
    pub solve_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimal: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dual: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduced: Option<Vec<f64>>,
}

impl SolveReport {
    pub fn from_model(model: &QpModel, elapsed: Duration) -> Self {
        let solved = model.is_solved();
        let optimal = solved.then(|| model.optimal());
        let objective = optimal.as_ref().and_then(|x| model.evaluate(x).ok());
        Self {
            status: model.status(),
            code: model.status().code(),
            solved,
            solve_time_ms: elapsed.as_secs_f64() * 1e3,
            objective,
            optimal,
            dual: solved.then(|| model.dual()),
            reduced: solved.then(|| model.reduced()),
        }
    }
}

pub fn read_problem<P: AsRef<Path>>(path: P) -> Result<JsonQp> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).with_context(|| format!("failed to parse QP from {:?}", path))
}

pub fn write_problem<P: AsRef<Path>>(path: P, problem: &JsonQp) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("failed to create {:?}", path.as_ref()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, problem).context("failed to serialise problem")?;
    Ok(())
}

pub fn read_report<P: AsRef<Path>>(path: P) -> Result<SolveReport> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse report from {:?}", path))
}

pub fn write_report<P: AsRef<Path>>(path: P, report: &SolveReport) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create parent directory {:?}", parent))?;
        }
    }

    let file = File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).context("failed to serialise report")?;
    writer
        .flush()
        .with_context(|| format!("failed to write report into {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_problem_round_trip() {
        let input = r#"{
            "num_variables": 2,
            "num_constraints": 1,
            "linear_objective": [1.0, 1.0],
            "quadratic_objective": [{"row": 0, "col": 0, "value": 4.0}],
            "constraint_coefficients": [{"row": 0, "col": 1, "value": 1.0}],
            "constraint_bounds": [{"index": 0, "lower": 1.0, "upper": 1.0}],
            "parameters": {"MAX_ITER": 200.0}
        }"#;
        let parsed: JsonQp = serde_json::from_str(input).unwrap();
        assert_eq!(parsed.num_variables, 2);
        assert!(parsed.variable_bounds.is_empty());
        assert_eq!(parsed.parameters.get(&Parameter::MaxIter), Some(&200.0));

        let mut buffer = Vec::new();
        serde_json::to_writer(&mut buffer, &parsed).unwrap();
        let reparsed: JsonQp = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(reparsed.constraint_coefficients.len(), 1);
    }

    #[test]
    fn to_model_applies_every_section() {
        let problem = JsonQp {
            num_variables: 2,
            num_constraints: 1,
            linear_objective: vec![1.0, 1.0],
            quadratic_objective: vec![
                JsonCoefficient {
                    row: 0,
                    col: 0,
                    value: 4.0,
                },
                JsonCoefficient {
                    row: 0,
                    col: 1,
                    value: 1.0,
                },
                JsonCoefficient {
                    row: 1,
                    col: 1,
                    value: 2.0,
                },
            ],
            constraint_coefficients: vec![
                JsonCoefficient {
                    row: 0,
                    col: 0,
                    value: 1.0,
                },
                JsonCoefficient {
                    row: 0,
                    col: 1,
                    value: 1.0,
                },
            ],
            constraint_bounds: vec![JsonBound {
                index: 0,
                lower: 1.0,
                upper: 1.0,
            }],
            variable_bounds: vec![
                JsonBound {
                    index: 0,
                    lower: 0.0,
                    upper: 0.7,
                },
                JsonBound {
                    index: 1,
                    lower: 0.0,
                    upper: 0.7,
                },
            ],
            parameters: BTreeMap::new(),
        };
        let model = problem.to_model().unwrap();
        assert_eq!(model.num_variables(), 2);
        assert_eq!(model.num_constraints(), 1);
        assert!((model.evaluate(&[0.3, 0.7]).unwrap() - 1.88).abs() < 1e-12);
        assert!(model.is_feasible(&[0.3, 0.7]).unwrap());
    }

    #[test]
    fn to_model_rejects_wrong_objective_length() {
        let problem = JsonQp {
            num_variables: 3,
            num_constraints: 0,
            linear_objective: vec![1.0],
            quadratic_objective: Vec::new(),
            constraint_coefficients: Vec::new(),
            constraint_bounds: Vec::new(),
            variable_bounds: Vec::new(),
            parameters: BTreeMap::new(),
        };
        assert_eq!(
            problem.to_model().unwrap_err(),
            QpError::LengthMismatch {
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn to_model_rejects_bad_indices() {
        let problem = JsonQp {
            num_variables: 2,
            num_constraints: 1,
            linear_objective: Vec::new(),
            quadratic_objective: vec![JsonCoefficient {
                row: 1,
                col: 0,
                value: 1.0,
            }],
            constraint_coefficients: Vec::new(),
            constraint_bounds: Vec::new(),
            variable_bounds: Vec::new(),
            parameters: BTreeMap::new(),
        };
        assert!(matches!(
            problem.to_model().unwrap_err(),
            QpError::LowerTriangle { row: 1, col: 0 }
        ));
    }

    #[test]
    fn unsolved_report_omits_result_fields() {
        let model = QpModel::new(2, 0).unwrap();
        let report = SolveReport::from_model(&model, Duration::from_millis(3));
        assert_eq!(report.status, Status::Unsolved);
        assert_eq!(report.code, -10);
        assert!(!report.solved);
        assert!(report.optimal.is_none());

        let text = serde_json::to_string(&report).unwrap();
        assert!(text.contains("\"UNSOLVED\""));
        assert!(!text.contains("optimal"));
    }
}
