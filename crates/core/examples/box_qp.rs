use anyhow::Result;
use qprs_core::QpModel;

fn main() -> Result<()> {
    let mut model = QpModel::new(3, 0)?;
    model
        .set_quadratic_objective(0, 0, 2.0)?
        .set_quadratic_objective(1, 1, 4.0)?
        .set_quadratic_objective(2, 2, 6.0)?
        .set_linear_objective(0, -2.0)?
        .set_linear_objective(1, -5.0)?
        .set_linear_objective(2, -3.0)?
        .set_variable_bound(0, 0.0, 1.0)?
        .set_variable_bound(1, -1.0, 2.0)?
        .set_variable_bound(2, 0.0, 4.0)?;

    let status = model.solve()?;

    println!("status: {status}");
    println!("x: {:?}", model.optimal());
    println!("objective: {:.6}", model.evaluate(&model.optimal())?);
    Ok(())
}
