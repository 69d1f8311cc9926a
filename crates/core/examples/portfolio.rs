use anyhow::Result;
use qprs_core::QpModel;

fn main() -> Result<()> {
    let returns = [0.12, 0.10, 0.07, 0.03];
    let cov_diag = [0.05, 0.02, 0.01, 0.005];
    let target_return = 0.08;

    let mut model = QpModel::new(returns.len(), 2)?;
    for asset in 0..returns.len() {
        model
            .set_quadratic_objective(asset, asset, cov_diag[asset])?
            .set_variable_bound(asset, 0.0, 1.0)?
            .set_constraint_coeff(0, asset, 1.0)?
            .set_constraint_coeff(1, asset, returns[asset])?;
    }
    model
        .set_constraint_bound(0, 1.0, 1.0)?
        .set_constraint_bound(1, target_return, target_return)?;

    let status = model.solve()?;

    println!("status: {status}");
    println!("weights: {:?}", model.optimal());
    println!("risk duals: {:?}", model.dual());
    println!("objective: {:.6}", model.evaluate(&model.optimal())?);
    Ok(())
}
