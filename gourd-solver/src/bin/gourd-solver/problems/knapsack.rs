use gourd_solver::LinearExpression;
use gourd_solver::Model;
use gourd_solver::Relation;

use super::Instance;
use crate::result::GourdResult;

const WEIGHTS: [i32; 5] = [12, 2, 1, 1, 4];
const VALUES: [i32; 5] = [4, 2, 1, 2, 10];
const CAPACITY: i64 = 15;

/// A 0/1 knapsack: maximise the packed value without exceeding the capacity.
pub(crate) fn build() -> GourdResult<Instance> {
    let mut model = Model::new();
    let items = (0..WEIGHTS.len())
        .map(|item| model.new_bool_var(format!("take_{item}")))
        .collect::<Vec<_>>();

    model.add_linear(
        LinearExpression::weighted_sum(&WEIGHTS, &items)?,
        Relation::LessThanOrEqual,
        CAPACITY,
    )?;
    model.maximize(LinearExpression::weighted_sum(&VALUES, &items)?)?;

    Ok(Instance {
        model,
        outputs: items,
    })
}
