use gourd_solver::ElementArray;
use gourd_solver::LinearExpression;
use gourd_solver::Model;

use super::Instance;
use crate::result::GourdResult;

/// `COSTS[worker][task]` is the cost of letting `worker` perform `task`.
const COSTS: [[i32; 4]; 4] = [
    [90, 76, 75, 70],
    [35, 85, 55, 65],
    [125, 95, 90, 105],
    [45, 110, 95, 115],
];

/// Assigns every worker a distinct task at minimum total cost.
///
/// The cost of each worker is linked to its task through an element constraint over its row of
/// the cost matrix.
pub(crate) fn build() -> GourdResult<Instance> {
    let mut model = Model::new();
    let num_tasks = COSTS[0].len() as i32;

    let mut tasks = Vec::with_capacity(COSTS.len());
    let mut costs = Vec::with_capacity(COSTS.len());
    for (worker, row) in COSTS.iter().enumerate() {
        let task = model.new_int_var(0, num_tasks - 1, format!("task_{worker}"))?;
        let cost = model.new_int_var_from_values(row.iter().copied(), format!("cost_{worker}"))?;
        model.add_element(ElementArray::Constants(row.to_vec()), task, cost)?;

        tasks.push(task);
        costs.push(cost);
    }

    model.add_all_different(tasks.iter().copied())?;
    model.minimize(LinearExpression::sum(costs))?;

    Ok(Instance {
        model,
        outputs: tasks,
    })
}
