use gourd_solver::LinearExpression;
use gourd_solver::Model;
use gourd_solver::Relation;

use super::Instance;
use crate::result::GourdResult;

const NUM_ELEMENTS: u32 = 8;

/// The candidate sets with their costs.
const SETS: [(&[u32], i32); 6] = [
    (&[0, 1, 2], 3),
    (&[1, 3], 1),
    (&[2, 3, 4], 2),
    (&[4, 5, 6, 7], 4),
    (&[0, 5], 1),
    (&[6, 7], 2),
];

/// Selects sets covering every element at minimum total cost.
pub(crate) fn build() -> GourdResult<Instance> {
    let mut model = Model::new();
    let chosen = (0..SETS.len())
        .map(|set| model.new_bool_var(format!("use_{set}")))
        .collect::<Vec<_>>();

    for element in 0..NUM_ELEMENTS {
        let covering = SETS
            .iter()
            .zip(&chosen)
            .filter(|((members, _), _)| members.contains(&element))
            .map(|(_, &set)| set);
        model.add_linear(LinearExpression::sum(covering), Relation::GreaterThanOrEqual, 1)?;
    }

    let costs = SETS.iter().map(|&(_, cost)| cost).collect::<Vec<_>>();
    model.minimize(LinearExpression::weighted_sum(&costs, &chosen)?)?;

    Ok(Instance {
        model,
        outputs: chosen,
    })
}
