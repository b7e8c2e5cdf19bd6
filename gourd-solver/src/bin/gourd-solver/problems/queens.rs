use gourd_solver::LinearExpression;
use gourd_solver::Model;
use gourd_solver::Relation;

use super::Instance;
use crate::result::GourdError;
use crate::result::GourdResult;

/// Places `n` queens on an `n x n` board such that no two attack each other.
///
/// Queen `i` is in column `i` and `q_i` is its row. The diagonals are auxiliary variables
/// `q_i + i` and `q_i - i`, each required to be all-different.
pub(crate) fn build(n: u32) -> GourdResult<Instance> {
    if n == 0 || n > i32::MAX as u32 / 2 {
        return Err(GourdError::InvalidArgument(format!(
            "cannot place {n} queens"
        )));
    }
    let n = n as i32;

    let mut model = Model::new();
    let queens = (0..n)
        .map(|i| model.new_int_var(0, n - 1, format!("q_{i}")))
        .collect::<Result<Vec<_>, _>>()?;

    let mut ascending = Vec::with_capacity(queens.len());
    let mut descending = Vec::with_capacity(queens.len());
    for (i, &queen) in (0..n).zip(&queens) {
        let up = model.new_int_var(i, n - 1 + i, format!("up_{i}"))?;
        model.add_linear(
            LinearExpression::new([(1, queen), (-1, up)]),
            Relation::Equal,
            -(i as i64),
        )?;
        ascending.push(up);

        let down = model.new_int_var(-i, n - 1 - i, format!("down_{i}"))?;
        model.add_linear(
            LinearExpression::new([(1, queen), (-1, down)]),
            Relation::Equal,
            i as i64,
        )?;
        descending.push(down);
    }

    model.add_all_different(queens.iter().copied())?;
    model.add_all_different(ascending)?;
    model.add_all_different(descending)?;

    Ok(Instance {
        model,
        outputs: queens,
    })
}
