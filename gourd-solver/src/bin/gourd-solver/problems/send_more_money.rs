use gourd_solver::LinearExpression;
use gourd_solver::Model;
use gourd_solver::Relation;

use super::Instance;
use crate::result::GourdResult;

/// The cryptarithm `SEND + MORE = MONEY` in base 10.
pub(crate) fn build() -> GourdResult<Instance> {
    let mut model = Model::new();

    let s = model.new_int_var(1, 9, "S")?;
    let e = model.new_int_var(0, 9, "E")?;
    let n = model.new_int_var(0, 9, "N")?;
    let d = model.new_int_var(0, 9, "D")?;
    let m = model.new_int_var(1, 9, "M")?;
    let o = model.new_int_var(0, 9, "O")?;
    let r = model.new_int_var(0, 9, "R")?;
    let y = model.new_int_var(0, 9, "Y")?;
    let letters = vec![s, e, n, d, m, o, r, y];

    model.add_all_different(letters.iter().copied())?;

    let mut equation = LinearExpression::default();
    for (coefficient, letter) in [(1000, s), (100, e), (10, n), (1, d)] {
        equation.add_term(coefficient, letter);
    }
    for (coefficient, letter) in [(1000, m), (100, o), (10, r), (1, e)] {
        equation.add_term(coefficient, letter);
    }
    for (coefficient, letter) in [(10000, m), (1000, o), (100, n), (10, e), (1, y)] {
        equation.add_term(-coefficient, letter);
    }
    model.add_linear(equation, Relation::Equal, 0)?;

    Ok(Instance {
        model,
        outputs: letters,
    })
}
