#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::time::Duration;

use gourd_solver::CollectionMode;
use gourd_solver::LinearExpression;
use gourd_solver::Model;
use gourd_solver::Relation;
use gourd_solver::SearchLimits;
use gourd_solver::SolveStatus;
use gourd_solver::Solver;
use gourd_solver::SolverOptions;
use gourd_solver::VariableId;

fn solver_with_mode(collection_mode: CollectionMode) -> Solver {
    Solver::new(SolverOptions {
        collection_mode,
        ..Default::default()
    })
}

#[test]
fn two_different_variables_first_solution() {
    let mut model = Model::new();
    let x = model.new_int_var(0, 2, "x").unwrap();
    let y = model.new_int_var(0, 2, "y").unwrap();
    model
        .add_linear(
            LinearExpression::new([(1, x), (-1, y)]),
            Relation::NotEqual,
            0,
        )
        .unwrap();

    let result = solver_with_mode(CollectionMode::First).solve(&model);

    assert_eq!(SolveStatus::Feasible, result.status);
    assert_eq!(1, result.solutions.len());
    let solution = &result.solutions[0];
    assert_eq!(0, solution.value(x));
    assert_eq!(1, solution.value(y));
}

#[test]
fn send_more_money_has_a_unique_solution() {
    let mut model = Model::new();
    let s = model.new_int_var(1, 9, "S").unwrap();
    let e = model.new_int_var(0, 9, "E").unwrap();
    let n = model.new_int_var(0, 9, "N").unwrap();
    let d = model.new_int_var(0, 9, "D").unwrap();
    let m = model.new_int_var(1, 9, "M").unwrap();
    let o = model.new_int_var(0, 9, "O").unwrap();
    let r = model.new_int_var(0, 9, "R").unwrap();
    let y = model.new_int_var(0, 9, "Y").unwrap();

    model.add_all_different([s, e, n, d, m, o, r, y]).unwrap();
    model
        .add_linear(
            LinearExpression::new([
                (1000, s),
                (91, e),
                (-90, n),
                (1, d),
                (-9000, m),
                (-900, o),
                (10, r),
                (-1, y),
            ]),
            Relation::Equal,
            0,
        )
        .unwrap();

    let result = solver_with_mode(CollectionMode::All).solve(&model);

    assert_eq!(SolveStatus::Optimal, result.status);
    assert_eq!(1, result.solutions.len());
    let solution = &result.solutions[0];
    assert_eq!(
        vec![9, 5, 6, 7, 1, 0, 8, 2],
        [s, e, n, d, m, o, r, y].map(|letter| solution.value(letter))
    );
    assert!(model.check_solution(solution));
}

fn queens(model: &mut Model, n: i32) -> Vec<VariableId> {
    let queens = (0..n)
        .map(|i| model.new_int_var(0, n - 1, format!("q_{i}")).unwrap())
        .collect::<Vec<_>>();

    let mut ascending = Vec::new();
    let mut descending = Vec::new();
    for (i, &queen) in (0..n).zip(&queens) {
        let up = model.new_int_var(i, n - 1 + i, format!("up_{i}")).unwrap();
        model
            .add_linear(
                LinearExpression::new([(1, queen), (-1, up)]),
                Relation::Equal,
                -(i as i64),
            )
            .unwrap();
        ascending.push(up);

        let down = model.new_int_var(-i, n - 1 - i, format!("down_{i}")).unwrap();
        model
            .add_linear(
                LinearExpression::new([(1, queen), (-1, down)]),
                Relation::Equal,
                i as i64,
            )
            .unwrap();
        descending.push(down);
    }

    model.add_all_different(queens.iter().copied()).unwrap();
    model.add_all_different(ascending).unwrap();
    model.add_all_different(descending).unwrap();

    queens
}

#[test]
fn eight_queens_has_92_solutions() {
    let mut model = Model::new();
    let queens = queens(&mut model, 8);

    let result = solver_with_mode(CollectionMode::All).solve(&model);

    assert_eq!(SolveStatus::Optimal, result.status);
    assert_eq!(92, result.solutions.len());

    for solution in &result.solutions {
        let rows = queens
            .iter()
            .map(|&queen| solution.value(queen))
            .collect::<Vec<_>>();
        for i in 0..rows.len() {
            for j in i + 1..rows.len() {
                assert_ne!(rows[i], rows[j]);
                assert_ne!((rows[i] - rows[j]).abs(), (j - i) as i32);
            }
        }
    }
}

#[test]
fn queens_are_counted_the_same_under_every_variable_ordering() {
    for variable_ordering in [
        gourd_solver::VariableOrdering::FirstUnbound,
        gourd_solver::VariableOrdering::MinDomainSize,
        gourd_solver::VariableOrdering::MinDomainSizeThenMinValue,
    ] {
        let mut model = Model::new();
        let _ = queens(&mut model, 6);

        let result = Solver::new(SolverOptions {
            variable_ordering,
            collection_mode: CollectionMode::All,
            ..Default::default()
        })
        .solve(&model);

        assert_eq!(4, result.solutions.len(), "{variable_ordering:?}");
    }
}

#[test]
fn minimal_sum_matches_brute_force() {
    const COEFFICIENTS: [i32; 3] = [3, 5, 7];
    const TARGET: i64 = 23;
    const UPPER_BOUND: i32 = 5;

    let mut model = Model::new();
    let variables = (0..COEFFICIENTS.len())
        .map(|i| model.new_int_var(0, UPPER_BOUND, format!("x_{i}")).unwrap())
        .collect::<Vec<_>>();
    model
        .add_linear(
            LinearExpression::weighted_sum(&COEFFICIENTS, &variables).unwrap(),
            Relation::GreaterThanOrEqual,
            TARGET,
        )
        .unwrap();
    model
        .minimize(LinearExpression::sum(variables.iter().copied()))
        .unwrap();

    let mut brute_force = i64::MAX;
    for a in 0..=UPPER_BOUND {
        for b in 0..=UPPER_BOUND {
            for c in 0..=UPPER_BOUND {
                let weighted = (COEFFICIENTS[0] * a + COEFFICIENTS[1] * b + COEFFICIENTS[2] * c) as i64;
                if weighted >= TARGET {
                    brute_force = brute_force.min((a + b + c) as i64);
                }
            }
        }
    }

    let result = solver_with_mode(CollectionMode::Best).solve(&model);

    assert_eq!(SolveStatus::Optimal, result.status);
    assert_eq!(1, result.solutions.len());
    assert_eq!(Some(brute_force), result.objective_value());
    let best = result.best_solution().unwrap();
    assert!(model.check_solution(best));
}

#[test]
fn a_node_limit_of_one_stops_the_search() {
    let mut model = Model::new();
    let x = model.new_int_var(0, 2, "x").unwrap();
    let y = model.new_int_var(0, 2, "y").unwrap();
    model.add_all_different([x, y]).unwrap();

    let result = Solver::new(SolverOptions {
        collection_mode: CollectionMode::All,
        limits: SearchLimits::default().with_node_limit(1),
        ..Default::default()
    })
    .solve(&model);

    assert_eq!(SolveStatus::LimitReached, result.status);
    assert!(result.solutions.len() <= 1);
    assert_eq!(1, result.statistics.num_nodes);
}

#[test]
fn a_zero_time_limit_stops_before_the_first_decision() {
    let mut model = Model::new();
    let x = model.new_int_var(0, 2, "x").unwrap();
    let y = model.new_int_var(0, 2, "y").unwrap();
    model
        .add_linear(
            LinearExpression::new([(1, x), (-1, y)]),
            Relation::NotEqual,
            0,
        )
        .unwrap();

    let result = Solver::new(SolverOptions {
        collection_mode: CollectionMode::All,
        limits: SearchLimits::default().with_time_limit(Duration::ZERO),
        ..Default::default()
    })
    .solve(&model);

    assert_eq!(SolveStatus::LimitReached, result.status);
    assert!(result.solutions.is_empty());
    assert_eq!(0, result.statistics.num_nodes);
}

#[test]
fn a_zero_solution_limit_holds_when_the_root_is_a_leaf() {
    let mut model = Model::new();
    let x = model.new_int_var(0, 2, "x").unwrap();
    model.add_linear(x, Relation::Equal, 1).unwrap();

    let result = Solver::new(SolverOptions {
        collection_mode: CollectionMode::All,
        limits: SearchLimits::default().with_solution_limit(0),
        ..Default::default()
    })
    .solve(&model);

    assert_eq!(SolveStatus::LimitReached, result.status);
    assert!(result.solutions.is_empty());
}

#[test]
fn a_solution_limit_keeps_the_solutions_found_so_far() {
    let mut model = Model::new();
    let _ = queens(&mut model, 8);

    let result = Solver::new(SolverOptions {
        collection_mode: CollectionMode::All,
        limits: SearchLimits::default().with_solution_limit(5),
        ..Default::default()
    })
    .solve(&model);

    assert_eq!(SolveStatus::LimitReached, result.status);
    assert_eq!(5, result.solutions.len());
    assert!(result
        .solutions
        .iter()
        .all(|solution| model.check_solution(solution)));
}
