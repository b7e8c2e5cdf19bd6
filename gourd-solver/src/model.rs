//! The [`Model`]: variables with their initial domains, constraints and an optional objective.
//!
//! A model is a plain value; solving it never changes it, so the same model can be solved any
//! number of times with different [`SolverOptions`](crate::SolverOptions).

use crate::basic_types::ModelError;
use crate::basic_types::Solution;
use crate::constraints::AllDifferentPropagator;
use crate::constraints::Constraint;
use crate::constraints::ElementArray;
use crate::constraints::ElementPropagator;
use crate::constraints::LinearExpression;
use crate::constraints::LinearPropagator;
use crate::constraints::ReifiedPropagator;
use crate::constraints::Relation;
use crate::containers::KeyedVec;
use crate::engine::variables::VariableId;
use crate::engine::Domain;
use crate::engine::DomainStore;

/// Whether the objective is minimised or maximised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptimisationDirection {
    Minimise,
    Maximise,
}

/// The objective of a model.
///
/// Internally every objective is minimised; a maximised expression is negated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Objective {
    direction: OptimisationDirection,
    expression: LinearExpression,
    minimised_terms: Box<[(i64, VariableId)]>,
    minimised_constant: i64,
}

impl Objective {
    pub fn direction(&self) -> OptimisationDirection {
        self.direction
    }

    pub fn expression(&self) -> &LinearExpression {
        &self.expression
    }

    pub(crate) fn minimised_terms(&self) -> &[(i64, VariableId)] {
        &self.minimised_terms
    }

    pub(crate) fn minimised_constant(&self) -> i64 {
        self.minimised_constant
    }

    /// The value of the minimised form of the objective under a complete assignment.
    pub(crate) fn minimised_value(&self, values: &KeyedVec<VariableId, i32>) -> i64 {
        self.minimised_terms
            .iter()
            .map(|&(coefficient, variable)| coefficient * values[variable] as i64)
            .sum::<i64>()
            + self.minimised_constant
    }

    /// Converts a value of the minimised form back to the value of the expression.
    pub(crate) fn from_minimised(&self, minimised: i64) -> i64 {
        match self.direction {
            OptimisationDirection::Minimise => minimised,
            OptimisationDirection::Maximise => -minimised,
        }
    }
}

/// A constraint model over integer variables.
///
/// # Example
/// ```rust
/// # use gourd_solver::Model;
/// # use gourd_solver::Relation;
/// let mut model = Model::default();
/// let x = model.new_int_var(0, 5, "x")?;
/// let y = model.new_int_var(0, 5, "y")?;
///
/// model.add_linear([(1, x), (1, y)], Relation::Equal, 7)?;
/// model.add_all_different([x, y])?;
/// model.maximize([(1, x)])?;
/// # Ok::<(), gourd_solver::ModelError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Model {
    names: KeyedVec<VariableId, String>,
    domains: KeyedVec<VariableId, Domain>,
    constraints: Vec<Constraint>,
    objective: Option<Objective>,
}

impl Model {
    pub fn new() -> Self {
        Model::default()
    }

    /// Creates a variable with domain `[lower_bound, upper_bound]`.
    pub fn new_int_var(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: impl Into<String>,
    ) -> Result<VariableId, ModelError> {
        let name = name.into();
        let Some(domain) = Domain::new(lower_bound, upper_bound) else {
            return Err(ModelError::InvalidBounds {
                name,
                lower_bound,
                upper_bound,
            });
        };

        Ok(self.push_variable(domain, name))
    }

    /// Creates a variable whose domain is exactly `values`.
    pub fn new_int_var_from_values(
        &mut self,
        values: impl IntoIterator<Item = i32>,
        name: impl Into<String>,
    ) -> Result<VariableId, ModelError> {
        let name = name.into();
        let Some(domain) = Domain::from_values(values) else {
            return Err(ModelError::EmptyValueSet { name });
        };

        Ok(self.push_variable(domain, name))
    }

    /// Creates a 0/1 variable.
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> VariableId {
        self.push_variable(Domain::boolean(), name.into())
    }

    fn push_variable(&mut self, domain: Domain, name: String) -> VariableId {
        let _ = self.names.push(name);
        self.domains.push(domain)
    }

    pub fn num_variables(&self) -> usize {
        self.domains.len()
    }

    /// All variables in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = VariableId> {
        self.domains.keys()
    }

    pub fn name(&self, variable: VariableId) -> Option<&str> {
        self.names.get(variable).map(String::as_str)
    }

    /// The domain the variable was created with.
    pub fn initial_domain(&self, variable: VariableId) -> Option<&Domain> {
        self.domains.get(variable)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    /// A fresh store holding the initial domains of all variables.
    pub fn domain_store(&self) -> DomainStore {
        DomainStore::new(self.domains.iter().cloned())
    }

    /// Builds `expression rel bound` without posting it; see [`Model::add_constraint`].
    pub fn linear(
        &self,
        expression: impl Into<LinearExpression>,
        relation: Relation,
        bound: i64,
    ) -> Result<Constraint, ModelError> {
        let expression = expression.into();
        self.check_variables(expression.variables())?;

        let terms = expression.merged_terms();
        let rhs = bound
            .checked_sub(expression.constant())
            .ok_or_else(|| ModelError::Overflow("the bound of a linear constraint".to_owned()))?;
        self.check_linear_range(&terms, rhs, "a linear constraint")?;

        Ok(Constraint::Linear(LinearPropagator::new(terms, relation, rhs)))
    }

    /// Builds `all_different(variables)` without posting it; see [`Model::add_constraint`].
    pub fn all_different(
        &self,
        variables: impl IntoIterator<Item = VariableId>,
    ) -> Result<Constraint, ModelError> {
        let variables = variables.into_iter().collect::<Vec<_>>();
        self.check_variables(variables.iter().copied())?;

        Ok(Constraint::AllDifferent(AllDifferentPropagator::new(variables)))
    }

    /// Builds `array[index] == target` without posting it; see [`Model::add_constraint`]. The
    /// array is indexed from 0.
    pub fn element(
        &self,
        array: ElementArray,
        index: VariableId,
        target: VariableId,
    ) -> Result<Constraint, ModelError> {
        if array.is_empty() {
            return Err(ModelError::EmptyElementArray);
        }
        self.check_variables([index, target])?;
        if let ElementArray::Variables(variables) = &array {
            self.check_variables(variables.iter().copied())?;
        }

        Ok(Constraint::Element(ElementPropagator::new(array, index, target)))
    }

    /// Builds `literal <-> constraint` without posting it; see [`Model::add_constraint`]. Only
    /// linear constraints can be reified.
    pub fn reified(
        &self,
        literal: VariableId,
        constraint: Constraint,
    ) -> Result<Constraint, ModelError> {
        self.check_variables([literal])?;

        match constraint {
            Constraint::Linear(linear) => {
                Ok(Constraint::Reified(ReifiedPropagator::new(literal, linear)))
            }
            other => Err(ModelError::UnsupportedConstraint(format!(
                "only linear constraints can be reified, not {}",
                other.name()
            ))),
        }
    }

    /// Posts a constraint. Linear arithmetic is re-checked for overflow against the domains of
    /// this model, so constraints built by another model are accepted only if they fit.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), ModelError> {
        self.check_variables(constraint.scope())?;
        match &constraint {
            Constraint::Linear(linear) => {
                self.check_linear_range(linear.terms(), linear.rhs(), "a linear constraint")?
            }
            Constraint::Reified(reified) => {
                let linear = reified.constraint();
                self.check_linear_range(linear.terms(), linear.rhs(), "a reified constraint")?
            }
            Constraint::AllDifferent(_) | Constraint::Element(_) => {}
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// Posts `expression rel bound`.
    pub fn add_linear(
        &mut self,
        expression: impl Into<LinearExpression>,
        relation: Relation,
        bound: i64,
    ) -> Result<(), ModelError> {
        let constraint = self.linear(expression, relation, bound)?;
        self.add_constraint(constraint)
    }

    /// Posts that `variables` take pairwise distinct values.
    pub fn add_all_different(
        &mut self,
        variables: impl IntoIterator<Item = VariableId>,
    ) -> Result<(), ModelError> {
        let constraint = self.all_different(variables)?;
        self.add_constraint(constraint)
    }

    /// Posts `array[index] == target`, indexing from 0.
    pub fn add_element(
        &mut self,
        array: ElementArray,
        index: VariableId,
        target: VariableId,
    ) -> Result<(), ModelError> {
        let constraint = self.element(array, index, target)?;
        self.add_constraint(constraint)
    }

    /// Posts `literal <-> constraint`, where `constraint` is linear.
    pub fn add_reified(
        &mut self,
        literal: VariableId,
        constraint: Constraint,
    ) -> Result<(), ModelError> {
        let constraint = self.reified(literal, constraint)?;
        self.add_constraint(constraint)
    }

    pub fn minimize(&mut self, expression: impl Into<LinearExpression>) -> Result<(), ModelError> {
        self.set_objective(OptimisationDirection::Minimise, expression.into())
    }

    pub fn maximize(&mut self, expression: impl Into<LinearExpression>) -> Result<(), ModelError> {
        self.set_objective(OptimisationDirection::Maximise, expression.into())
    }

    fn set_objective(
        &mut self,
        direction: OptimisationDirection,
        expression: LinearExpression,
    ) -> Result<(), ModelError> {
        if self.objective.is_some() {
            return Err(ModelError::ObjectiveAlreadySet);
        }
        self.check_variables(expression.variables())?;

        let sign = match direction {
            OptimisationDirection::Minimise => 1,
            OptimisationDirection::Maximise => -1,
        };
        let minimised_terms = expression
            .merged_terms()
            .into_iter()
            .map(|(coefficient, variable)| (sign * coefficient, variable))
            .collect::<Vec<_>>();
        let minimised_constant = sign * expression.constant();
        self.check_linear_range(&minimised_terms, minimised_constant, "the objective")?;

        self.objective = Some(Objective {
            direction,
            expression,
            minimised_terms: minimised_terms.into_boxed_slice(),
            minimised_constant,
        });
        Ok(())
    }

    /// Whether `solution` assigns every variable of this model a value from its initial domain
    /// and satisfies every constraint.
    pub fn check_solution(&self, solution: &Solution) -> bool {
        solution.num_variables() == self.num_variables()
            && solution
                .iter()
                .all(|(variable, value)| self.domains[variable].contains(value))
            && self
                .constraints
                .iter()
                .all(|constraint| constraint.is_satisfied(solution))
    }

    fn check_variables(
        &self,
        variables: impl IntoIterator<Item = VariableId>,
    ) -> Result<(), ModelError> {
        match variables
            .into_iter()
            .find(|&variable| variable.id() as usize >= self.num_variables())
        {
            Some(unknown) => Err(ModelError::UnknownVariable(unknown)),
            None => Ok(()),
        }
    }

    /// Ensures that the solver can evaluate `sum(terms) - rhs`, and any partial sum of it, on the
    /// initial domains without overflowing, with room to spare for bound arithmetic.
    fn check_linear_range(
        &self,
        terms: &[(i64, VariableId)],
        rhs: i64,
        description: &str,
    ) -> Result<(), ModelError> {
        let magnitude = terms
            .iter()
            .try_fold(0_i64, |magnitude, &(coefficient, variable)| {
                let domain = &self.domains[variable];
                let largest = (domain.min() as i64).abs().max((domain.max() as i64).abs());
                magnitude.checked_add(coefficient.checked_abs()?.checked_mul(largest)?)
            })
            .and_then(|magnitude| magnitude.checked_mul(2))
            .and_then(|magnitude| magnitude.checked_add(rhs.checked_abs()?))
            .and_then(|magnitude| magnitude.checked_add(2));

        match magnitude {
            Some(_) => Ok(()),
            None => Err(ModelError::Overflow(description.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bounds_are_rejected_without_creating_a_variable() {
        let mut model = Model::default();

        let result = model.new_int_var(3, 2, "x");

        assert_eq!(
            Err(ModelError::InvalidBounds {
                name: "x".to_owned(),
                lower_bound: 3,
                upper_bound: 2
            }),
            result
        );
        assert_eq!(0, model.num_variables());
    }

    #[test]
    fn empty_value_sets_are_rejected() {
        let mut model = Model::default();

        assert_eq!(
            Err(ModelError::EmptyValueSet {
                name: "x".to_owned()
            }),
            model.new_int_var_from_values([], "x")
        );
    }

    #[test]
    fn variables_of_another_model_are_rejected() {
        let mut other = Model::default();
        let _ = other.new_int_var(0, 1, "a").unwrap();
        let foreign = other.new_int_var(0, 1, "b").unwrap();

        let mut model = Model::default();
        let x = model.new_int_var(0, 1, "x").unwrap();

        assert_eq!(
            Err(ModelError::UnknownVariable(foreign)),
            model.add_all_different([x, foreign])
        );
        assert!(model.constraints().is_empty());
    }

    #[test]
    fn only_linear_constraints_can_be_reified() {
        let mut model = Model::default();
        let x = model.new_int_var(0, 3, "x").unwrap();
        let y = model.new_int_var(0, 3, "y").unwrap();
        let b = model.new_bool_var("b");

        let all_different = model.all_different([x, y]).unwrap();
        assert!(matches!(
            model.add_reified(b, all_different),
            Err(ModelError::UnsupportedConstraint(_))
        ));

        let linear = model.linear([(1, x), (-1, y)], Relation::LessThanOrEqual, 0).unwrap();
        assert_eq!(Ok(()), model.add_reified(b, linear));
    }

    #[test]
    fn element_over_an_empty_array_is_rejected() {
        let mut model = Model::default();
        let index = model.new_int_var(0, 3, "i").unwrap();
        let target = model.new_int_var(0, 3, "t").unwrap();

        assert_eq!(
            Err(ModelError::EmptyElementArray),
            model.add_element(ElementArray::Constants(vec![]), index, target)
        );
    }

    #[test]
    fn overflowing_linear_constraints_are_rejected() {
        let mut model = Model::default();
        let x = model.new_int_var(i32::MIN, i32::MAX, "x").unwrap();
        let terms = vec![(i32::MAX, x); 3];

        assert!(matches!(
            model.add_linear(terms, Relation::LessThanOrEqual, 0),
            Err(ModelError::Overflow(_))
        ));
    }

    #[test]
    fn constraints_from_a_narrower_model_are_checked_for_overflow() {
        let mut narrow = Model::default();
        let narrow_variables = (0..3)
            .map(|i| narrow.new_int_var(0, 1, format!("x_{i}")).unwrap())
            .collect::<Vec<_>>();
        let literal = narrow.new_bool_var("b");
        let terms = narrow_variables
            .iter()
            .map(|&variable| (i32::MAX, variable))
            .collect::<Vec<_>>();
        let linear = narrow
            .linear(terms, Relation::LessThanOrEqual, 0)
            .unwrap();
        let reified = narrow.reified(literal, linear.clone()).unwrap();

        let mut wide = Model::default();
        for i in 0..4 {
            let _ = wide.new_int_var(i32::MIN, i32::MAX, format!("y_{i}")).unwrap();
        }

        assert!(matches!(
            wide.add_constraint(linear),
            Err(ModelError::Overflow(_))
        ));
        assert!(matches!(
            wide.add_constraint(reified),
            Err(ModelError::Overflow(_))
        ));
        assert!(wide.constraints().is_empty());
    }

    #[test]
    fn only_one_objective_can_be_set() {
        let mut model = Model::default();
        let x = model.new_int_var(0, 3, "x").unwrap();

        assert_eq!(Ok(()), model.minimize(x));
        assert_eq!(Err(ModelError::ObjectiveAlreadySet), model.maximize(x));
    }

    #[test]
    fn constants_are_folded_into_the_bound() {
        let mut model = Model::default();
        let x = model.new_int_var(0, 9, "x").unwrap();

        let constraint = model
            .linear(LinearExpression::from(x).with_constant(3), Relation::Equal, 5)
            .unwrap();

        let Constraint::Linear(linear) = constraint else {
            panic!("expected a linear constraint");
        };
        assert_eq!(2, linear.rhs());
    }

    #[test]
    fn solutions_are_checked_against_initial_domains_and_constraints() {
        let mut model = Model::default();
        let x = model.new_int_var(0, 2, "x").unwrap();
        let y = model.new_int_var(0, 2, "y").unwrap();
        model.add_all_different([x, y]).unwrap();

        let solution = |values: [i32; 2]| {
            let mut assignment = KeyedVec::default();
            for value in values {
                let _ = assignment.push(value);
            }
            Solution::new(assignment, None)
        };

        assert!(model.check_solution(&solution([0, 1])));
        assert!(!model.check_solution(&solution([1, 1])));
        assert!(!model.check_solution(&solution([0, 3])));
    }
}
