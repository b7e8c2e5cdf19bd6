//! Contains the propagator for the [Element](https://sofdem.github.io/gccat/gccat/Celement.html)
//! constraint.

use super::Priority;
use super::Propagator;
use crate::basic_types::PropagationStatus;
use crate::basic_types::Solution;
use crate::engine::variables::VariableId;
use crate::engine::Domain;
use crate::engine::EmptyDomain;
use crate::engine::PropagationContext;

/// The array an element constraint selects from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementArray {
    Constants(Vec<i32>),
    Variables(Vec<VariableId>),
}

impl ElementArray {
    pub fn len(&self) -> usize {
        match self {
            ElementArray::Constants(values) => values.len(),
            ElementArray::Variables(variables) => variables.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Propagator for `array[index] == target`, where the array is 0-indexed.
///
/// Over constants the index is made domain consistent and the target is restricted to the values
/// the index can still select. Over variables the index loses every position whose variable
/// cannot equal the target, the target is bounded by the hull of the selectable variables, and
/// once the index is fixed the selected variable and the target share bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementPropagator {
    array: ElementArray,
    index: VariableId,
    target: VariableId,
}

impl ElementPropagator {
    pub(crate) fn new(array: ElementArray, index: VariableId, target: VariableId) -> Self {
        ElementPropagator {
            array,
            index,
            target,
        }
    }

    pub fn array(&self) -> &ElementArray {
        &self.array
    }

    pub fn index(&self) -> VariableId {
        self.index
    }

    pub fn target(&self) -> VariableId {
        self.target
    }

    /// Restricts the index to `[0, len - 1]`.
    fn propagate_index_bounds_within_array(
        &self,
        context: &mut PropagationContext<'_>,
    ) -> PropagationStatus {
        context.set_lower_bound(self.index, 0)?;
        let last = i32::try_from(self.array.len() - 1).unwrap_or(i32::MAX);
        context.set_upper_bound(self.index, last)
    }

    fn propagate_constants(
        &self,
        context: &mut PropagationContext<'_>,
        values: &[i32],
    ) -> PropagationStatus {
        let target = self.target;
        let target_domain = context.domain(target).clone();
        context.retain(self.index, |&position| {
            target_domain.contains(values[position as usize])
        })?;

        let reachable = context
            .domain(self.index)
            .iter()
            .map(|position| values[position as usize])
            .collect::<Vec<_>>();
        let reachable = Domain::from_values(reachable).ok_or(EmptyDomain)?;
        context.intersect(target, &reachable)
    }

    fn propagate_variables(
        &self,
        context: &mut PropagationContext<'_>,
        variables: &[VariableId],
    ) -> PropagationStatus {
        self.propagate_target_bounds_based_on_array(context, variables)?;
        self.propagate_index_based_on_domain_intersection_with_target(context, variables)?;

        if let Some(position) = context.fixed_value(self.index) {
            self.propagate_equality(context, variables[position as usize])?;
        }

        Ok(())
    }

    /// The target lies between the smallest lower bound and the largest upper bound of the
    /// selectable variables.
    fn propagate_target_bounds_based_on_array(
        &self,
        context: &mut PropagationContext<'_>,
        variables: &[VariableId],
    ) -> PropagationStatus {
        let (lower, upper) = context
            .domain(self.index)
            .iter()
            .map(|position| variables[position as usize])
            .fold((i32::MAX, i32::MIN), |(lower, upper), variable| {
                (
                    lower.min(context.lower_bound(variable)),
                    upper.max(context.upper_bound(variable)),
                )
            });

        context.set_lower_bound(self.target, lower)?;
        context.set_upper_bound(self.target, upper)
    }

    fn propagate_index_based_on_domain_intersection_with_target(
        &self,
        context: &mut PropagationContext<'_>,
        variables: &[VariableId],
    ) -> PropagationStatus {
        let to_remove = context
            .domain(self.index)
            .iter()
            .filter(|&position| {
                let element = variables[position as usize];
                !context.domain(element).intersects(context.domain(self.target))
            })
            .collect::<Vec<_>>();

        for position in to_remove {
            context.remove(self.index, position)?;
        }
        Ok(())
    }

    fn propagate_equality(
        &self,
        context: &mut PropagationContext<'_>,
        element: VariableId,
    ) -> PropagationStatus {
        let lower = context.lower_bound(element).max(context.lower_bound(self.target));
        let upper = context.upper_bound(element).min(context.upper_bound(self.target));

        context.set_lower_bound(element, lower)?;
        context.set_upper_bound(element, upper)?;
        context.set_lower_bound(self.target, lower)?;
        context.set_upper_bound(self.target, upper)
    }
}

impl Propagator for ElementPropagator {
    fn name(&self) -> &str {
        "Element"
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn scope(&self) -> Vec<VariableId> {
        let mut scope = vec![self.index, self.target];
        if let ElementArray::Variables(variables) = &self.array {
            scope.extend(variables);
        }
        scope
    }

    fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationStatus {
        if self.array.is_empty() {
            return Err(EmptyDomain);
        }
        self.propagate_index_bounds_within_array(context)?;

        match &self.array {
            ElementArray::Constants(values) => self.propagate_constants(context, values),
            ElementArray::Variables(variables) => self.propagate_variables(context, variables),
        }
    }

    fn is_satisfied(&self, solution: &Solution) -> bool {
        let Some(position) = usize::try_from(solution.value(self.index))
            .ok()
            .filter(|&position| position < self.array.len())
        else {
            return false;
        };

        let selected = match &self.array {
            ElementArray::Constants(values) => values[position],
            ElementArray::Variables(variables) => solution.value(variables[position]),
        };
        selected == solution.value(self.target)
    }
}
