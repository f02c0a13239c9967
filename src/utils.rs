/// Index of the largest value, ties resolved to the lowest index.
///
/// Both the environment's optimal arm and the greedy choice of a policy go
/// through here so that they agree on ties. NaN never wins.
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (index, &value)| match best {
            Some((_, best_value)) if value <= best_value || value.is_nan() => best,
            None if value.is_nan() => None,
            _ => Some((index, value)),
        })
        .map(|(index, _)| index)
}
