use crate::arms::Bandit;
use crate::errors::BanditError;
use crate::experiment::{ArmStats, ExperimentResults, Matrix};

use serde::Serialize;

/// Running sum of `optimal_value - average_reward` along each row.
pub fn cumulative_regret(average_rewards: &Matrix, optimal_value: f64) -> Matrix {
    average_rewards
        .iter()
        .map(|row| {
            row.iter()
                .scan(0.0, |regret, &reward| {
                    *regret += optimal_value - reward;
                    Some(*regret)
                })
                .collect()
        })
        .collect()
}

/// One line of a plot: a label and its value at every step.
#[derive(Debug, Serialize, PartialEq)]
pub struct Series<'a> {
    pub label: &'a str,
    pub values: &'a [f64],
}

/// Pairs every row of `matrix` with the label of the algorithm that produced it.
pub fn series<'a>(
    labels: &'a [String],
    matrix: &'a Matrix,
) -> Result<Vec<Series<'a>>, BanditError> {
    if labels.len() != matrix.len() {
        return Err(BanditError::ShapeMismatch {
            expected: matrix.len(),
            actual: labels.len(),
        });
    }

    Ok(labels
        .iter()
        .zip(matrix)
        .map(|(label, row)| Series {
            label: label.as_str(),
            values: row.as_slice(),
        })
        .collect())
}

/// Everything a plotting layer needs from one experiment.
#[derive(Debug, Serialize)]
pub struct Report {
    pub labels: Vec<String>,
    pub steps: usize,
    pub optimal_arm: usize,
    pub optimal_value: f64,
    pub expected_rewards: Vec<f64>,
    pub average_rewards: Matrix,
    pub optimal_selections: Matrix,
    pub cumulative_regret: Matrix,
    pub arm_stats: Vec<Vec<ArmStats>>,
}

impl Report {
    pub fn new(
        labels: Vec<String>,
        bandit: &Bandit,
        results: ExperimentResults,
    ) -> Result<Self, BanditError> {
        if labels.len() != results.num_algorithms() {
            return Err(BanditError::ShapeMismatch {
                expected: results.num_algorithms(),
                actual: labels.len(),
            });
        }

        let optimal_value = bandit.optimal_value();
        Ok(Self {
            labels,
            steps: results.steps(),
            optimal_arm: bandit.optimal_arm(),
            optimal_value,
            expected_rewards: bandit.expected_rewards().to_vec(),
            cumulative_regret: cumulative_regret(&results.average_rewards, optimal_value),
            average_rewards: results.average_rewards,
            optimal_selections: results.optimal_selections,
            arm_stats: results.arm_stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arms::{Arm, GaussianArm};
    use crate::experiment::run_experiment;
    use approx::assert_abs_diff_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    const SEED: u64 = 1234;

    fn make_results(rows: usize, steps: usize) -> ExperimentResults {
        ExperimentResults {
            average_rewards: vec![vec![1.0; steps]; rows],
            optimal_selections: vec![vec![50.0; steps]; rows],
            arm_stats: vec![
                vec![ArmStats {
                    pulls: 0,
                    mean_reward: 0.0
                }];
                rows
            ],
            steps,
        }
    }

    fn make_bandit() -> Bandit {
        Bandit::new(vec![
            Arc::new(GaussianArm::new(1.0, 1.0).unwrap()) as Arc<dyn Arm>,
            Arc::new(GaussianArm::new(2.5, 1.0).unwrap()) as Arc<dyn Arm>,
        ])
        .unwrap()
    }

    #[test]
    fn regret_accumulates() {
        let regret = cumulative_regret(&vec![vec![1.0, 2.0, 3.0], vec![3.0, 3.0, 3.0]], 3.0);
        assert_eq!(regret[1], vec![0.0, 0.0, 0.0]);
        assert_abs_diff_eq!(regret[0][0], 2.0);
        assert_abs_diff_eq!(regret[0][1], 3.0);
        assert_abs_diff_eq!(regret[0][2], 3.0);
    }

    #[test]
    fn regret_empty() {
        assert!(cumulative_regret(&vec![], 1.0).is_empty());
        assert_eq!(cumulative_regret(&vec![vec![]], 1.0), vec![Vec::<f64>::new()]);
    }

    #[test]
    fn series_labels_rows() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let matrix = vec![vec![1.0, 2.0], vec![3.0, 4.0]];

        let lines = series(&labels, &matrix).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].label, "b");
        assert_eq!(lines[1].values, &[3.0, 4.0]);
    }

    #[test]
    fn series_shape_mismatch() {
        let labels = vec!["a".to_string()];
        let matrix = vec![vec![1.0], vec![2.0]];
        assert_eq!(
            series(&labels, &matrix),
            Err(BanditError::ShapeMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn report() {
        let report = Report::new(
            vec!["EpsilonGreedy (epsilon=0)".to_string()],
            &make_bandit(),
            make_results(1, 4),
        )
        .unwrap();

        assert_eq!(report.steps, 4);
        assert_eq!(report.optimal_arm, 1);
        assert_eq!(report.optimal_value, 2.5);
        assert_eq!(report.expected_rewards, vec![1.0, 2.5]);
        assert_eq!(report.cumulative_regret, vec![vec![1.5, 3.0, 4.5, 6.0]]);
    }

    #[test]
    fn report_without_algorithms() {
        let bandit = make_bandit();
        let mut rng = SmallRng::seed_from_u64(SEED);
        let results = run_experiment(&bandit, &mut [], 7, 2, &mut rng).unwrap();

        let report = Report::new(vec![], &bandit, results).unwrap();
        assert_eq!(report.steps, 7);
        assert!(report.average_rewards.is_empty());
        assert!(report.cumulative_regret.is_empty());
    }

    #[test]
    fn report_shape_mismatch() {
        let result = Report::new(vec![], &make_bandit(), make_results(2, 4));
        assert!(matches!(
            result,
            Err(BanditError::ShapeMismatch {
                expected: 2,
                actual: 0
            })
        ));
    }
}
