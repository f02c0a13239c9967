//! Multi-run experiment drivers.
//!
//! Both drivers replay `runs` independent trajectories of `steps` pulls for
//! every algorithm against the same arm configuration and average the
//! outcome per step:
//!
//! - [`run_experiment`] reuses the caller's algorithm instances, resetting
//!   them at the start of each run, and draws every sample from one stream.
//! - [`run_experiment_parallel`] builds fresh instances per run from their
//!   descriptors and gives every run its own sub-stream, so runs can be spread
//!   over the rayon pool.

use crate::arms::Bandit;
use crate::errors::BanditError;
use crate::policies::{Algorithm, AlgorithmType};

use rand::{rngs::SmallRng, RngCore, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Matrix indexed by `[algorithm][step]`.
pub type Matrix = Vec<Vec<f64>>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArmStats {
    pub pulls: u64,
    pub mean_reward: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExperimentResults {
    /// Reward per step, averaged over runs.
    pub average_rewards: Matrix,
    /// Share of runs, in percent, that picked the optimal arm at each step.
    pub optimal_selections: Matrix,
    /// Per-arm totals over all runs, indexed by `[algorithm][arm]`.
    pub arm_stats: Vec<Vec<ArmStats>>,
    /// Steps per run, kept even when no algorithm was played.
    pub steps: usize,
}

impl ExperimentResults {
    pub fn num_algorithms(&self) -> usize {
        self.average_rewards.len()
    }

    pub fn steps(&self) -> usize {
        self.steps
    }
}

// Running sums of one or more runs. Merging two accumulators is equivalent
// to having played their runs back to back.
#[derive(Debug)]
struct Accumulator {
    steps: usize,
    rewards: Matrix,
    optimal_selections: Matrix,
    pulls: Vec<Vec<u64>>,
    arm_rewards: Matrix,
}

impl Accumulator {
    fn new(num_algorithms: usize, steps: usize, k: usize) -> Self {
        Self {
            steps,
            rewards: vec![vec![0.0; steps]; num_algorithms],
            optimal_selections: vec![vec![0.0; steps]; num_algorithms],
            pulls: vec![vec![0; k]; num_algorithms],
            arm_rewards: vec![vec![0.0; k]; num_algorithms],
        }
    }

    fn record(&mut self, algorithm: usize, step: usize, arm: usize, reward: f64, is_optimal: bool) {
        self.rewards[algorithm][step] += reward;
        if is_optimal {
            self.optimal_selections[algorithm][step] += 1.0;
        }
        self.pulls[algorithm][arm] += 1;
        self.arm_rewards[algorithm][arm] += reward;
    }

    fn merge(mut self, other: Self) -> Self {
        add_into(&mut self.rewards, &other.rewards);
        add_into(&mut self.optimal_selections, &other.optimal_selections);
        add_into(&mut self.arm_rewards, &other.arm_rewards);
        self.pulls
            .iter_mut()
            .zip(&other.pulls)
            .for_each(|(row, other)| row.iter_mut().zip(other).for_each(|(a, b)| *a += b));
        self
    }

    fn finish(self, runs: usize) -> ExperimentResults {
        let arm_stats = self
            .pulls
            .iter()
            .zip(&self.arm_rewards)
            .map(|(pulls, rewards)| {
                pulls
                    .iter()
                    .zip(rewards)
                    .map(|(&pulls, &total)| ArmStats {
                        pulls,
                        mean_reward: if pulls > 0 { total / pulls as f64 } else { 0.0 },
                    })
                    .collect()
            })
            .collect();

        // nothing was played, keep the zeros rather than dividing by zero
        if runs == 0 {
            return ExperimentResults {
                average_rewards: self.rewards,
                optimal_selections: self.optimal_selections,
                arm_stats,
                steps: self.steps,
            };
        }

        let runs = runs as f64;
        ExperimentResults {
            average_rewards: scale(self.rewards, 1.0 / runs),
            optimal_selections: scale(self.optimal_selections, 100.0 / runs),
            arm_stats,
            steps: self.steps,
        }
    }
}

fn add_into(target: &mut Matrix, other: &Matrix) {
    target
        .iter_mut()
        .zip(other)
        .for_each(|(row, other)| row.iter_mut().zip(other).for_each(|(a, b)| *a += b));
}

fn scale(matrix: Matrix, factor: f64) -> Matrix {
    matrix
        .into_iter()
        .map(|row| row.into_iter().map(|value| value * factor).collect())
        .collect()
}

fn play_run(
    bandit: &Bandit,
    algorithms: &mut [Box<dyn Algorithm>],
    steps: usize,
    rng: &mut dyn RngCore,
    accumulator: &mut Accumulator,
) -> Result<(), BanditError> {
    // same arms, new environment
    let environment = Bandit::new(bandit.arms().to_vec())?;
    let optimal_arm = environment.optimal_arm();

    algorithms.iter_mut().for_each(|algorithm| algorithm.reset());

    for step in 0..steps {
        for (index, algorithm) in algorithms.iter_mut().enumerate() {
            let arm = algorithm.select_arm(rng);
            let reward = environment.pull_arm(arm, rng)?;
            algorithm.update(arm, reward)?;

            accumulator.record(index, step, arm, reward, arm == optimal_arm);
        }
    }

    Ok(())
}

fn warn_if_degenerate(steps: usize, runs: usize) {
    if steps == 0 || runs == 0 {
        warn!(steps, runs, "Degenerate experiment, results will be empty or zero");
    }
}

/// Runs `runs` independent trajectories of `steps` pulls for each algorithm.
///
/// Algorithms are played in the given order at each step, which fixes both
/// the row order of the results and the order in which they consume `rng`.
/// Their learned state is reset at the start of every run and left as it is
/// after the last one.
pub fn run_experiment(
    bandit: &Bandit,
    algorithms: &mut [Box<dyn Algorithm>],
    steps: usize,
    runs: usize,
    rng: &mut dyn RngCore,
) -> Result<ExperimentResults, BanditError> {
    info!(
        runs,
        steps,
        algorithms = algorithms.len(),
        arms = bandit.k(),
        "Starting experiment"
    );
    warn_if_degenerate(steps, runs);

    let mut accumulator = Accumulator::new(algorithms.len(), steps, bandit.k());
    for run in 0..runs {
        debug!(run, "Playing run");
        play_run(bandit, algorithms, steps, rng, &mut accumulator)?;
    }

    info!(runs, steps, "Experiment finished");
    Ok(accumulator.finish(runs))
}

/// Parallel counterpart of [`run_experiment`] working from descriptors.
///
/// One seed per run is drawn from `rng` up front, so the outcome only
/// depends on `rng` and not on how runs are scheduled. It does differ from
/// the sequential driver fed with the same stream.
pub fn run_experiment_parallel(
    bandit: &Bandit,
    algorithms: &[AlgorithmType],
    steps: usize,
    runs: usize,
    rng: &mut dyn RngCore,
) -> Result<ExperimentResults, BanditError> {
    info!(
        runs,
        steps,
        algorithms = algorithms.len(),
        arms = bandit.k(),
        "Starting parallel experiment"
    );
    warn_if_degenerate(steps, runs);

    // fail on bad descriptors before spawning anything
    algorithms
        .iter()
        .try_for_each(|algorithm| algorithm.into_inner(bandit.k()).map(|_| ()))?;

    let (num_algorithms, k) = (algorithms.len(), bandit.k());
    let seeds = (0..runs).map(|_| rng.next_u64()).collect::<Vec<_>>();

    let accumulator = seeds
        .into_par_iter()
        .enumerate()
        .map(|(run, seed)| -> Result<Accumulator, BanditError> {
            debug!(run, seed, "Playing run");
            let mut run_rng = SmallRng::seed_from_u64(seed);
            let mut instances = algorithms
                .iter()
                .map(|algorithm| algorithm.into_inner(k))
                .collect::<Result<Vec<_>, _>>()?;

            let mut accumulator = Accumulator::new(num_algorithms, steps, k);
            play_run(bandit, &mut instances, steps, &mut run_rng, &mut accumulator)?;
            Ok(accumulator)
        })
        .try_reduce(
            || Accumulator::new(num_algorithms, steps, k),
            |a, b| Ok(a.merge(b)),
        )?;

    info!(runs, steps, "Parallel experiment finished");
    Ok(accumulator.finish(runs))
}
