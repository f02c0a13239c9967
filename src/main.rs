use bandit_testbed::config::AppConfig;
use bandit_testbed::errors::ServiceError;
use bandit_testbed::report::Report;
use bandit_testbed::{run_experiment, run_experiment_parallel, Algorithm, Bandit, MaybeSeededRng};

use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ServiceError> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let experiment = &config.experiment;
    let mut rng = MaybeSeededRng::new(experiment.seed);
    info!(seed = ?rng.seed(), k = experiment.k, "Generating arms");

    let bandit = Bandit::new(config.arms.generate(experiment.k, rng.get_rng())?)?;
    info!(%bandit, "Bandit ready");
    info!(
        optimal_arm = bandit.optimal_arm(),
        expected_reward = bandit.optimal_value(),
        "Optimal arm"
    );

    let labels = config
        .algorithms
        .iter()
        .map(|algorithm| algorithm.to_string())
        .collect::<Vec<_>>();

    let results = if experiment.parallel {
        run_experiment_parallel(
            &bandit,
            &config.algorithms,
            experiment.steps,
            experiment.runs,
            rng.get_rng(),
        )?
    } else {
        let mut algorithms = config
            .algorithms
            .iter()
            .map(|algorithm| algorithm.into_inner(bandit.k()))
            .collect::<Result<Vec<Box<dyn Algorithm>>, _>>()?;
        run_experiment(
            &bandit,
            &mut algorithms,
            experiment.steps,
            experiment.runs,
            rng.get_rng(),
        )?
    };

    let report = Report::new(labels, &bandit, results)?;
    for (label, rewards) in report.labels.iter().zip(&report.average_rewards) {
        info!(
            algorithm = %label,
            final_average_reward = rewards.last().copied().unwrap_or_default(),
            "Finished"
        );
    }

    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
