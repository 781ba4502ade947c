use std::env;

use anyhow::Context;
use log::{info, warn};
use nnet_trainer::{
    arch::{
        Network, NeuralNet,
        loss::{ErrFn, ErrFnConfig, Logit, Squared},
    },
    config::TrainingConfig,
    dataset::Dataset,
    flatten,
    optimization::GradientDescent,
    training::{CostFn, FlatCostFn, Trainer, check},
};
use rand::{SeedableRng, rngs::StdRng};

const GRADIENT_CHECK_EPSILON: f64 = 0.01;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match env::args().nth(1) {
        Some(path) => {
            TrainingConfig::load(&path).with_context(|| format!("loading config from {path}"))?
        }
        None => {
            info!("no config given, using the defaults");
            TrainingConfig::default()
        }
    };

    let mut network = config.network.build()?;
    let minimizer = config.build_minimizer()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let dataset = Dataset::random(
        &mut rng,
        config.network.input_units,
        config.network.output_units,
        config.examples,
    )?;

    info!(
        "training a {:?} network on {} examples, {} restarts",
        network.units(),
        dataset.len(),
        config.iterations
    );

    match config.err_fn {
        ErrFnConfig::Logit => run(&config, Logit, minimizer, &mut network, &dataset),
        ErrFnConfig::Squared => run(&config, Squared, minimizer, &mut network, &dataset),
    }
}

fn run<E: ErrFn>(
    config: &TrainingConfig,
    err_fn: E,
    minimizer: GradientDescent,
    network: &mut NeuralNet,
    dataset: &Dataset,
) -> anyhow::Result<()> {
    if config.gradient_check {
        gradient_check(config, &err_fn, network, dataset)?;
    }

    let mut trainer = Trainer::new(err_fn, minimizer)
        .learn_rate(config.learn_rate)
        .iterations(config.iterations);

    match trainer.train(network, dataset.x(), dataset.y())? {
        Some(best) => info!("best cost {} after {} iterations", best.fun, best.nit),
        None => warn!("training did not converge"),
    }

    Ok(())
}

fn gradient_check<E: ErrFn>(
    config: &TrainingConfig,
    err_fn: &E,
    network: &NeuralNet,
    dataset: &Dataset,
) -> anyhow::Result<()> {
    let cost_fn = CostFn::new(network, dataset.x(), dataset.y(), config.learn_rate, err_fn);
    let dimensions = network.dimensions();
    let flat = FlatCostFn::new(&cost_fn, &dimensions);

    let weights = flatten::unroll_owned(network.weights());
    let (_, analytic) = flat.evaluate(weights.view())?;
    let numerical = check::numerical_gradient(|v| flat.cost(v), &weights, GRADIENT_CHECK_EPSILON)?;
    let diff = check::max_abs_diff(analytic.view(), numerical.view())?;

    info!(
        "gradient check over {} weights: max deviation {diff:e}",
        weights.len()
    );

    Ok(())
}
