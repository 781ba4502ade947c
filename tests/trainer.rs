use ndarray::{Array2, array};

use nnet_trainer::{
    NnErr,
    arch::{Network, NeuralNet, loss::Logit},
    flatten,
    optimization::{GradientDescent, GradientDescentConfig},
    training::Trainer,
};

// Logical OR, one example per column.
fn or_data() -> (Array2<f64>, Array2<f64>) {
    (
        array![[0., 0., 1., 1.], [0., 1., 0., 1.]],
        array![[0., 1., 1., 1.]],
    )
}

fn perceptron() -> NeuralNet {
    NeuralNet::builder(&[2, 1]).seed(Some(42)).build().unwrap()
}

#[test]
fn learns_logical_or() {
    let (x, y) = or_data();
    let mut net = perceptron();
    let gd = GradientDescent::new(1., 20_000).unwrap();
    let mut trainer = Trainer::new(Logit, gd).learn_rate(0.1).iterations(3);

    let best = trainer.train(&mut net, x.view(), y.view()).unwrap().unwrap();
    assert!(best.success, "{}", best.message);
    assert!((best.fun - 0.326547).abs() < 1e-5, "cost = {}", best.fun);

    // the committed weights are the best run's
    assert_eq!(flatten::unroll_owned(net.weights()), best.x);

    let forward = net
        .calculate_cost(net.weights(), x.view(), y.view(), &Logit, 0.1)
        .unwrap();
    assert!((forward.cost - best.fun).abs() < 1e-12);

    let predictions = forward.hypothesis().mapv(|h| if h > 0.5 { 1. } else { 0. });
    assert_eq!(predictions, y);
}

#[test]
fn momentum_defaults_converge_too() {
    let (x, y) = or_data();
    let mut net = perceptron();
    let gd = GradientDescent::try_from(GradientDescentConfig::default()).unwrap();
    let mut trainer = Trainer::new(Logit, gd).learn_rate(0.1).iterations(2);

    let best = trainer.train(&mut net, x.view(), y.view()).unwrap().unwrap();
    assert!((best.fun - 0.326547).abs() < 1e-5, "cost = {}", best.fun);
}

#[test]
fn capped_minimizer_commits_nothing() {
    let (x, y) = or_data();
    let mut net = perceptron();
    let gd = GradientDescent::new(1., 1).unwrap();
    let mut trainer = Trainer::new(Logit, gd).iterations(4);

    let best = trainer.train(&mut net, x.view(), y.view()).unwrap();
    assert!(best.is_none());

    let dims: Vec<_> = net.weights().iter().map(|w| w.dim()).collect();
    assert_eq!(dims, net.dimensions());
}

#[test]
fn mismatched_outputs_propagate() {
    let (x, _) = or_data();
    let y = Array2::zeros((2, 4));
    let mut net = perceptron();
    let gd = GradientDescent::new(1., 100).unwrap();
    let mut trainer = Trainer::new(Logit, gd);

    let err = trainer.train(&mut net, x.view(), y.view()).unwrap_err();
    assert!(matches!(
        err,
        NnErr::DimensionMismatch {
            what: "rows of y",
            got: 2,
            expected: 1
        }
    ));
}
