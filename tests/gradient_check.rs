use ndarray::{Array1, Array2, s};
use rand::{Rng, SeedableRng, rngs::StdRng};

use nnet_trainer::{
    arch::{
        Network, NeuralNet, WeightInit,
        activations::ActFn,
        loss::{ErrFn, Logit, Squared},
    },
    dataset::Dataset,
    flatten,
    training::{CostFn, FlatCostFn, check},
};

fn random_weights<R: Rng>(rng: &mut R, net: &NeuralNet, init: WeightInit) -> Vec<Array2<f64>> {
    net.dimensions()
        .into_iter()
        .map(|dim| init.sample(&mut *rng, dim).unwrap())
        .collect()
}

/// Compares every analytic gradient component against its central difference estimate.
fn assert_gradient_close<E: ErrFn>(
    net: &NeuralNet,
    data: &Dataset,
    err_fn: &E,
    learn_rate: f64,
    weights: &Array1<f64>,
    e: f64,
    tolerance: f64,
) {
    let cost_fn = CostFn::new(net, data.x(), data.y(), learn_rate, err_fn);
    let dimensions = net.dimensions();
    let flat = FlatCostFn::new(&cost_fn, &dimensions);

    let (cost, analytic) = flat.evaluate(weights.view()).unwrap();
    assert!(cost.is_finite() && cost >= 0., "cost = {cost}");

    let numerical = check::numerical_gradient(|v| flat.cost(v), weights, e).unwrap();
    assert_eq!(analytic.len(), numerical.len());

    for (i, (a, n)) in analytic.iter().zip(&numerical).enumerate() {
        assert!(
            (a - n).abs() < tolerance,
            "gradient component {i}: analytic {a} != numerical {n}"
        );
    }
}

#[test]
fn ten_eight_six_with_bias_and_logit_error() {
    let mut rng = StdRng::seed_from_u64(2024);
    let net = NeuralNet::builder(&[10, 8, 6])
        .act_fns(vec![ActFn::identity(), ActFn::sigmoid(1.), ActFn::sigmoid(1.)])
        .bias(true)
        .seed(Some(1))
        .build()
        .unwrap();
    let data = Dataset::random(&mut rng, 10, 6, 500).unwrap();

    let size = flatten::size(&net.dimensions());
    let weights: Array1<f64> = (0..size).map(|_| rng.random()).collect();

    // three decimals, as compared element by element
    assert_gradient_close(&net, &data, &Logit, 1., &weights, 0.01, 1.5e-3);
}

#[test]
fn without_bias() {
    let mut rng = StdRng::seed_from_u64(7);
    let net = NeuralNet::builder(&[4, 5, 3])
        .bias(false)
        .seed(Some(7))
        .build()
        .unwrap();
    let data = Dataset::random(&mut rng, 4, 3, 40).unwrap();
    let weights = flatten::unroll_owned(net.weights());

    assert_gradient_close(&net, &data, &Logit, 0.5, &weights, 1e-4, 1e-6);
}

#[test]
fn deep_tanh_network_with_squared_error() {
    let mut rng = StdRng::seed_from_u64(11);
    let net = NeuralNet::builder(&[3, 6, 4, 2])
        .act_fns(vec![
            ActFn::identity(),
            ActFn::tanh(),
            ActFn::tanh(),
            ActFn::identity(),
        ])
        .seed(Some(11))
        .build()
        .unwrap();
    let data = Dataset::random(&mut rng, 3, 2, 25).unwrap();
    let init = WeightInit::Uniform {
        low: -0.5,
        high: 0.5,
    };
    let weights = flatten::unroll_owned(&random_weights(&mut rng, &net, init));

    assert_gradient_close(&net, &data, &Squared, 0.3, &weights, 1e-4, 1e-6);
}

#[test]
fn amplified_sigmoid_without_regularization() {
    let mut rng = StdRng::seed_from_u64(5);
    let net = NeuralNet::builder(&[2, 3, 1])
        .act_fn(ActFn::sigmoid(2.5))
        .seed(Some(5))
        .build()
        .unwrap();
    let data = Dataset::random(&mut rng, 2, 1, 30).unwrap();
    let weights = flatten::unroll_owned(net.weights());

    assert_gradient_close(&net, &data, &Squared, 0., &weights, 1e-4, 1e-6);
}

#[test]
fn bias_weights_are_not_regularized() {
    let mut rng = StdRng::seed_from_u64(3);
    let net = NeuralNet::builder(&[3, 4, 2]).seed(Some(3)).build().unwrap();
    let data = Dataset::random(&mut rng, 3, 2, 10).unwrap();
    let weights = random_weights(&mut rng, &net, WeightInit::Lecun);
    let m = data.len() as f64;

    let plain = CostFn::new(&net, data.x(), data.y(), 0., &Logit);
    let regularized = CostFn::new(&net, data.x(), data.y(), 5., &Logit);
    let (_, plain) = plain.cost_and_grad(&weights).unwrap();
    let (_, regularized) = regularized.cost_and_grad(&weights).unwrap();

    for ((p, r), w) in plain.iter().zip(&regularized).zip(&weights) {
        assert_eq!(p.column(0), r.column(0));

        let expected = &p.slice(s![.., 1..]) + &(&w.slice(s![.., 1..]) * (5. / m));
        for (r, e) in r.slice(s![.., 1..]).iter().zip(&expected) {
            assert!((r - e).abs() < 1e-12);
        }
    }
}

#[test]
fn zero_bias_weights_match_a_bias_free_network() {
    let mut rng = StdRng::seed_from_u64(9);
    let with_bias = NeuralNet::builder(&[2, 3, 2]).seed(Some(9)).build().unwrap();
    let without_bias = NeuralNet::builder(&[2, 3, 2])
        .bias(false)
        .seed(Some(9))
        .build()
        .unwrap();
    let data = Dataset::random(&mut rng, 2, 2, 15).unwrap();

    let weights = random_weights(&mut rng, &without_bias, WeightInit::XavierUniform);
    let biased: Vec<Array2<f64>> = weights
        .iter()
        .map(|w| {
            let mut biased = Array2::zeros((w.nrows(), w.ncols() + 1));
            biased.slice_mut(s![.., 1..]).assign(w);
            biased
        })
        .collect();

    let (cost, grad) = CostFn::new(&without_bias, data.x(), data.y(), 1., &Logit)
        .cost_and_grad(&weights)
        .unwrap();
    let (biased_cost, biased_grad) = CostFn::new(&with_bias, data.x(), data.y(), 1., &Logit)
        .cost_and_grad(&biased)
        .unwrap();

    assert!((cost - biased_cost).abs() < 1e-12);
    for (g, b) in grad.iter().zip(&biased_grad) {
        for (g, b) in g.iter().zip(b.slice(s![.., 1..])) {
            assert!((g - b).abs() < 1e-12);
        }
    }
}
