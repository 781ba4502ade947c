use ndarray::{Array2, ArrayView2, s};
use rand::{SeedableRng, rngs::StdRng};

use super::{
    Forward, Network, WeightInit,
    activations::ActFn,
    loss::ErrFn,
};
use crate::{NnErr, Result, error::ensure_dim};

/// A fully connected feed-forward network.
#[derive(Debug, Clone)]
pub struct NeuralNet {
    units: Vec<usize>,
    act_fns: Vec<ActFn>,
    bias: bool,
    weights: Vec<Array2<f64>>,
    init: WeightInit,
    rng: StdRng,
}

impl NeuralNet {
    /// Starts building a network with `units[i]` units on layer `i`.
    ///
    /// The defaults are:
    ///
    /// * An identity input layer and sigmoid activations everywhere else.
    /// * Bias units enabled.
    /// * Small uniform random weights, from an OS-seeded generator.
    pub fn builder(units: &[usize]) -> NeuralNetBuilder {
        NeuralNetBuilder {
            units: units.to_vec(),
            act_fns: None,
            bias: true,
            init: WeightInit::default(),
            seed: None,
        }
    }

    /// The amount of units on every layer, bias units excluded.
    pub fn units(&self) -> &[usize] {
        &self.units
    }

    fn check_weights(&self, weights: &[Array2<f64>]) -> Result<()> {
        let dimensions = self.dimensions();
        ensure_dim("weight matrices", weights.len(), dimensions.len())?;

        for (w, (rows, cols)) in weights.iter().zip(dimensions) {
            ensure_dim("weight matrix rows", w.nrows(), rows)?;
            ensure_dim("weight matrix columns", w.ncols(), cols)?;
        }

        Ok(())
    }

    /// Prepends a row of ones to `a` if the network has bias units.
    fn with_bias(&self, a: Array2<f64>) -> Array2<f64> {
        if !self.bias {
            return a;
        }

        let mut biased = Array2::ones((a.nrows() + 1, a.ncols()));
        biased.slice_mut(s![1.., ..]).assign(&a);
        biased
    }

    /// Sum of the squares of every weight but the bias ones.
    fn regularization(&self, weights: &[Array2<f64>]) -> f64 {
        let bias = self.bias as usize;

        weights
            .iter()
            .map(|w| w.slice(s![.., bias..]).iter().map(|w| w * w).sum::<f64>())
            .sum()
    }
}

impl Network for NeuralNet {
    fn bias(&self) -> bool {
        self.bias
    }

    fn act_fns(&self) -> &[ActFn] {
        &self.act_fns
    }

    fn weights(&self) -> &[Array2<f64>] {
        &self.weights
    }

    fn set_weights(&mut self, weights: Vec<Array2<f64>>) -> Result<()> {
        self.check_weights(&weights)?;
        self.weights = weights;
        Ok(())
    }

    fn reset_weights(&mut self) -> Result<()> {
        let weights = self
            .dimensions()
            .into_iter()
            .map(|dim| self.init.sample(&mut self.rng, dim))
            .collect::<Result<Vec<_>>>()?;

        self.weights = weights;
        Ok(())
    }

    fn dimensions(&self) -> Vec<(usize, usize)> {
        let bias = self.bias as usize;

        self.units
            .windows(2)
            .map(|pair| (pair[1], pair[0] + bias))
            .collect()
    }

    fn calculate_cost<E>(
        &self,
        weights: &[Array2<f64>],
        x: ArrayView2<f64>,
        y: ArrayView2<f64>,
        err_fn: &E,
        learn_rate: f64,
    ) -> Result<Forward>
    where
        E: ErrFn + ?Sized,
    {
        let nlayers = self.units.len();
        ensure_dim("rows of x", x.nrows(), self.units[0])?;
        ensure_dim("rows of y", y.nrows(), self.units[nlayers - 1])?;
        ensure_dim("columns of y", y.ncols(), x.ncols())?;
        self.check_weights(weights)?;

        let m = x.ncols();
        if m == 0 {
            return Err(NnErr::InvalidConfig("no examples to evaluate".into()));
        }

        let mut z = Vec::with_capacity(nlayers);
        let mut a = Vec::with_capacity(nlayers);
        z.push(x.to_owned());
        a.push(self.with_bias(x.to_owned()));

        for (i, w) in weights.iter().enumerate() {
            let zi = w.dot(&a[i]);
            let ai = self.act_fns[i + 1].apply(zi.view());

            // The output layer doesn't feed anything, so it never gets a bias row.
            let ai = if i + 2 < nlayers {
                self.with_bias(ai)
            } else {
                ai
            };

            z.push(zi);
            a.push(ai);
        }

        let m = m as f64;
        let error = err_fn.calc(a[nlayers - 1].view(), y).sum() / m;
        let cost = error + learn_rate / (2. * m) * self.regularization(weights);

        Ok(Forward { z, a, cost })
    }
}

/// Builds `NeuralNet`s.
#[derive(Debug, Clone)]
pub struct NeuralNetBuilder {
    units: Vec<usize>,
    act_fns: Option<Vec<ActFn>>,
    bias: bool,
    init: WeightInit,
    seed: Option<u64>,
}

impl NeuralNetBuilder {
    /// Sets one activation function per layer, the input layer's one included.
    pub fn act_fns(mut self, act_fns: Vec<ActFn>) -> Self {
        self.act_fns = Some(act_fns);
        self
    }

    /// Uses `act_fn` on every layer but the input one.
    pub fn act_fn(mut self, act_fn: ActFn) -> Self {
        let mut act_fns = vec![act_fn; self.units.len()];
        if let Some(input) = act_fns.first_mut() {
            *input = ActFn::identity();
        }

        self.act_fns = Some(act_fns);
        self
    }

    /// Enables or disables bias units.
    pub fn bias(mut self, bias: bool) -> Self {
        self.bias = bias;
        self
    }

    /// Sets how the weights are drawn on every reset.
    pub fn init(mut self, init: WeightInit) -> Self {
        self.init = init;
        self
    }

    /// Seeds the generator used to reset the weights.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the description and builds the network, with freshly reset weights.
    ///
    /// # Errors
    /// An `InvalidConfig` if there are fewer than two layers, an empty layer, a wrong amount of
    /// activation functions or an unusable weight initialization.
    pub fn build(self) -> Result<NeuralNet> {
        let Self {
            units,
            act_fns,
            bias,
            init,
            seed,
        } = self;

        if units.len() < 2 {
            return Err(NnErr::InvalidConfig(format!(
                "a network needs at least an input and an output layer, got {} layer(s)",
                units.len()
            )));
        }

        if let Some(layer) = units.iter().position(|&n| n == 0) {
            return Err(NnErr::InvalidConfig(format!("layer {layer} has no units")));
        }

        let act_fns = match act_fns {
            Some(act_fns) if act_fns.len() != units.len() => {
                return Err(NnErr::InvalidConfig(format!(
                    "got {} activation functions for {} layers",
                    act_fns.len(),
                    units.len()
                )));
            }
            Some(act_fns) => act_fns,
            None => {
                let mut act_fns = vec![ActFn::sigmoid(1.); units.len()];
                act_fns[0] = ActFn::identity();
                act_fns
            }
        };

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut network = NeuralNet {
            units,
            act_fns,
            bias,
            weights: Vec::new(),
            init,
            rng,
        };
        network.reset_weights()?;

        Ok(network)
    }
}
