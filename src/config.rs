//! The JSON description of a training run.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    NnErr, Result,
    arch::{NeuralNet, WeightInit, activations::ActFnConfig, loss::ErrFnConfig},
    optimization::{GradientDescent, GradientDescentConfig},
};

/// The architecture of the network being trained.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    pub input_units: usize,
    pub hidden_units: Vec<usize>,
    pub output_units: usize,
    /// One per layer, the input layer's one included. Identity on the input and sigmoid
    /// everywhere else when missing.
    pub act_fns: Option<Vec<ActFnConfig>>,
    pub bias: bool,
    pub init: WeightInit,
    /// Seeds the weight resets, for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_units: 10,
            hidden_units: vec![8],
            output_units: 6,
            act_fns: None,
            bias: true,
            init: WeightInit::default(),
            seed: None,
        }
    }
}

impl NetworkConfig {
    /// The amount of units on every layer, input and output included.
    pub fn units(&self) -> Vec<usize> {
        let mut units = Vec::with_capacity(self.hidden_units.len() + 2);
        units.push(self.input_units);
        units.extend(&self.hidden_units);
        units.push(self.output_units);
        units
    }

    pub fn build(&self) -> Result<NeuralNet> {
        let mut builder = NeuralNet::builder(&self.units())
            .bias(self.bias)
            .init(self.init)
            .seed(self.seed);

        if let Some(act_fns) = &self.act_fns {
            builder = builder.act_fns(act_fns.iter().copied().map(Into::into).collect());
        }

        builder.build()
    }
}

/// Everything a training run needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    pub network: NetworkConfig,
    /// The regularization rate.
    pub learn_rate: f64,
    /// The amount of restarts.
    pub iterations: usize,
    pub err_fn: ErrFnConfig,
    pub minimizer: GradientDescentConfig,
    /// The amount of synthetic examples to train on.
    pub examples: usize,
    /// Seeds the synthetic dataset.
    pub seed: Option<u64>,
    /// Compares the analytic gradient against a numerical one before training.
    pub gradient_check: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            learn_rate: 1.,
            iterations: 10,
            err_fn: ErrFnConfig::default(),
            minimizer: GradientDescentConfig::default(),
            examples: 500,
            seed: None,
            gradient_check: false,
        }
    }
}

impl TrainingConfig {
    /// Reads and validates a config from a JSON file.
    ///
    /// # Errors
    /// An `Io` error if the file can't be read, a `Json` one if it can't be parsed, or an
    /// `InvalidConfig` if the values don't make sense.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses and validates a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let units = self.network.units();
        if let Some(layer) = units.iter().position(|&n| n == 0) {
            return invalid(format!("layer {layer} has no units"));
        }

        let nact_fns = self.network.act_fns.as_ref().map_or(units.len(), Vec::len);
        if nact_fns != units.len() {
            return invalid(format!(
                "got {nact_fns} activation functions for {} layers",
                units.len()
            ));
        }

        if !(self.learn_rate.is_finite() && self.learn_rate >= 0.) {
            return invalid(format!(
                "learn_rate must be a non-negative number, got {}",
                self.learn_rate
            ));
        }

        if self.iterations == 0 {
            return invalid("iterations must be at least 1".into());
        }

        if self.examples == 0 {
            return invalid("examples must be at least 1".into());
        }

        GradientDescent::try_from(self.minimizer)?;
        Ok(())
    }

    pub fn build_minimizer(&self) -> Result<GradientDescent> {
        GradientDescent::try_from(self.minimizer)
    }
}

fn invalid(msg: String) -> Result<()> {
    Err(NnErr::InvalidConfig(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::{Network, activations::ActFn};

    #[test]
    fn empty_object_uses_defaults() {
        let config = TrainingConfig::from_json("{}").unwrap();
        assert_eq!(config, TrainingConfig::default());
        assert_eq!(config.network.units(), [10, 8, 6]);
    }

    #[test]
    fn full_config() {
        let json = r#"{
            "network": {
                "input_units": 3,
                "hidden_units": [4, 2],
                "output_units": 1,
                "act_fns": [
                    { "kind": "identity" },
                    { "kind": "tanh" },
                    { "kind": "sigmoid", "amp": 2.0 },
                    { "kind": "sigmoid" }
                ],
                "bias": false,
                "init": { "kind": "normal", "mean": 0.0, "std_dev": 0.1 },
                "seed": 7
            },
            "learn_rate": 0.1,
            "iterations": 3,
            "err_fn": "squared",
            "minimizer": { "learning_rate": 0.2, "momentum": 0.0 },
            "examples": 20,
            "seed": 1,
            "gradient_check": true
        }"#;
        let config = TrainingConfig::from_json(json).unwrap();

        assert_eq!(config.err_fn, ErrFnConfig::Squared);
        assert_eq!(config.minimizer.max_iters, GradientDescentConfig::default().max_iters);
        assert!(config.gradient_check);

        let net = config.network.build().unwrap();
        assert_eq!(net.units(), [3, 4, 2, 1]);
        assert!(!net.bias());
        assert_eq!(net.act_fns()[1], ActFn::tanh());
        assert_eq!(net.act_fns()[2], ActFn::sigmoid(2.));
        assert_eq!(net.dimensions(), [(4, 3), (2, 4), (1, 2)]);
    }

    #[test]
    fn invalid_values_fail() {
        for json in [
            r#"{ "network": { "output_units": 0 } }"#,
            r#"{ "network": { "act_fns": [{ "kind": "identity" }] } }"#,
            r#"{ "learn_rate": -1.0 }"#,
            r#"{ "iterations": 0 }"#,
            r#"{ "examples": 0 }"#,
            r#"{ "minimizer": { "momentum": 1.5 } }"#,
        ] {
            assert!(
                matches!(TrainingConfig::from_json(json), Err(NnErr::InvalidConfig(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn malformed_json_fails() {
        assert!(matches!(
            TrainingConfig::from_json(r#"{ "learn_rte": 1.0 }"#),
            Err(NnErr::Json(_))
        ));
        assert!(matches!(
            TrainingConfig::from_json("not json"),
            Err(NnErr::Json(_))
        ));
    }

    #[test]
    fn missing_file_fails() {
        assert!(matches!(
            TrainingConfig::load("does/not/exist.json"),
            Err(NnErr::Io(_))
        ));
    }
}
