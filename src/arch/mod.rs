pub mod activations;
mod init;
pub mod loss;
mod network;
mod neural_net;

pub use init::WeightInit;
pub use network::{Forward, Network};
pub use neural_net::{NeuralNet, NeuralNetBuilder};
