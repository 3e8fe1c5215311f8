mod connection;
mod layer;
mod neuron;

pub use connection::*;
pub use layer::*;
pub use neuron::*;
