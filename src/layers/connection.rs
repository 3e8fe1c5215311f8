use std::fmt;

use crate::util::Float;

/// Position of a neuron inside the network arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeuronId {
    pub layer: usize,
    pub index: usize,
}

impl NeuronId {
    pub fn new(layer: usize, index: usize) -> Self {
        Self { layer, index }
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.layer, self.index)
    }
}

/// Weighted edge feeding a neuron. A connection without a source is the
/// neuron's bias, its source value is always 1.0
#[derive(Clone, Debug)]
pub struct Connection {
    pub source: Option<NeuronId>,
    pub weight: Float,
    pub weight_grad: Float, // derr/dweight, summed over the current batch
}

impl Connection {
    pub fn new(source: NeuronId, weight: Float) -> Self {
        Self {
            source: Some(source),
            weight,
            weight_grad: 0.0,
        }
    }

    pub fn new_bias(weight: Float) -> Self {
        Self {
            source: None,
            weight,
            weight_grad: 0.0,
        }
    }

    pub fn is_bias(&self) -> bool {
        self.source.is_none()
    }

    /// Value carried along the edge before weighting.
    pub fn source_value<F>(&self, output_of: F) -> Float
    where
        F: Fn(NeuronId) -> Float,
    {
        match self.source {
            Some(id) => output_of(id),
            None => 1.0,
        }
    }

    /// Contribution to the weighted sum of the owning neuron.
    pub fn weighted_value<F>(&self, output_of: F) -> Float
    where
        F: Fn(NeuronId) -> Float,
    {
        match self.source {
            Some(id) => output_of(id) * self.weight,
            None => self.weight,
        }
    }

    pub fn accumulate(&mut self, error: Float, source_value: Float) {
        self.weight_grad += error * source_value;
    }

    /// Applies the averaged gradient and clears the accumulator.
    pub fn apply_grad(&mut self, norm_scale: Float, learn_rate: Float) {
        let gradient = self.weight_grad * norm_scale;
        self.weight -= gradient * learn_rate;
        self.weight_grad = 0.0;
    }
}
