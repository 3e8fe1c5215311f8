use std::fmt;

use rand::Rng;

use crate::util::{rand_interval, DataVec};

use super::connection::NeuronId;
use super::neuron::{Neuron, NeuronType, INIT_RANGE};

/// Ordered, non-empty group of neurons sharing one role.
#[derive(Clone, Debug)]
pub struct Layer {
    layer_type: NeuronType,
    index: usize,
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Creates `size` neurons of `layer_type`. Every non-input neuron gets its
    /// bias weight drawn from `rng` here, in neuron order.
    pub fn new<R: Rng + ?Sized>(layer_type: NeuronType, index: usize, size: usize, rng: &mut R) -> Self {
        if layer_type == NeuronType::Input {
            return Layer::new_input(index, size);
        }

        assert!(size > 0, "Layer {} must have at least one neuron", index);

        let neurons = (0..size)
            .map(|_| Neuron::new_with_bias(layer_type, rand_interval(rng, -INIT_RANGE, INIT_RANGE)))
            .collect();

        Self {
            layer_type,
            index,
            neurons,
        }
    }

    pub fn new_input(index: usize, size: usize) -> Self {
        assert!(size > 0, "Layer {} must have at least one neuron", index);

        Self {
            layer_type: NeuronType::Input,
            index,
            neurons: (0..size).map(|_| Neuron::new(NeuronType::Input)).collect(),
        }
    }

    /// Resolves a neuron reference that must point into this layer.
    pub fn neuron_by_id(&self, id: NeuronId) -> &Neuron {
        assert_eq!(
            id.layer, self.index,
            "Neuron {} does not belong to layer {}",
            id, self.index
        );

        match self.neurons.get(id.index) {
            Some(neu) => neu,
            None => panic!("Dangling neuron reference {}", id),
        }
    }

    pub fn layer_type(&self) -> NeuronType {
        self.layer_type
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    pub fn outputs(&self) -> DataVec {
        self.neurons.iter().map(|n| n.output()).collect()
    }

    pub fn calc_outputs(&mut self, upstream: Option<&Layer>) {
        for neu in self.neurons.iter_mut() {
            neu.calc_output(upstream);
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}[{}]", self.layer_type, self.neurons.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::seeded_rng;

    #[test]
    fn hidden_layer_neurons_own_a_bias() {
        let mut rng = seeded_rng(1);
        let l = Layer::new(NeuronType::Hidden, 1, 4, &mut rng);

        assert_eq!(l.len(), 4);
        for neu in l.neurons() {
            assert_eq!(neu.incoming().len(), 1);
            assert!(neu.incoming()[0].is_bias());
            assert!(neu.incoming()[0].weight.abs() <= INIT_RANGE);
        }
    }

    #[test]
    fn input_layer_has_no_connections() {
        let mut rng = seeded_rng(1);
        let l = Layer::new(NeuronType::Input, 0, 3, &mut rng);

        assert_eq!(l.layer_type(), NeuronType::Input);
        assert!(l.neurons().iter().all(|n| n.incoming().is_empty()));
        assert_eq!(format!("{}", l), "Input[3]");
    }

    #[test]
    #[should_panic(expected = "at least one neuron")]
    fn zero_sized_layer_panics() {
        Layer::new_input(0, 0);
    }

    #[test]
    #[should_panic(expected = "Dangling")]
    fn dangling_reference_panics() {
        let l = Layer::new_input(0, 2);
        l.neuron_by_id(NeuronId::new(0, 2));
    }

    #[test]
    #[should_panic(expected = "does not belong")]
    fn foreign_reference_panics() {
        let l = Layer::new_input(0, 2);
        l.neuron_by_id(NeuronId::new(1, 0));
    }
}
