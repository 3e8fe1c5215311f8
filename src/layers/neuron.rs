use crate::activation::{sigmoid, sigmoid_deriv};
use crate::util::Float;

use super::connection::{Connection, NeuronId};
use super::layer::Layer;

/// Half-width of the symmetric interval initial weights are drawn from.
pub const INIT_RANGE: Float = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeuronType {
    Input,
    Hidden,
    Output,
}

/// Single computational unit.
///
/// `incoming` is owned: for a non-input neuron the bias is always at
/// position 0, followed by one connection per neuron of the previous layer.
/// `outgoing` only names the downstream neurons, it owns nothing and is
/// used to look up their errors during back propagation.
#[derive(Clone, Debug)]
pub struct Neuron {
    neuron_type: NeuronType,
    incoming: Vec<Connection>,
    outgoing: Vec<NeuronId>,
    input: Float,
    output: Float,
    error: Float,
}

impl Neuron {
    pub fn new(neuron_type: NeuronType) -> Self {
        Self {
            neuron_type,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            input: 0.0,
            output: 0.0,
            error: 0.0,
        }
    }

    pub fn new_with_bias(neuron_type: NeuronType, bias_weight: Float) -> Self {
        assert!(
            neuron_type != NeuronType::Input,
            "Input neurons have no incoming connections"
        );

        let mut neu = Neuron::new(neuron_type);
        neu.incoming.push(Connection::new_bias(bias_weight));
        neu
    }

    pub fn add_incoming(&mut self, source: NeuronId, weight: Float) {
        assert!(
            self.neuron_type != NeuronType::Input,
            "Input neurons have no incoming connections"
        );
        self.incoming.push(Connection::new(source, weight));
    }

    pub fn add_outgoing(&mut self, target: NeuronId) {
        assert!(
            self.neuron_type != NeuronType::Output,
            "Output neurons have no outgoing neurons"
        );
        self.outgoing.push(target);
    }

    /// Called only for input neurons
    pub fn set_input(&mut self, input: Float) {
        assert!(
            self.neuron_type == NeuronType::Input,
            "Only input neurons take a direct input"
        );
        self.input = input;
    }

    pub fn set_error(&mut self, error: Float) {
        self.error = error;
    }

    /// Forward step. Input neurons pass their input through unchanged,
    /// every other neuron stores its weighted sum as `input` and the
    /// activated value as `output`.
    pub fn calc_output(&mut self, upstream: Option<&Layer>) {
        if self.neuron_type == NeuronType::Input {
            self.output = self.input;
            return;
        }

        let upstream = upstream.expect("Non-input neuron evaluated without an upstream layer");
        let z = self.calc_z(upstream);

        self.input = z;
        self.output = sigmoid(z);
    }

    fn calc_z(&self, upstream: &Layer) -> Float {
        self.incoming
            .iter()
            .map(|c| c.weighted_value(|id| upstream.neuron_by_id(id).output()))
            .sum()
    }

    /// Backward step for one sample: refresh the error of a hidden neuron
    /// from its downstream neurons, then add this sample's contribution to
    /// every incoming gradient. Output neuron errors are assigned by the
    /// network beforehand.
    pub fn update_deltas(&mut self, self_id: NeuronId, upstream: &Layer, downstream: Option<&Layer>) {
        if self.neuron_type == NeuronType::Input {
            return;
        }

        if self.neuron_type == NeuronType::Hidden {
            let downstream = downstream.expect("Hidden neuron without a downstream layer");
            self.error = self.calc_error(self_id, downstream);
        }

        let error = self.error;
        for conn in self.incoming.iter_mut() {
            let src_val = conn.source_value(|id| upstream.neuron_by_id(id).output());
            conn.accumulate(error, src_val);
        }
    }

    fn calc_error(&self, self_id: NeuronId, downstream: &Layer) -> Float {
        let out_err_sum: Float = self
            .outgoing
            .iter()
            .map(|id| {
                let next = downstream.neuron_by_id(*id);
                next.error() * next.get_input_weight(self_id)
            })
            .sum();

        sigmoid_deriv(self.output) * out_err_sum
    }

    /// Weight of the connection on this neuron that originates at `source`.
    ///
    /// Panics if `source` does not feed this neuron, the topology is fixed
    /// after construction so a miss is a wiring bug.
    pub fn get_input_weight(&self, source: NeuronId) -> Float {
        let conn = self
            .incoming
            .iter()
            .find(|c| c.source == Some(source));

        match conn {
            Some(c) => c.weight,
            None => panic!("Neuron {} has no connection to this neuron", source),
        }
    }

    pub fn update_weights(&mut self, norm_scale: Float, learn_rate: Float) {
        if self.neuron_type == NeuronType::Input {
            return;
        }

        for conn in self.incoming.iter_mut() {
            conn.apply_grad(norm_scale, learn_rate);
        }
    }

    pub fn neuron_type(&self) -> NeuronType {
        self.neuron_type
    }

    pub fn incoming(&self) -> &[Connection] {
        &self.incoming
    }

    pub fn incoming_mut(&mut self) -> &mut [Connection] {
        &mut self.incoming
    }

    pub fn outgoing(&self) -> &[NeuronId] {
        &self.outgoing
    }

    /// Incoming weights in connection order, bias first.
    pub fn weights(&self) -> Vec<Float> {
        self.incoming.iter().map(|c| c.weight).collect()
    }

    pub fn input(&self) -> Float {
        self.input
    }

    pub fn output(&self) -> Float {
        self.output
    }

    pub fn error(&self) -> Float {
        self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_layer(values: &[Float]) -> Layer {
        let mut l = Layer::new_input(0, values.len());
        for (neu, v) in l.neurons_mut().iter_mut().zip(values) {
            neu.set_input(*v);
            neu.calc_output(None);
        }
        l
    }

    #[test]
    fn input_neuron_passes_value_through() {
        let mut neu = Neuron::new(NeuronType::Input);
        neu.set_input(3.5);
        neu.calc_output(None);

        assert_eq!(neu.output(), 3.5);
        assert!(neu.incoming().is_empty());
    }

    #[test]
    #[should_panic]
    fn input_neuron_rejects_incoming() {
        let mut neu = Neuron::new(NeuronType::Input);
        neu.add_incoming(NeuronId::new(0, 0), 0.1);
    }

    #[test]
    #[should_panic(expected = "Only input neurons take a direct input")]
    fn set_input_on_hidden_panics() {
        let mut neu = Neuron::new_with_bias(NeuronType::Hidden, 0.0);
        neu.set_input(1.0);
    }

    #[test]
    fn weighted_sum_includes_bias() {
        let upstream = input_layer(&[1.0, -2.0]);

        let mut neu = Neuron::new_with_bias(NeuronType::Output, 0.5);
        neu.add_incoming(NeuronId::new(0, 0), 0.25);
        neu.add_incoming(NeuronId::new(0, 1), 0.125);
        neu.calc_output(Some(&upstream));

        // 0.5 + 1.0 * 0.25 - 2.0 * 0.125
        assert!((neu.input() - 0.5).abs() < 1e-12);
        assert!((neu.output() - sigmoid(0.5)).abs() < 1e-12);
    }

    #[test]
    fn output_gradient_uses_assigned_error() {
        let upstream = input_layer(&[2.0]);

        let mut neu = Neuron::new_with_bias(NeuronType::Output, 0.0);
        neu.add_incoming(NeuronId::new(0, 0), 0.0);
        neu.calc_output(Some(&upstream));
        neu.set_error(0.5);
        neu.update_deltas(NeuronId::new(1, 0), &upstream, None);

        assert_eq!(neu.incoming()[0].weight_grad, 0.5);
        assert_eq!(neu.incoming()[1].weight_grad, 1.0);
        assert_eq!(neu.error(), 0.5);
    }

    #[test]
    fn input_weight_lookup() {
        let mut neu = Neuron::new_with_bias(NeuronType::Hidden, 0.9);
        neu.add_incoming(NeuronId::new(0, 0), 0.1);
        neu.add_incoming(NeuronId::new(0, 1), 0.2);

        assert_eq!(neu.get_input_weight(NeuronId::new(0, 1)), 0.2);
        assert_eq!(neu.get_input_weight(NeuronId::new(0, 0)), 0.1);
        assert_eq!(neu.weights(), vec![0.9, 0.1, 0.2]);
    }

    #[test]
    #[should_panic(expected = "has no connection")]
    fn input_weight_lookup_miss_panics() {
        let neu = Neuron::new_with_bias(NeuronType::Hidden, 0.9);
        neu.get_input_weight(NeuronId::new(0, 3));
    }

    #[test]
    fn update_weights_skips_input() {
        let mut neu = Neuron::new(NeuronType::Input);
        neu.update_weights(1.0, 1.0);
        assert!(neu.weights().is_empty());
    }
}
