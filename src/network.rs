use std::fmt;

use log::debug;

use rand::Rng;
use serde::Serialize;

use crate::dataloader::TrainingSample;
use crate::layers::{Layer, Neuron, NeuronId, NeuronType, INIT_RANGE};
use crate::util::{rand_interval, seeded_rng, DataVec, Float};

/// Fully connected feed-forward network with sigmoid units.
///
/// Layers are stored in order and own their neurons; connections between
/// neurons are plain [`NeuronId`] positions into this arena.
#[derive(Clone, Debug)]
pub struct Network {
    layers: Vec<Layer>,
}

/// Incoming weights of one neuron, bias first.
#[derive(Clone, Debug, Serialize)]
pub struct NeuronWeights {
    pub neuron: usize,
    pub weights: Vec<Float>,
}

#[derive(Clone, Debug, Serialize)]
pub struct LayerWeights {
    pub layer: usize,
    pub neurons: Vec<NeuronWeights>,
}

/// Snapshot of every trainable weight, per non-input layer and per neuron.
#[derive(Clone, Debug, Serialize)]
pub struct WeightsDump {
    pub layers: Vec<LayerWeights>,
}

impl Network {
    /// Builds the layers for `layer_sizes` and fully connects each
    /// adjacent pair.
    ///
    /// Weight draw order from `rng`: the bias of every non-input neuron,
    /// layer by layer; then, for each adjacent layer pair, one weight per
    /// (source neuron, destination neuron) with the source index varying
    /// slowest.
    pub fn new<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Self {
        assert!(
            layer_sizes.len() >= 2,
            "Network needs at least 2 layers, got {}",
            layer_sizes.len()
        );

        let last = layer_sizes.len() - 1;
        let mut layers = Vec::with_capacity(layer_sizes.len());

        for (idx, size) in layer_sizes.iter().enumerate() {
            let layer_type = if idx == 0 {
                NeuronType::Input
            } else if idx == last {
                NeuronType::Output
            } else {
                NeuronType::Hidden
            };

            layers.push(Layer::new(layer_type, idx, *size, rng));
        }

        let mut net = Self { layers };

        for idx in 0..last {
            net.connect_layers(idx, rng);
        }

        debug!("[ok] Network {} constructed", net);

        net
    }

    pub fn new_with_seed(layer_sizes: &[usize], seed: u64) -> Self {
        let mut rng = seeded_rng(seed);
        Network::new(layer_sizes, &mut rng)
    }

    fn connect_layers<R: Rng + ?Sized>(&mut self, idx: usize, rng: &mut R) {
        let (head, tail) = self.layers.split_at_mut(idx + 1);
        let layer0 = &mut head[idx];
        let layer1 = &mut tail[0];

        for (i0, neu0) in layer0.neurons_mut().iter_mut().enumerate() {
            for (i1, neu1) in layer1.neurons_mut().iter_mut().enumerate() {
                neu0.add_outgoing(NeuronId::new(idx + 1, i1));
                neu1.add_incoming(NeuronId::new(idx, i0), rand_interval(rng, -INIT_RANGE, INIT_RANGE));
            }
        }
    }

    /// Forward pass. Returns the output layer values in neuron order.
    ///
    /// Only the per-neuron input/output caches are written, weights and
    /// gradients are left untouched.
    pub fn process(&mut self, input: &[Float]) -> DataVec {
        let input_layer = &mut self.layers[0];

        assert_eq!(
            input.len(),
            input_layer.len(),
            "Input length {} doesn't match input layer size {}",
            input.len(),
            input_layer.len()
        );

        for (neu, val) in input_layer.neurons_mut().iter_mut().zip(input) {
            neu.set_input(*val);
        }
        input_layer.calc_outputs(None);

        for idx in 1..self.layers.len() {
            let (head, tail) = self.layers.split_at_mut(idx);
            tail[0].calc_outputs(Some(&head[idx - 1]));
        }

        self.output_layer().outputs()
    }

    /// One epoch of full-batch gradient descent over `samples`.
    ///
    /// Gradients of every sample are summed first, the weights are moved
    /// once at the end by the averaged gradient scaled by `learn_rate`.
    pub fn train(&mut self, samples: &[TrainingSample], learn_rate: Float) {
        assert!(
            (0.0..=1.0).contains(&learn_rate),
            "Learning rate {} is out of [0, 1]",
            learn_rate
        );
        assert!(!samples.is_empty(), "Training requires at least one sample");

        for sample in samples {
            self.process_sample(sample);
        }

        let norm_scale = 1.0 / samples.len() as Float;

        for layer in self.layers.iter_mut().skip(1) {
            for neu in layer.neurons_mut() {
                neu.update_weights(norm_scale, learn_rate);
            }
        }

        debug!(
            "[ok] Network train() over {} samples, learn rate {}",
            samples.len(),
            learn_rate
        );
    }

    fn process_sample(&mut self, sample: &TrainingSample) {
        let output = self.process(&sample.input);

        assert_eq!(
            output.len(),
            sample.expected.len(),
            "Expected output length {} doesn't match output layer size {}",
            sample.expected.len(),
            output.len()
        );

        // Raw residual, not scaled by the sigmoid derivative.
        let output_layer = self.layers.last_mut().expect("Network without layers");
        for ((neu, out), expected) in output_layer
            .neurons_mut()
            .iter_mut()
            .zip(&output)
            .zip(&sample.expected)
        {
            neu.set_error(out - expected);
        }

        for idx in (1..self.layers.len()).rev() {
            let (head, tail) = self.layers.split_at_mut(idx);
            let upstream = &head[idx - 1];
            let (current, rest) = tail.split_at_mut(1);
            let downstream = rest.first();

            for (i, neu) in current[0].neurons_mut().iter_mut().enumerate() {
                neu.update_deltas(NeuronId::new(idx, i), upstream, downstream);
            }
        }
    }

    /// Weight of the connection from `from` into `to`.
    pub fn input_weight(&self, from: NeuronId, to: NeuronId) -> Float {
        self.neuron(to).get_input_weight(from)
    }

    pub fn neuron(&self, id: NeuronId) -> &Neuron {
        match self.layers.get(id.layer) {
            Some(layer) => layer.neuron_by_id(id),
            None => panic!("Dangling neuron reference {}", id),
        }
    }

    pub fn neuron_mut(&mut self, id: NeuronId) -> &mut Neuron {
        let layer = match self.layers.get_mut(id.layer) {
            Some(layer) => layer,
            None => panic!("Dangling neuron reference {}", id),
        };

        match layer.neurons_mut().get_mut(id.index) {
            Some(neu) => neu,
            None => panic!("Dangling neuron reference {}", id),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, idx: usize) -> &Layer {
        &self.layers[idx]
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(|l| l.len()).collect()
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].len()
    }

    pub fn output_size(&self) -> usize {
        self.output_layer().len()
    }

    fn output_layer(&self) -> &Layer {
        self.layers.last().expect("Network without layers")
    }

    pub fn weights(&self) -> WeightsDump {
        let layers = self
            .layers
            .iter()
            .filter(|l| l.layer_type() != NeuronType::Input)
            .map(|l| LayerWeights {
                layer: l.index(),
                neurons: l
                    .neurons()
                    .iter()
                    .enumerate()
                    .map(|(i, n)| NeuronWeights {
                        neuron: i,
                        weights: n.weights(),
                    })
                    .collect(),
            })
            .collect();

        WeightsDump { layers }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sizes: Vec<String> = self.layers.iter().map(|l| l.len().to_string()).collect();
        write!(f, "{}", sizes.join("-"))
    }
}

impl fmt::Display for WeightsDump {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for l in &self.layers {
            for n in &l.neurons {
                write!(f, "layer {} neuron {} :", l.layer, n.neuron)?;
                for w in &n.weights {
                    write!(f, " {:.6}", w)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
