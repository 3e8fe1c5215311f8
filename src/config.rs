use std::error::Error;
use std::fs::File;
use std::io::Write;

use log::{error, info};

use serde::{Deserialize, Serialize};

use crate::dataloader::{CircleDataGenerator, SimpleDataLoader, TrainingSample};
use crate::err::CustomError;
use crate::network::Network;
use crate::util::{seeded_rng, Float};

/// Everything a circle-classification training run needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub layers: Vec<usize>,
    pub seed: u64,
    pub train_samples: usize,
    pub eval_samples: usize,
    pub epochs: usize,
    pub learn_rate_start: Float,
    pub learn_rate_end: Float,
    pub test_iter: usize,
    pub circle: CircleDataGenerator,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            layers: vec![2, 3, 1],
            seed: 1234,
            train_samples: 500,
            eval_samples: 200,
            epochs: 1000,
            learn_rate_start: 0.2,
            learn_rate_end: 0.01,
            test_iter: 100,
            circle: CircleDataGenerator::default(),
        }
    }
}

impl TrainConfig {
    pub fn from_file(filepath: &str) -> Result<Self, Box<dyn Error>> {
        let cfg_file = File::open(filepath)?;
        let cfg: TrainConfig = serde_yaml::from_reader(cfg_file)?;
        cfg.validate()?;

        info!("Loaded train configuration from {}", filepath);

        Ok(cfg)
    }

    pub fn to_file(&self, filepath: &str) -> Result<(), Box<dyn Error>> {
        let yaml_str = serde_yaml::to_string(&self)?;

        let mut output = File::create(filepath)?;
        output.write_all(yaml_str.as_bytes())?;

        Ok(())
    }

    /// Builds the network, the training set and the evaluation set of a run.
    ///
    /// All three come from one generator seeded with `seed`, in that order:
    /// weights, training samples, evaluation samples. The order is part of
    /// the contract, the same seed always reproduces the same data.
    pub fn prepare(&self) -> (Network, SimpleDataLoader, Vec<TrainingSample>) {
        let mut rng = seeded_rng(self.seed);

        let network = Network::new(&self.layers, &mut rng);
        let train_dl = self.circle.loader(self.train_samples, &mut rng);
        let eval_data = self.circle.generate(self.eval_samples, &mut rng);

        (network, train_dl, eval_data)
    }

    /// Rejects settings the network would abort on.
    pub fn validate(&self) -> Result<(), CustomError> {
        if self.layers.len() < 2 {
            error!("At least 2 layers are required, got {:?}", self.layers);
            return Err(CustomError::WrongArg);
        }

        if self.layers.iter().any(|s| *s == 0) {
            error!("Layer sizes must be positive, got {:?}", self.layers);
            return Err(CustomError::WrongArg);
        }

        if self.layers[0] != 2 || self.layers[self.layers.len() - 1] != 1 {
            error!(
                "Circle samples need 2 inputs and 1 output, got {:?}",
                self.layers
            );
            return Err(CustomError::WrongArg);
        }

        let range = 0.0..=1.0;
        if !range.contains(&self.learn_rate_start) || !range.contains(&self.learn_rate_end) {
            error!(
                "Learning rates must be within [0, 1], got {} -> {}",
                self.learn_rate_start, self.learn_rate_end
            );
            return Err(CustomError::WrongArg);
        }

        if self.train_samples == 0 {
            error!("At least one training sample is required");
            return Err(CustomError::WrongArg);
        }

        if self.circle.radius.is_nan() || self.circle.radius <= 0.0 {
            error!("Circle radius must be positive, got {}", self.circle.radius);
            return Err(CustomError::InvalidFormat);
        }

        if self.circle.range.is_nan() || self.circle.range <= 0.0 {
            error!("Sample range must be positive, got {}", self.circle.range);
            return Err(CustomError::InvalidFormat);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(TrainConfig::default().validate(), Ok(()));
    }

    #[test]
    fn prepare_follows_the_draw_order() {
        let mut cfg = TrainConfig::default();
        cfg.train_samples = 20;
        cfg.eval_samples = 5;

        let (net, train_dl, eval_data) = cfg.prepare();

        let mut rng = seeded_rng(cfg.seed);
        let expected_net = Network::new(&cfg.layers, &mut rng);
        let expected_train = cfg.circle.generate(20, &mut rng);
        let expected_eval = cfg.circle.generate(5, &mut rng);

        assert_eq!(net.layer_sizes(), vec![2, 3, 1]);
        assert_eq!(
            serde_json::to_string(&net.weights()).unwrap(),
            serde_json::to_string(&expected_net.weights()).unwrap()
        );
        assert_eq!(train_dl.data, expected_train);
        assert_eq!(eval_data, expected_eval);
    }

    #[test]
    fn prepare_is_reproducible() {
        let cfg = TrainConfig::default();

        let (_, train_a, eval_a) = cfg.prepare();
        let (_, train_b, eval_b) = cfg.prepare();

        assert_eq!(train_a.data, train_b.data);
        assert_eq!(eval_a, eval_b);
    }

    #[test]
    fn rejects_bad_topologies() {
        let mut cfg = TrainConfig::default();

        cfg.layers = vec![2];
        assert_eq!(cfg.validate(), Err(CustomError::WrongArg));

        cfg.layers = vec![2, 0, 1];
        assert_eq!(cfg.validate(), Err(CustomError::WrongArg));

        cfg.layers = vec![3, 4, 1];
        assert_eq!(cfg.validate(), Err(CustomError::WrongArg));
    }

    #[test]
    fn rejects_bad_learn_rates() {
        let mut cfg = TrainConfig::default();
        cfg.learn_rate_end = -0.01;
        assert_eq!(cfg.validate(), Err(CustomError::WrongArg));

        cfg.learn_rate_end = 0.01;
        cfg.learn_rate_start = 1.01;
        assert_eq!(cfg.validate(), Err(CustomError::WrongArg));
    }

    #[test]
    fn rejects_bad_circle() {
        let mut cfg = TrainConfig::default();
        cfg.circle.range = 0.0;
        assert_eq!(cfg.validate(), Err(CustomError::InvalidFormat));

        cfg.circle.range = 1.0;
        cfg.circle.radius = -0.4;
        assert_eq!(cfg.validate(), Err(CustomError::InvalidFormat));
    }

    #[test]
    fn yaml_round_trip_keeps_values() {
        let mut cfg = TrainConfig::default();
        cfg.layers = vec![2, 5, 4, 1];
        cfg.seed = 99;

        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let back: TrainConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: TrainConfig = serde_yaml::from_str("epochs: 10\nseed: 7\n").unwrap();

        assert_eq!(cfg.epochs, 10);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.layers, vec![2, 3, 1]);
        assert_eq!(cfg.circle, CircleDataGenerator::default());
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join("circle_neu_cfg_test.yaml");
        let path = path.to_str().unwrap();

        let cfg = TrainConfig::default();
        cfg.to_file(path).unwrap();

        assert_eq!(TrainConfig::from_file(path).unwrap(), cfg);
        std::fs::remove_file(path).unwrap();
    }
}
