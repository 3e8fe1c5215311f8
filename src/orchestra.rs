use std::error::Error;
use std::fmt;
use std::time::Instant;

use log::{debug, error, info};

use crate::dataloader::{DataLoader, TrainingSample};
use crate::err::CustomError;
use crate::network::Network;
use crate::util::{DataVec, Float};

pub enum CallbackReturnAction {
    None,
    Stop,
}

/// Outcome of running a network over a labeled sample set.
pub struct EvalReport {
    pub mse: Float,
    pub accuracy: Float,
    pub predictions: Vec<(TrainingSample, DataVec)>,
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (sample, out) in &self.predictions {
            write!(f, "{} -> ", sample)?;
            for v in out {
                write!(f, "{} ", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Mean over samples of the mean squared output error.
pub fn mean_squared_error(net: &mut Network, samples: &[TrainingSample]) -> Float {
    if samples.is_empty() {
        return 0.0;
    }

    let sum: Float = samples
        .iter()
        .map(|s| {
            let out = net.process(&s.input);
            sample_sq_err(&out, &s.expected)
        })
        .sum();

    sum / samples.len() as Float
}

/// Share of samples whose every output lands on the same side of 0.5 as
/// its expected value.
pub fn accuracy(net: &mut Network, samples: &[TrainingSample]) -> Float {
    if samples.is_empty() {
        return 0.0;
    }

    let hits = samples
        .iter()
        .filter(|s| {
            let out = net.process(&s.input);
            is_hit(&out, &s.expected)
        })
        .count();

    hits as Float / samples.len() as Float
}

/// Squared error of one sample, averaged over its outputs.
fn sample_sq_err(out: &[Float], expected: &[Float]) -> Float {
    let sq: Float = out.iter().zip(expected).map(|(o, e)| (o - e).powi(2)).sum();
    sq / out.len() as Float
}

fn is_hit(out: &[Float], expected: &[Float]) -> bool {
    out.iter().zip(expected).all(|(o, e)| (*o >= 0.5) == (*e >= 0.5))
}

/// Neural-Network learning orchestrator
pub struct Orchestra {
    network: Network,
    train_dl: Option<Box<dyn DataLoader>>,
    test_iter: usize,
    learn_rate_start: Float,
    learn_rate_end: Float,
    cur_iter_err: Float,
    pub name: String,
    // callback fn args : (epoch number, current training mse)
    callbacks: Vec<Box<dyn FnMut(usize, Float) -> CallbackReturnAction>>,
}

impl Orchestra {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            train_dl: None,
            test_iter: 0,
            learn_rate_start: 0.2,
            learn_rate_end: 0.01,
            cur_iter_err: 0.0,
            name: "network".to_owned(),
            callbacks: Vec::new(),
        }
    }

    pub fn train_dataloader(mut self, train_dl: Box<dyn DataLoader>) -> Self {
        self.train_dl = Some(train_dl);
        self
    }

    pub fn set_train_dataset(&mut self, data: Box<dyn DataLoader>) {
        self.train_dl = Some(data)
    }

    /// Linear schedule from `start` at the first epoch towards `end`.
    pub fn learn_rate(mut self, start: Float, end: Float) -> Self {
        self.set_learn_rate(start, end);
        self
    }

    pub fn set_learn_rate(&mut self, start: Float, end: Float) {
        self.learn_rate_start = start;
        self.learn_rate_end = end;
    }

    pub fn test_iter(mut self, test_iter: usize) -> Self {
        self.test_iter = test_iter;
        self
    }

    pub fn set_test_iter(&mut self, test_iter: usize) {
        self.test_iter = test_iter;
    }

    pub fn add_callback(&mut self, c: Box<dyn FnMut(usize, Float) -> CallbackReturnAction>) {
        self.callbacks.push(c);
    }

    pub fn learn_rate_at(&self, epoch: usize, epochs: usize) -> Float {
        if epochs == 0 {
            return self.learn_rate_start;
        }

        self.learn_rate_start
            + (self.learn_rate_end - self.learn_rate_start) * epoch as Float / epochs as Float
    }

    /// Latest training mse measured, 0.0 until the first measurement.
    pub fn cur_iter_err(&self) -> Float {
        self.cur_iter_err
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    fn check_learn_rate(&self) -> Result<(), Box<dyn Error>> {
        let range = 0.0..=1.0;

        if !range.contains(&self.learn_rate_start) || !range.contains(&self.learn_rate_end) {
            error!(
                "Learning rate schedule {} -> {} leaves [0, 1]",
                self.learn_rate_start, self.learn_rate_end
            );
            return Err(Box::new(CustomError::WrongArg));
        }

        Ok(())
    }

    /// Runs `epochs` full-batch epochs over the training dataset.
    /// Returns the number of epochs actually performed.
    pub fn train_for_n_times(&mut self, epochs: usize) -> Result<usize, Box<dyn Error>> {
        self.check_learn_rate()?;

        let train_dl = match self.train_dl.as_ref() {
            Some(dl) => dl,
            None => {
                error!("Train dataset isn't set !!!");
                return Err(Box::new(CustomError::Other));
            }
        };

        if train_dl.is_empty() {
            error!("Train dataset is empty !!!");
            return Err(Box::new(CustomError::WrongArg));
        }

        let samples = train_dl.samples();
        let now_time = Instant::now();

        info!(
            "Training {} [{}] for {} epochs over {} samples",
            self.name,
            self.network,
            epochs,
            samples.len()
        );

        for epoch in 0..epochs {
            let lr = self.learn_rate_at(epoch, epochs);
            self.network.train(samples, lr);

            let is_test_iter = self.test_iter != 0 && (epoch + 1) % self.test_iter == 0;

            if !is_test_iter && self.callbacks.is_empty() {
                continue;
            }

            self.cur_iter_err = mean_squared_error(&mut self.network, samples);

            if is_test_iter {
                info!(
                    "Epoch {} : learn rate {:.5}, mse {:.6}",
                    epoch + 1,
                    lr,
                    self.cur_iter_err
                );
            }

            let mut stop = false;
            for c in self.callbacks.iter_mut() {
                if let CallbackReturnAction::Stop = c(epoch + 1, self.cur_iter_err) {
                    stop = true;
                }
            }

            if stop {
                info!("Training stopped by callback at epoch {}", epoch + 1);
                return Ok(epoch + 1);
            }
        }

        debug!("Elapsed for training : {} ms", now_time.elapsed().as_millis());

        Ok(epochs)
    }

    pub fn eval_one(&mut self, input: &[Float]) -> DataVec {
        self.network.process(input)
    }

    pub fn eval(&mut self, samples: &[TrainingSample]) -> EvalReport {
        let mut predictions = Vec::with_capacity(samples.len());
        let mut sq_sum = 0.0;
        let mut hits = 0;

        for s in samples {
            let out = self.network.process(&s.input);

            sq_sum += sample_sq_err(&out, &s.expected);

            if is_hit(&out, &s.expected) {
                hits += 1;
            }

            predictions.push((s.clone(), out));
        }

        let n = samples.len().max(1) as Float;

        EvalReport {
            mse: sq_sum / n,
            accuracy: hits as Float / n,
            predictions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataloader::SimpleDataLoader;

    use std::cell::RefCell;
    use std::rc::Rc;

    fn xnor() -> Vec<TrainingSample> {
        vec![
            TrainingSample::new(vec![1.0, 1.0], vec![1.0]),
            TrainingSample::new(vec![0.0, 0.0], vec![1.0]),
            TrainingSample::new(vec![1.0, 0.0], vec![0.0]),
            TrainingSample::new(vec![0.0, 1.0], vec![0.0]),
        ]
    }

    #[test]
    fn learn_rate_decays_linearly() {
        let orc = Orchestra::new(Network::new_with_seed(&[2, 1], 0)).learn_rate(0.2, 0.01);

        assert_eq!(orc.learn_rate_at(0, 1000), 0.2);
        assert!((orc.learn_rate_at(500, 1000) - 0.105).abs() < 1e-12);
        assert!((orc.learn_rate_at(999, 1000) - (0.2 - 0.19 * 0.999)).abs() < 1e-12);
    }

    #[test]
    fn train_without_dataset_fails() {
        let mut orc = Orchestra::new(Network::new_with_seed(&[2, 1], 0));
        assert!(orc.train_for_n_times(10).is_err());
    }

    #[test]
    fn bad_learn_rate_is_rejected() {
        let mut orc = Orchestra::new(Network::new_with_seed(&[2, 1], 0))
            .train_dataloader(Box::new(SimpleDataLoader::new(xnor())))
            .learn_rate(1.2, 0.1);

        let err = orc.train_for_n_times(1).unwrap_err();
        assert_eq!(err.to_string(), "Wrong arguments");
    }

    #[test]
    fn callback_sees_every_epoch_and_can_stop() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_cb = seen.clone();

        let mut orc = Orchestra::new(Network::new_with_seed(&[2, 3, 1], 3))
            .train_dataloader(Box::new(SimpleDataLoader::new(xnor())));

        orc.add_callback(Box::new(move |epoch: usize, mse: Float| {
            seen_cb.borrow_mut().push((epoch, mse));
            if epoch == 5 {
                CallbackReturnAction::Stop
            } else {
                CallbackReturnAction::None
            }
        }));

        let done = orc.train_for_n_times(100).unwrap();

        assert_eq!(done, 5);
        let seen = seen.borrow();
        assert_eq!(seen.iter().map(|(e, _)| *e).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(seen[4].1, orc.cur_iter_err());
    }

    #[test]
    fn eval_reports_predictions() {
        let mut orc = Orchestra::new(Network::new_with_seed(&[2, 3, 1], 3));
        let data = xnor();
        let report = orc.eval(&data);

        assert_eq!(report.predictions.len(), 4);
        assert!(report.accuracy >= 0.0 && report.accuracy <= 1.0);
        assert!((report.mse - mean_squared_error(orc.network_mut(), &data)).abs() < 1e-12);
        assert!((report.accuracy - accuracy(orc.network_mut(), &data)).abs() < 1e-12);

        let text = format!("{}", report);
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("1\t1\t: 1\t -> "));
    }

    #[test]
    fn sample_error_is_averaged_over_outputs() {
        assert_eq!(sample_sq_err(&[0.5], &[1.0]), 0.25);
        assert_eq!(sample_sq_err(&[1.0, 0.5], &[0.0, 0.5]), 0.5);
        assert_eq!(sample_sq_err(&[0.2, 0.8], &[0.2, 0.8]), 0.0);
    }

    #[test]
    fn hit_thresholds_at_half() {
        assert!(is_hit(&[0.7], &[1.0]));
        assert!(is_hit(&[0.2], &[0.0]));
        assert!(!is_hit(&[0.49], &[1.0]));
        assert!(!is_hit(&[0.9, 0.1], &[1.0, 1.0]));
    }
}
