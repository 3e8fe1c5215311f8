use log::debug;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dataloader::{SimpleDataLoader, TrainingSample};
use crate::util::{rand_interval, Float};

/// Labels 2-D points by whether they fall strictly inside a circle.
/// Points are drawn from the square `[-range, range]^2`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleDataGenerator {
    pub centre_x: Float,
    pub centre_y: Float,
    pub radius: Float,
    pub range: Float,
}

impl Default for CircleDataGenerator {
    fn default() -> Self {
        Self {
            centre_x: 0.75,
            centre_y: 0.6,
            radius: 0.4,
            range: 1.0,
        }
    }
}

impl CircleDataGenerator {
    pub fn new(centre_x: Float, centre_y: Float, radius: Float) -> Self {
        Self {
            centre_x,
            centre_y,
            radius,
            range: 1.0,
        }
    }

    pub fn range(mut self, range: Float) -> Self {
        self.range = range;
        self
    }

    pub fn label(&self, x: Float, y: Float) -> Float {
        let d = ((x - self.centre_x).powi(2) + (y - self.centre_y).powi(2)).sqrt();

        if d < self.radius {
            1.0
        } else {
            0.0
        }
    }

    pub fn sample(&self, x: Float, y: Float) -> TrainingSample {
        TrainingSample::new(vec![x, y], vec![self.label(x, y)])
    }

    /// Draws `count` points uniformly from `[-range, range]^2`, x before y.
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<TrainingSample> {
        let data: Vec<TrainingSample> = (0..count)
            .map(|_| {
                let x = rand_interval(rng, -self.range, self.range);
                let y = rand_interval(rng, -self.range, self.range);
                self.sample(x, y)
            })
            .collect();

        debug!(
            "Generated {} samples, {} inside the circle",
            data.len(),
            data.iter().filter(|s| s.expected[0] > 0.5).count()
        );

        data
    }

    pub fn loader<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> SimpleDataLoader {
        SimpleDataLoader::new(self.generate(count, rng))
    }
}
