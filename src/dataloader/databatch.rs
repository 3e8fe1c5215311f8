use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::{DataVec, Float};

/// Labeled (input, expected output) pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub input: DataVec,
    pub expected: DataVec,
}

impl TrainingSample {
    pub fn new(input: Vec<Float>, expected: Vec<Float>) -> Self {
        Self { input, expected }
    }
}

impl fmt::Display for TrainingSample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in &self.input {
            write!(f, "{}\t", i)?;
        }
        write!(f, ": ")?;
        for e in &self.expected {
            write!(f, "{}\t", e)?;
        }
        Ok(())
    }
}
