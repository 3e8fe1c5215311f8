use crate::dataloader::{DataLoader, TrainingSample};

/// In-memory sample set.
#[derive(Clone, Debug, Default)]
pub struct SimpleDataLoader {
    pub data: Vec<TrainingSample>,
}

impl DataLoader for SimpleDataLoader {
    fn samples(&self) -> &[TrainingSample] {
        &self.data
    }
}

impl SimpleDataLoader {
    pub fn new(data: Vec<TrainingSample>) -> Self {
        Self { data }
    }

    pub fn empty() -> Self {
        Self { data: vec![] }
    }

    pub fn push(&mut self, sample: TrainingSample) {
        self.data.push(sample);
    }
}

impl From<Vec<TrainingSample>> for SimpleDataLoader {
    fn from(data: Vec<TrainingSample>) -> Self {
        SimpleDataLoader::new(data)
    }
}
