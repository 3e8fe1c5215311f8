use crate::dataloader::databatch::TrainingSample;

pub trait DataLoader {
    /// Every sample, in a stable order. A training epoch consumes all of them.
    fn samples(&self) -> &[TrainingSample];

    fn len(&self) -> usize {
        self.samples().len()
    }

    fn is_empty(&self) -> bool {
        self.samples().is_empty()
    }
}
