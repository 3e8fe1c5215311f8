/// Folder
pub mod layers;
pub mod util;
pub mod dataloader;

/// Files
pub mod activation;
pub mod network;
pub mod orchestra;
pub mod config;
pub mod err;

pub mod prelude {
    pub use crate::config::TrainConfig;
    pub use crate::dataloader::{CircleDataGenerator, DataLoader, SimpleDataLoader, TrainingSample};
    pub use crate::network::Network;
    pub use crate::orchestra::{CallbackReturnAction, Orchestra};
    pub use crate::util::{seeded_rng, DataVec, Float};
}
