mod util;
mod random;

pub use util::*;
pub use random::*;
