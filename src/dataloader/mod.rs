pub mod databatch;
pub mod dataloader;

pub mod simple;
pub mod circle;

pub use databatch::*;
pub use dataloader::*;
pub use simple::*;
pub use circle::*;
