pub type Float = f64;
pub type DataVec = Vec<Float>;
