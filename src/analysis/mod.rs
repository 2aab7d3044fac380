pub mod aggregate;
pub mod decoder;
pub mod resampler;
pub mod sink;
