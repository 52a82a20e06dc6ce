pub mod noise_field;

pub use noise_field::NoiseField;
