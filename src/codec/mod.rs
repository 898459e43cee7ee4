// Codec module - conversion between application values and driver values
//
// - encoder: coerce a loosely-typed value to the driver-declared parameter type
// - decoder: mirror operation applied when reading rows, keys, and out values

pub mod decoder;
pub mod encoder;

pub use decoder::Decoder;
pub use encoder::Encoder;
