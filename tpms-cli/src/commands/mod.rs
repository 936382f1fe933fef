pub mod check;
pub mod decode;
pub mod synth;
