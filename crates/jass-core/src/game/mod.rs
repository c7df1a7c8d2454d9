pub mod observation;
pub mod sampler;
pub mod state;
