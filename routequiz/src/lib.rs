pub use engine::*;
pub use errors::*;
pub use pool::*;
pub use scoring::*;

#[cfg(test)]
mod arbitrary;
mod engine;
mod errors;
mod pool;
mod scoring;
