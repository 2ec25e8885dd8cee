pub mod chunk;
pub mod config;
pub mod error;
pub mod heightmap;
pub mod mesh;
pub mod noise_field;
pub mod overview;
pub mod streaming;
pub mod surface;
pub mod world;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;
