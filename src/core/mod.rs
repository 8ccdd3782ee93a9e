pub mod backend;
pub mod normalize;
pub mod probe;
pub mod runner;
pub mod transcode;
