//! Queue module - Debounced scheduling and request sequencing

pub mod debounce;
pub mod sequence;

pub use debounce::Debouncer;
pub use sequence::RequestSequencer;
