//! Standalone utilities that sit next to the tries.

pub mod id_gen;

pub use id_gen::{Clock, IdGenError, IdGenResult, IdGenerator, SharedIdGenerator, SystemClock};
