#![allow(dead_code)]

pub use taskdag_test_utils::{builders, init_tracing};
