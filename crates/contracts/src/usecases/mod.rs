pub mod common;

pub use common::{UseCaseError, UseCaseResult};
