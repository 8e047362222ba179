pub mod reconciler;
pub mod types;

pub use reconciler::{Reconciler, Transition};
