//! Content domain: RON tuning files under assets/data/.

mod data;
mod loader;
#[cfg(test)]
mod tests;

pub use loader::{ContentLoadError, load_movement_tuning};
