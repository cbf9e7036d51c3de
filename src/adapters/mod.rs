// Adapters layer: concrete collaborator stores behind the domain ports.

pub mod memory;

pub use memory::{Dataset, InMemoryStore};
