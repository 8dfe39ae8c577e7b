pub mod container;
pub mod controller;
pub mod router;

pub use container::{Container, ContainerConfig, ProviderKind};
pub use router::build_router;
