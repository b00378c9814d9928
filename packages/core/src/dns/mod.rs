//! DNS resolution

pub(crate) mod gai;
pub(crate) mod hickory;
pub mod resolver;
pub mod results;
pub mod service;
pub mod traits;

pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use resolver::{ResolveFlags, TcpResolver};
pub use results::{ResolverEntry, ResolverResults};
pub use traits::Resolve;
