//! Canonical types of the crate

pub use crate::config::{IoConfig, ReactorConfig, ResolverBackend, ResolverSettings};
pub use crate::context::{ContextHandle, IoContext, WorkGuard};
pub use crate::dns::{
    GaiResolver, HickoryResolver, Resolve, ResolveFlags, ResolverEntry, ResolverResults,
    TcpResolver,
};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::executor::{Executor, bind_executor};
pub use crate::net::{Endpoint, MAX_LISTEN_CONNECTIONS, ReuseAddress, Tcp};
pub use crate::strand::Strand;
pub use crate::telemetry::{ContextStats, ContextStatsSnapshot};
pub use crate::timer::SteadyTimer;
