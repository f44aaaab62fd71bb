pub mod client;
pub mod error;
pub mod host;
pub mod http;
pub mod invoker;
pub mod registrar;
pub mod types;

pub use client::MemeClient;
pub use error::{ClientError, Result};
pub use host::{CommandHost, HostError, Reply, Session};
pub use invoker::{failure_message, FailureKind, MemeCommand};
pub use registrar::{load_commands, register_all, LoadError, LoadFailure, Registration};
pub use types::{OptionValues, RenderRequest, RenderedImage};
