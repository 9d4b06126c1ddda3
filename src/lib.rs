pub mod config;
pub mod error;
pub mod events;
pub mod math;
pub mod operations;
pub mod service;
pub mod topology;

pub use config::{ConfigUpdate, WallConfig};
pub use error::{FloorplanError, Result};
pub use events::{EventKind, ListenerId, TopologyEvent};
pub use service::WallService;
