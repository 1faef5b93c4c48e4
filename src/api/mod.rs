pub mod client;
pub mod extract;
pub mod logging;
pub mod reconcile;
pub mod stream;

#[cfg(test)]
pub mod mock_client;

pub use client::{ApiClient, ByteStream};
pub use reconcile::finalize_stream;
pub use stream::{StreamConsumer, StreamEvent};
