//! Service layer
//!
//! The three configuration stages run against the target API once it is
//! ready: tag creation and proxy registration (both fatal on failure), then
//! indexer provisioning (tolerant per call).

mod provisioner;
mod proxy;
mod tag;

pub use provisioner::IndexerProvisioner;
pub use proxy::register_proxy;
pub use tag::create_tag;
