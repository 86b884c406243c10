//! Remote product source adapters.

pub mod mock;
pub mod odata;

pub use mock::MockProductSource;
pub use odata::ODataProductSource;

use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{RemoteConfig, RemoteKind};
use crate::domain::ports::ProductSource;

/// Build the product source selected by configuration.
pub fn build_product_source(config: &RemoteConfig) -> DomainResult<Arc<dyn ProductSource>> {
    match config.kind {
        RemoteKind::Mock => Ok(Arc::new(MockProductSource::new())),
        RemoteKind::Odata => {
            let base_url = config.base_url.as_deref().ok_or_else(|| {
                DomainError::ValidationFailed("remote.base_url is required for the odata source".to_string())
            })?;
            let source = ODataProductSource::new(base_url, Duration::from_secs(config.timeout_secs))?;
            Ok(Arc::new(source))
        }
    }
}
