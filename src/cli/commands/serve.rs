//! Serve Command
//!
//! Start the management API daemon.

use std::sync::Arc;

use crate::api;
use crate::settings::Settings;
use crate::store::ConfigStore;
use crate::types::Result;

pub async fn run(settings: Settings) -> Result<()> {
    let store = Arc::new(ConfigStore::new(settings.reference_policy));
    api::serve(&settings, store).await
}
