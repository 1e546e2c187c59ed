use std::collections::BTreeMap;
use std::sync::Mutex;

use ibc_relay_types::core::ics24_host::identifier::ChainId;

use crate::config::{PathConfigKey, PathConfigStore};
use crate::error::Error;

pub type PathConfigUpdate = (String, ChainId, BTreeMap<PathConfigKey, String>);

/// Store that records every update it receives.
#[derive(Debug, Default)]
pub struct RecordingStore {
    updates: Mutex<Vec<PathConfigUpdate>>,
}

impl RecordingStore {
    pub fn updates(&self) -> Vec<PathConfigUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

impl PathConfigStore for RecordingStore {
    fn update_path_config(
        &self,
        path_name: &str,
        chain_id: &ChainId,
        kv: &BTreeMap<PathConfigKey, String>,
    ) -> Result<(), Error> {
        self.updates
            .lock()
            .unwrap()
            .push((path_name.to_string(), chain_id.clone(), kv.clone()));

        Ok(())
    }
}
