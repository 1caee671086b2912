//! Identifier generator configuration module.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use crate::utils::id_gen::{DEFAULT_EPOCH_MILLIS, MAX_DATACENTER_ID, MAX_WORKER_ID};
use serde::{Deserialize, Serialize};

/// Identity of this process inside the id space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGenConfig {
    /// Worker id (0-31)
    pub worker_id: u64,

    /// Datacenter id (0-31)
    pub datacenter_id: u64,

    /// Custom epoch in milliseconds since the Unix epoch
    pub epoch_millis: u64,
}

impl Default for IdGenConfig {
    fn default() -> Self {
        Self {
            worker_id: 0,
            datacenter_id: 0,
            epoch_millis: DEFAULT_EPOCH_MILLIS,
        }
    }
}

impl Validate for IdGenConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.worker_id > MAX_WORKER_ID {
            return Err(ConfigError::ValueOutOfRange {
                key: "id_gen.worker_id".to_string(),
                message: format!("must be between 0 and {MAX_WORKER_ID}"),
            });
        }

        if self.datacenter_id > MAX_DATACENTER_ID {
            return Err(ConfigError::ValueOutOfRange {
                key: "id_gen.datacenter_id".to_string(),
                message: format!("must be between 0 and {MAX_DATACENTER_ID}"),
            });
        }

        Ok(())
    }
}
