//! ILS connection answering from site configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::context::{CapabilityParams, IlsConnection, OfflineMode};

/// ILS settings as written in the site configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IlsSettings {
    /// `~` (online), `ils-offline`, or `ils-none`.
    pub offline_mode: Option<OfflineMode>,
    /// Driver methods the ILS supports, e.g. `getMyHolds`.
    pub capabilities: Vec<String>,
    /// Enabled ILS functions, e.g. `ILLRequests`.
    pub functions: Vec<String>,
    /// Answer capability and function checks only when a patron is supplied.
    pub patron_required: bool,
}

/// [`IlsConnection`] backed by a fixed list of capabilities and functions.
#[derive(Debug, Clone, Default)]
pub struct StaticIlsConnection {
    offline_mode: Option<OfflineMode>,
    capabilities: HashSet<String>,
    functions: HashSet<String>,
    patron_required: bool,
}

impl StaticIlsConnection {
    pub fn new(settings: &IlsSettings) -> Self {
        Self {
            offline_mode: settings.offline_mode,
            capabilities: settings.capabilities.iter().cloned().collect(),
            functions: settings.functions.iter().cloned().collect(),
            patron_required: settings.patron_required,
        }
    }

    fn patron_ok(&self, params: &CapabilityParams) -> bool {
        !self.patron_required || params.patron.is_some()
    }
}

impl IlsConnection for StaticIlsConnection {
    fn offline_mode(&self) -> Option<OfflineMode> {
        self.offline_mode
    }

    fn check_capability(&self, capability: &str, params: &CapabilityParams) -> bool {
        self.patron_ok(params) && self.capabilities.contains(capability)
    }

    fn check_function(&self, function: &str, params: &CapabilityParams) -> bool {
        self.patron_ok(params) && self.functions.contains(function)
    }
}
