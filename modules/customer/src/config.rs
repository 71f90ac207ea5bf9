use serde::{Deserialize, Serialize};

/// Customer module configuration (`modules.customer` section).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerConfig {
    /// Insert the demo customers during `init`.
    #[serde(default)]
    pub seed: bool,
}
