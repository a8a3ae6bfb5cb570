use serde::{Deserialize, Serialize};

/// One configuration record from the endpoint table. Maintained by an
/// external administrative process; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub endpoint: String,
    pub label: String,
    pub hit: String,
}
