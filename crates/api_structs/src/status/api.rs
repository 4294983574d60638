use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    /// Liveness probe of the adoption backend
    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub message: String,
    }
}
