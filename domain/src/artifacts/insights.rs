//! Role insight records

use serde::{Deserialize, Serialize};

/// One perspective per expert role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInsights {
    pub designer: String,
    pub analyst: String,
    pub architect: String,
}
