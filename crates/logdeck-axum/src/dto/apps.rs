//! App listing DTOs.

use logdeck_core::AppLogPaths;
use serde::{Deserialize, Serialize};

/// One supervised app as shown in the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppSummaryDto {
    pub name: String,
    pub out_log_path: String,
    pub err_log_path: String,
}

impl From<AppLogPaths> for AppSummaryDto {
    fn from(app: AppLogPaths) -> Self {
        Self {
            name: app.name,
            out_log_path: app.out_log_path.display().to_string(),
            err_log_path: app.err_log_path.display().to_string(),
        }
    }
}
