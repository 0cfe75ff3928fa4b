//! Metrics response models.

use serde::{Deserialize, Serialize};

/// Storage consumed by a scope.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageUsage {
    /// Bytes used.
    pub total_bytes: u64,
    /// Megabytes used.
    pub total_mb: f64,
    /// Gigabytes used.
    pub total_gb: f64,
}

/// Node counts for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeTotals {
    /// Number of files.
    #[serde(rename = "arquivos")]
    pub files: u64,
    /// Number of folders.
    #[serde(rename = "pastas")]
    pub folders: u64,
    /// Files plus folders.
    pub total: u64,
}

/// Documents per status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    /// Status id (`None` for documents without a status).
    #[serde(default)]
    pub status_id: Option<i64>,
    /// Status label.
    pub status_name: String,
    /// Display color.
    #[serde(default)]
    pub status_color: String,
    /// Number of documents.
    pub total: u64,
}

/// Metrics dashboard payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricsResponse {
    /// Storage consumed.
    #[serde(rename = "armazenamento")]
    pub storage: StorageUsage,
    /// Node counts.
    #[serde(rename = "totais")]
    pub totals: NodeTotals,
    /// Documents per status.
    #[serde(default)]
    pub status: Vec<StatusCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_dashboard() {
        let metrics: MetricsResponse = serde_json::from_value(serde_json::json!({
            "armazenamento": { "total_bytes": 1048576, "total_mb": 1.0, "total_gb": 0.001 },
            "totais": { "arquivos": 10, "pastas": 2, "total": 12 },
            "status": [
                { "status_id": null, "status_name": "Sem status", "status_color": "#ccc", "total": 4 }
            ]
        }))
        .unwrap();
        assert_eq!(metrics.totals.files, 10);
        assert_eq!(metrics.status[0].status_id, None);
    }
}
