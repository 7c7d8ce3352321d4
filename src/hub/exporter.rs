//! Delegated export backend: fetch the repository's published ONNX graph.
//!
//! Model repositories that ship a pre-exported graph (under `model.onnx` or
//! the `onnx/` subtree) are the external export capability this tool
//! prefers. Any failure here is recoverable; the pipeline falls back to the
//! manual trace exporter.

use std::path::Path;

use crate::pipeline::{ConvertError, GraphExporter, Result, GRAPH_FILE};

use super::client::HubClient;

/// Repository paths probed for a published graph, in order.
const PUBLISHED_GRAPHS: &[&str] = &["model.onnx", "onnx/model.onnx"];

/// Hub-backed delegated exporter.
#[derive(Clone, Default)]
pub struct HubGraphExporter {
    client: HubClient,
}

impl HubGraphExporter {
    /// Create an exporter with environment-resolved authentication.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: HubClient::new(),
        }
    }

    /// Create an exporter over an existing client.
    #[must_use]
    pub fn with_client(client: HubClient) -> Self {
        Self { client }
    }
}

impl GraphExporter for HubGraphExporter {
    /// Copy the repository's published graph and config into `out_dir`,
    /// normalizing the graph name to `model.onnx`.
    fn export_graph(&self, model_id: &str, out_dir: &Path) -> Result<()> {
        let mut fetched = false;
        for candidate in PUBLISHED_GRAPHS {
            match self
                .client
                .fetch_into(model_id, candidate, out_dir, GRAPH_FILE)
            {
                Ok(_) => {
                    fetched = true;
                    break;
                }
                Err(ConvertError::FileNotFound { .. }) => {}
                Err(err) => {
                    return Err(ConvertError::DelegatedExport {
                        message: err.to_string(),
                    })
                }
            }
        }

        if !fetched {
            return Err(ConvertError::DelegatedExport {
                message: format!("{model_id} publishes no ONNX graph"),
            });
        }

        self.client
            .fetch_into(model_id, "config.json", out_dir, "config.json")
            .map_err(|err| ConvertError::DelegatedExport {
                message: err.to_string(),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_repo_id_is_a_delegated_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let exporter = HubGraphExporter::with_client(
            HubClient::with_token("t").cache_dir(tmp.path()),
        );

        let result = exporter.export_graph("not-a-repo", tmp.path());
        assert!(matches!(
            result,
            Err(ConvertError::DelegatedExport { .. })
        ));
    }
}
