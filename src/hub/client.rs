//! Low-level hub client: authentication, cache, single-file fetches.

use std::path::{Path, PathBuf};

use crate::pipeline::{ConvertError, Result};

/// Thin wrapper over the hf-hub sync API with token resolution and an
/// overridable cache directory.
#[derive(Clone)]
pub struct HubClient {
    pub(crate) token: Option<String>,
    pub(crate) cache_dir: PathBuf,
}

impl HubClient {
    /// Create a client, resolving the token from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: Self::resolve_token(),
            cache_dir: Self::default_cache_dir(),
        }
    }

    /// Create a client with an explicit token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            cache_dir: Self::default_cache_dir(),
        }
    }

    /// Override the cache directory.
    #[must_use]
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Whether the client carries an authentication token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Resolve a token from `HF_TOKEN`, then `~/.huggingface/token`.
    #[must_use]
    pub fn resolve_token() -> Option<String> {
        if let Ok(token) = std::env::var("HF_TOKEN") {
            if !token.is_empty() {
                return Some(token);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let token_path = home.join(".huggingface").join("token");
            if let Ok(token) = std::fs::read_to_string(token_path) {
                let token = token.trim().to_string();
                if !token.is_empty() {
                    return Some(token);
                }
            }
        }

        None
    }

    fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("huggingface")
            .join("hub")
    }

    /// Validate a repository ID in "org/name" format.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Hub`] for malformed IDs.
    pub fn parse_repo_id(repo_id: &str) -> Result<(&str, &str)> {
        let parts: Vec<&str> = repo_id.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(ConvertError::Hub {
                repo: repo_id.to_string(),
                message: "invalid repository ID (expected 'org/name')".into(),
            });
        }
        Ok((parts[0], parts[1]))
    }

    fn build_api(&self) -> Result<hf_hub::api::sync::Api> {
        let mut builder =
            hf_hub::api::sync::ApiBuilder::new().with_cache_dir(self.cache_dir.clone());
        if let Some(token) = &self.token {
            builder = builder.with_token(Some(token.clone()));
        }
        builder.build().map_err(|e| ConvertError::Hub {
            repo: String::new(),
            message: format!("failed to initialize hub API: {e}"),
        })
    }

    /// Download one file from a model repository, returning its local path.
    ///
    /// # Errors
    ///
    /// [`ConvertError::FileNotFound`] when the repo lacks the file,
    /// [`ConvertError::Hub`] for any other request failure.
    pub fn fetch(&self, repo_id: &str, file: &str) -> Result<PathBuf> {
        Self::parse_repo_id(repo_id)?;

        let api = self.build_api()?;
        let repo = api.model(repo_id.to_string());

        match repo.get(file) {
            Ok(path) => Ok(path),
            Err(hf_hub::api::sync::ApiError::RequestError(e)) => {
                if e.to_string().contains("404") {
                    Err(ConvertError::FileNotFound {
                        repo: repo_id.to_string(),
                        file: file.to_string(),
                    })
                } else {
                    Err(ConvertError::Hub {
                        repo: repo_id.to_string(),
                        message: format!("download of {file} failed: {e}"),
                    })
                }
            }
            Err(e) => Err(ConvertError::Hub {
                repo: repo_id.to_string(),
                message: format!("download of {file} failed: {e}"),
            }),
        }
    }

    /// Fetch a file and copy it into `dest_dir` under `dest_name`.
    ///
    /// # Errors
    ///
    /// Same as [`HubClient::fetch`], plus IO failures for the copy.
    pub fn fetch_into(
        &self,
        repo_id: &str,
        file: &str,
        dest_dir: &Path,
        dest_name: &str,
    ) -> Result<PathBuf> {
        let src = self.fetch(repo_id, file)?;
        let dest = dest_dir.join(dest_name);
        std::fs::create_dir_all(dest_dir)?;
        std::fs::copy(&src, &dest)?;
        Ok(dest)
    }
}

impl Default for HubClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token_is_authenticated() {
        let client = HubClient::with_token("hf_test");
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_cache_dir_override() {
        let client = HubClient::with_token("t").cache_dir("/tmp/hub-cache");
        assert_eq!(client.cache_dir, PathBuf::from("/tmp/hub-cache"));
    }

    #[test]
    fn test_parse_repo_id_valid() {
        let (org, name) = HubClient::parse_repo_id("mirth/chonky_distilbert_base_uncased_1")
            .unwrap();
        assert_eq!(org, "mirth");
        assert_eq!(name, "chonky_distilbert_base_uncased_1");
    }

    #[test]
    fn test_parse_repo_id_invalid() {
        for bad in ["distilbert", "a/b/c", "/name", "org/", ""] {
            assert!(
                HubClient::parse_repo_id(bad).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_fetch_rejects_bad_repo_id_before_any_request() {
        let client = HubClient::with_token("t").cache_dir("/tmp/never-used");
        let result = client.fetch("not-a-repo-id", "config.json");
        assert!(matches!(result, Err(ConvertError::Hub { .. })));
    }

    #[test]
    #[ignore] // Requires network access
    fn test_fetch_real_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        let client = HubClient::new().cache_dir(tmp.path());
        let path = client
            .fetch("hf-internal-testing/tiny-random-bert", "config.json")
            .expect("fetch should succeed for the test repo");
        assert!(path.exists());
    }
}
