//! Arch User Repository search

use super::traits::*;
use crate::results::SearchResult;
use anyhow::Result as AnyhowResult;
use serde::Deserialize;

/// Package search against the AUR RPC interface (v5)
pub struct Aur {
    api_url: String,
    package_base_url: String,
}

impl Aur {
    pub fn new() -> Self {
        Self {
            api_url: "https://aur.archlinux.org/rpc/".to_string(),
            package_base_url: "https://aur.archlinux.org/packages/".to_string(),
        }
    }

    /// Point the source at another RPC endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn package_url(&self, package_base: &str) -> String {
        format!("{}{}", self.package_base_url, urlencoding::encode(package_base))
    }
}

impl Default for Aur {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct RpcReply {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    error: Option<String>,
    results: Option<Vec<Package>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Package {
    name: String,
    package_base: String,
    version: String,
    #[serde(default)]
    description: Option<String>,
}

impl SourceAdapter for Aur {
    fn readable_name(&self) -> &str {
        "Arch User Repository"
    }

    fn description(&self) -> &str {
        "Search the Arch User Repository for a package."
    }

    fn request(&self, term: &str) -> AnyhowResult<SourceRequest> {
        Ok(SourceRequest::get(&self.api_url)
            .param("v", "5")
            .param("type", "search")
            .param("arg", term))
    }

    fn response(&self, response: SourceResponse) -> AnyhowResult<Vec<SearchResult>> {
        let reply: RpcReply = response.json()?;

        if reply.kind == "error" {
            anyhow::bail!(
                "AUR error: {}",
                reply.error.unwrap_or_else(|| "unknown".to_string())
            );
        }

        let packages = reply
            .results
            .ok_or_else(|| anyhow::anyhow!("AUR reply without results"))?;

        let results = packages
            .into_iter()
            .map(|pkg| {
                let uri = self.package_url(&pkg.package_base);
                let description = format!(
                    "{} -- version {}",
                    pkg.description.unwrap_or_default(),
                    pkg.version
                );
                SearchResult::new(pkg.name, uri).with_description(description)
            })
            .collect();

        Ok(results)
    }
}
