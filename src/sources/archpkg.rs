//! Arch Linux official package search

use super::traits::*;
use crate::results::SearchResult;
use anyhow::Result as AnyhowResult;
use serde::Deserialize;

/// Package search against the archlinux.org JSON API
pub struct ArchPkg {
    api_url: String,
    package_base_url: String,
}

impl ArchPkg {
    pub fn new() -> Self {
        Self {
            api_url: "https://archlinux.org/packages/search/json/".to_string(),
            package_base_url: "https://archlinux.org/packages".to_string(),
        }
    }

    /// Point the source at another search endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// `<base>/<repo>/<arch>/<pkgname>`
    pub fn package_url(&self, repo: &str, arch: &str, pkgname: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.package_base_url.trim_end_matches('/'),
            urlencoding::encode(repo),
            urlencoding::encode(arch),
            urlencoding::encode(pkgname)
        )
    }
}

impl Default for ArchPkg {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct SearchReply {
    results: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    pkgname: String,
    pkgver: String,
    pkgrel: String,
    repo: String,
    arch: String,
    #[serde(default)]
    pkgdesc: String,
}

impl SourceAdapter for ArchPkg {
    fn readable_name(&self) -> &str {
        "Arch Linux Packages"
    }

    fn description(&self) -> &str {
        "Search the official Arch Linux repositories for a package."
    }

    fn request(&self, term: &str) -> AnyhowResult<SourceRequest> {
        Ok(SourceRequest::get(&self.api_url).param("q", term))
    }

    fn response(&self, response: SourceResponse) -> AnyhowResult<Vec<SearchResult>> {
        let reply: SearchReply = response.json()?;

        let results = reply
            .results
            .into_iter()
            .map(|pkg| {
                let uri = self.package_url(&pkg.repo, &pkg.arch, &pkg.pkgname);
                let description =
                    format!("{} -- version {}-{}", pkg.pkgdesc, pkg.pkgver, pkg.pkgrel);
                SearchResult::new(pkg.pkgname, uri).with_description(description)
            })
            .collect();

        Ok(results)
    }
}
