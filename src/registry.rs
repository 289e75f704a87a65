use std::time::Duration;

use miette::{miette, IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;

use crate::{docker, log};

/// A `repository[:tag]` image reference, normalized the way Docker Hub's
/// API expects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub repository: String,
    pub tag: String,
}

impl ImageRef {
    pub fn parse(image: &str) -> Self {
        let (repository, tag) = match image.split_once(':') {
            Some((repository, tag)) => (repository.to_string(), tag.to_string()),
            None => (image.to_string(), "latest".to_string()),
        };

        // official images live under the "library" namespace
        let repository = if repository.contains('/') {
            repository
        } else {
            format!("library/{repository}")
        };

        ImageRef { repository, tag }
    }

    /// The `RepoDigests` entry a local copy of this image would carry if it
    /// matched `digest`.
    pub fn digest_ref(&self, digest: &str) -> String {
        format!("{}@{}", self.repository, digest)
    }

    fn tags_url(&self) -> String {
        format!(
            "https://hub.docker.com/v2/repositories/{}/tags/{}",
            self.repository, self.tag
        )
    }
}

#[derive(Debug, Deserialize)]
struct TagPage {
    images: Vec<TagImage>,
}

#[derive(Debug, Deserialize)]
struct TagImage {
    digest: String,
}

pub fn remote_digest(image: &ImageRef) -> Result<String> {
    let body = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .into_diagnostic()?
        .get(image.tags_url())
        .send()
        .into_diagnostic()
        .wrap_err("registry request failed")?
        .text()
        .into_diagnostic()?;

    let page: TagPage = serde_json::from_str(&body)
        .into_diagnostic()
        .wrap_err("failed to parse registry response")?;

    page.images
        .into_iter()
        .next()
        .map(|i| i.digest)
        .ok_or_else(|| miette!("registry lists no images for {}:{}", image.repository, image.tag))
}

/// True only when the locally cached digest provably matches the registry.
/// Any lookup failure (missing local image, network error, parse error)
/// counts as stale.
pub fn is_current(image: &str) -> bool {
    let image_ref = ImageRef::parse(image);

    let Ok(local) = docker::local_digest(image) else {
        return false;
    };
    let Ok(remote) = remote_digest(&image_ref) else {
        return false;
    };

    local == image_ref.digest_ref(&remote)
}

/// Pulls `image` unless the local copy already matches the registry digest.
pub fn update(image: &str) -> Result<()> {
    if is_current(image) {
        log!("Skipping" ("pull"): "{image} is up to date");
        return Ok(());
    }

    docker::pull(image)
}
