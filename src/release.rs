use std::{cmp::Ordering, time::Duration};

use miette::{IntoDiagnostic, Result};
use serde::Deserialize;

const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateInfo,
}

#[derive(Debug, Deserialize)]
struct CrateInfo {
    max_version: String,
}

fn latest_version() -> Result<String> {
    let response: CrateResponse = reqwest::blocking::Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(Duration::from_secs(5))
        .build()
        .into_diagnostic()?
        .get(format!("https://crates.io/api/v1/crates/{CRATE_NAME}"))
        .send()
        .into_diagnostic()?
        .json()
        .into_diagnostic()?;

    Ok(response.krate.max_version)
}

/// Numeric component-wise comparison of dotted versions, so "1.10" sorts
/// after "1.9". Non-numeric components compare as zero.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| {
        v.split('.')
            .map(|part| part.parse::<u64>().unwrap_or(0))
            .collect::<Vec<_>>()
    };

    let (a, b) = (parse(a), parse(b));
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// Prints an upgrade hint if the index knows a newer release. Best effort;
/// stays quiet when the index is unreachable.
pub fn print_upgrade_hint() {
    let Ok(latest) = latest_version() else {
        return;
    };

    if compare_versions(&latest, CURRENT_VERSION) == Ordering::Greater {
        println!("A newer version is available. Run `cargo install {CRATE_NAME}` to upgrade.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_versions_compare_equal() {
        assert_eq!(compare_versions("1.2.3", "1.2.3"), Ordering::Equal);
    }

    #[test]
    fn components_compare_numerically() {
        assert_eq!(compare_versions("1.10.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("0.9", "1.0"), Ordering::Less);
    }

    #[test]
    fn missing_components_count_as_zero() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.2.1", "1.2"), Ordering::Greater);
    }
}
