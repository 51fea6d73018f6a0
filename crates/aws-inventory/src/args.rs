//! Parsing of the comma-separated selection arguments
//!
//! All three selections are sanitized the same way: spaces, `;`, `:` and
//! line/tab characters are removed and the result is lowercased. Unknown
//! names are dropped, and the surviving names come back in canonical order
//! rather than the order they were typed in.

use crate::resource_kind::ResourceKind;
use crate::writer::OutputKind;
use tracing::warn;

const SEPARATOR: char = ',';

/// Token selecting every known region or resource type
pub const SELECT_ALL: &str = "all";

/// Token selecting the single default-region job
pub const SELECT_DEFAULT_REGION: &str = "default";

/// Known AWS regions, in canonical listing order
pub const ALL_REGIONS: &[&str] = &[
    "us-east-2",
    "us-east-1",
    "us-west-1",
    "us-west-2",
    "af-south-1",
    "ap-east-1",
    "ap-south-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ap-south-1",
    "ap-northeast-3",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "ca-central-1",
    "ca-west-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-south-1",
    "eu-west-3",
    "eu-south-2",
    "eu-north-1",
    "eu-central-2",
    "il-central-1",
    "me-south-1",
    "me-central-1",
    "sa-east-1",
];

/// The region job set requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSelection {
    /// One job in the default region of the loaded AWS configuration
    Default,
    /// One job per listed region
    Regions(Vec<String>),
}

impl RegionSelection {
    /// Whether the selection would produce no jobs at all
    pub fn is_empty(&self) -> bool {
        matches!(self, RegionSelection::Regions(r) if r.is_empty())
    }

    /// Explicit region list, `None` for the default-region job
    pub fn into_regions(self) -> Option<Vec<String>> {
        match self {
            RegionSelection::Default => None,
            RegionSelection::Regions(r) => Some(r),
        }
    }
}

/// Strip whitespace, `;` and `:`, then lowercase
pub fn sanitize(arg: &str) -> String {
    arg.chars()
        .filter(|c| !matches!(c, ' ' | ';' | ':' | '\n' | '\t' | '\r'))
        .collect::<String>()
        .to_lowercase()
}

/// Non-empty tokens in first-seen order, repeats dropped
fn tokens(sanitized: &str) -> Vec<&str> {
    let mut seen = Vec::new();
    for token in sanitized.split(SEPARATOR).filter(|t| !t.is_empty()) {
        if !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen
}

/// Every known region, in canonical order
pub fn all_regions() -> Vec<String> {
    ALL_REGIONS.iter().map(|r| (*r).to_string()).collect()
}

/// Parse the `--regions` argument.
///
/// Empty input or any `all` token selects every known region. `default` on
/// its own selects the single default-region job.
pub fn parse_regions(arg: &str) -> RegionSelection {
    let sanitized = sanitize(arg);
    if sanitized.is_empty() {
        return RegionSelection::Regions(all_regions());
    }

    let requested = tokens(&sanitized);
    if requested.contains(&SELECT_ALL) {
        return RegionSelection::Regions(all_regions());
    }
    if requested == [SELECT_DEFAULT_REGION] {
        return RegionSelection::Default;
    }

    for token in &requested {
        if !ALL_REGIONS.contains(token) {
            warn!(region = %token, "Ignoring unknown region");
        }
    }

    RegionSelection::Regions(
        ALL_REGIONS
            .iter()
            .filter(|r| requested.contains(*r))
            .map(|r| (*r).to_string())
            .collect(),
    )
}

/// Parse the `--resources` argument. Empty input or `all` selects every type.
pub fn parse_resources(arg: &str) -> Vec<ResourceKind> {
    let sanitized = sanitize(arg);
    if sanitized.is_empty() || sanitized == SELECT_ALL {
        return ResourceKind::ALL.to_vec();
    }

    let requested = tokens(&sanitized);
    for token in &requested {
        if ResourceKind::from_arg(token).is_none() && *token != SELECT_ALL {
            warn!(resource = %token, "Ignoring unknown resource type");
        }
    }
    if requested.contains(&SELECT_ALL) {
        return ResourceKind::ALL.to_vec();
    }

    ResourceKind::ALL
        .into_iter()
        .filter(|k| requested.contains(&k.arg_name()))
        .collect()
}

/// Parse the `--outputs` argument. Empty input selects stdout.
pub fn parse_outputs(arg: &str) -> Vec<OutputKind> {
    let sanitized = sanitize(arg);
    if sanitized.is_empty() {
        return vec![OutputKind::default()];
    }

    let requested = tokens(&sanitized);
    for token in &requested {
        if OutputKind::from_arg(token).is_none() {
            warn!(output = %token, "Ignoring unknown output");
        }
    }

    OutputKind::ALL
        .into_iter()
        .filter(|o| requested.contains(&o.arg_name()))
        .collect()
}
