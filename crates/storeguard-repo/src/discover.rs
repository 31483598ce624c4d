use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use storeguard_types::RepoPath;
use walkdir::{DirEntry, WalkDir};

pub const SERVICE_CONFIG_FILE_NAME: &str = "GoogleService-Info.plist";
pub const PODFILE_FILE_NAME: &str = "Podfile";
pub const ENTITLEMENTS_EXTENSION: &str = "entitlements";

/// Directories that never hold the app's own configuration.
const SKIPPED_DIRS: &[&str] = &[
    ".git",
    "Pods",
    "Carthage",
    "DerivedData",
    "build",
    "node_modules",
];

/// Explicit locations (project-relative) and discovery excludes.
#[derive(Clone, Debug, Default)]
pub struct DiscoveryOptions {
    pub service_config: Option<String>,
    pub podfile: Option<String>,
    pub entitlements: Option<String>,
    pub exclude: Vec<String>,
}

/// Artifact locations chosen for a project, relative to its root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectArtifacts {
    pub service_config: Option<RepoPath>,
    pub podfile: Option<RepoPath>,
    pub entitlements: Option<RepoPath>,
}

/// Locate the service config, Podfile and entitlements under `project_root`.
///
/// Behavior:
/// - explicit paths win and must exist
/// - otherwise the shallowest match wins, ties broken by path
/// - vendored/build directories and `exclude` globs are never searched
pub fn discover_artifacts(
    project_root: &Utf8Path,
    options: &DiscoveryOptions,
) -> anyhow::Result<ProjectArtifacts> {
    let exclude = build_globset(&options.exclude).context("compile exclude globset")?;

    let mut service_configs: Vec<RepoPath> = Vec::new();
    let mut podfiles: Vec<RepoPath> = Vec::new();
    let mut entitlements: Vec<RepoPath> = Vec::new();

    let walker = WalkDir::new(project_root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_skipped(project_root, e, &exclude));

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(abs) = pathbuf_to_utf8(entry.path().to_path_buf()) else {
            continue;
        };
        let rel = RepoPath::new(abs.strip_prefix(project_root).unwrap_or(&abs).as_str());

        match abs.file_name() {
            Some(SERVICE_CONFIG_FILE_NAME) => service_configs.push(rel),
            Some(PODFILE_FILE_NAME) => podfiles.push(rel),
            _ if abs.extension() == Some(ENTITLEMENTS_EXTENSION) => entitlements.push(rel),
            _ => {}
        }
    }

    let artifacts = ProjectArtifacts {
        service_config: choose(
            project_root,
            "service config",
            "service_config",
            options.service_config.as_deref(),
            service_configs,
        )?,
        podfile: choose(
            project_root,
            "Podfile",
            "podfile",
            options.podfile.as_deref(),
            podfiles,
        )?,
        entitlements: choose(
            project_root,
            "entitlements",
            "entitlements",
            options.entitlements.as_deref(),
            entitlements,
        )?,
    };

    tracing::debug!(?artifacts, "discovered project artifacts");
    Ok(artifacts)
}

/// `key` is the `[paths]` setting that overrides discovery for this artifact.
fn choose(
    project_root: &Utf8Path,
    kind: &str,
    key: &str,
    explicit: Option<&str>,
    mut candidates: Vec<RepoPath>,
) -> anyhow::Result<Option<RepoPath>> {
    if let Some(p) = explicit {
        if !project_root.join(p).is_file() {
            bail!("configured {kind} does not exist: {p}");
        }
        return Ok(Some(RepoPath::new(p)));
    }

    candidates.sort_by(|a, b| a.depth().cmp(&b.depth()).then_with(|| a.cmp(b)));
    if let Some(hint) = ambiguity_hint(key, &candidates) {
        tracing::warn!(
            kind,
            chosen = candidates[0].as_str(),
            tied = candidates[1].as_str(),
            "{hint}"
        );
    } else if candidates.len() > 1 {
        tracing::info!(
            kind,
            chosen = candidates[0].as_str(),
            ignored = candidates.len() - 1,
            "multiple candidates found; using the shallowest"
        );
    }
    Ok(candidates.into_iter().next())
}

/// When the two shallowest (sorted) candidates share a depth the pick is only alphabetical,
/// so an app extension can win over the app target.
fn ambiguity_hint(key: &str, sorted: &[RepoPath]) -> Option<String> {
    let [first, second, ..] = sorted else {
        return None;
    };
    (first.depth() == second.depth()).then(|| {
        format!(
            "several candidates at the same depth; chose {} alphabetically, set `[paths] {key}` in storeguard.toml to pick another",
            first.as_str()
        )
    })
}

fn is_skipped(project_root: &Utf8Path, entry: &DirEntry, exclude: &GlobSet) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    if entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
    {
        return true;
    }
    let Some(abs) = pathbuf_to_utf8(entry.path().to_path_buf()) else {
        return true;
    };
    let rel = abs
        .strip_prefix(project_root)
        .unwrap_or(&abs)
        .as_str()
        .replace('\\', "/");
    exclude.is_match(&rel)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p)?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
