//! Repository adapters: locate project artifacts and parse plists and Podfiles.
//!
//! This crate is the only one besides the CLI that touches the filesystem.

#![forbid(unsafe_code)]

mod discover;
mod parse;

use anyhow::Context;
use camino::Utf8Path;
use storeguard_domain::model::ProjectModel;
use storeguard_types::RepoPath;

pub use discover::{
    DiscoveryOptions, ENTITLEMENTS_EXTENSION, PODFILE_FILE_NAME, ProjectArtifacts,
    SERVICE_CONFIG_FILE_NAME, discover_artifacts,
};
pub use parse::{parse_entitlements, parse_podfile, parse_service_config};

/// Panic-free parsing entry points, no filesystem access.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary bytes as a service configuration plist. **Never panics.**
    pub fn parse_service_config(bytes: &[u8]) -> anyhow::Result<()> {
        let path = RepoPath::new(SERVICE_CONFIG_FILE_NAME);
        let _ = parse::parse_service_config(&path, bytes)?;
        Ok(())
    }

    /// Parse arbitrary bytes as an entitlements plist. **Never panics.**
    pub fn parse_entitlements(bytes: &[u8]) -> anyhow::Result<()> {
        let path = RepoPath::new("App.entitlements");
        let _ = parse::parse_entitlements(&path, bytes)?;
        Ok(())
    }

    /// Scan arbitrary text as a Podfile, returning the declared pod names.
    pub fn parse_podfile(text: &str) -> Vec<String> {
        let path = RepoPath::new(PODFILE_FILE_NAME);
        parse::parse_podfile(&path, text)
            .dependencies
            .into_iter()
            .map(|d| d.name)
            .collect()
    }
}

/// Discover and load the project model used by the rule engine.
pub fn build_project_model(
    project_root: &Utf8Path,
    options: &DiscoveryOptions,
) -> anyhow::Result<ProjectModel> {
    let artifacts = discover_artifacts(project_root, options).context("discover artifacts")?;
    load_project_model(project_root, &artifacts)
}

/// Load already-discovered artifacts.
///
/// A Podfile that cannot be read is an error. A plist that cannot be parsed is logged
/// and treated as absent, the same as a project that never had one.
pub fn load_project_model(
    project_root: &Utf8Path,
    artifacts: &ProjectArtifacts,
) -> anyhow::Result<ProjectModel> {
    let mut model = ProjectModel {
        project_root: RepoPath::from(project_root),
        ..ProjectModel::default()
    };

    if let Some(path) = &artifacts.service_config {
        let bytes = read_bytes(project_root, path)?;
        model.service_config = parse_or_warn(path, parse::parse_service_config(path, &bytes));
    }

    if let Some(path) = &artifacts.podfile {
        let bytes = read_bytes(project_root, path)?;
        let text = String::from_utf8_lossy(&bytes);
        model.dependency_manifest = Some(parse::parse_podfile(path, &text));
    }

    if let Some(path) = &artifacts.entitlements {
        let bytes = read_bytes(project_root, path)?;
        model.entitlements = parse_or_warn(path, parse::parse_entitlements(path, &bytes));
    }

    Ok(model)
}

fn read_bytes(project_root: &Utf8Path, path: &RepoPath) -> anyhow::Result<Vec<u8>> {
    let abs = project_root.join(path.as_str());
    std::fs::read(&abs).with_context(|| format!("read {}", abs))
}

fn parse_or_warn<T>(path: &RepoPath, parsed: anyhow::Result<T>) -> Option<T> {
    match parsed {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::warn!(path = path.as_str(), error = %format!("{err:#}"), "ignoring unparsable plist");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use proptest::prelude::*;
    use storeguard_domain::model::ProjectItem;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    const EMPTY_DICT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><dict/></plist>"#;

    #[test]
    fn unparsable_entitlements_are_treated_as_absent() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("GoogleService-Info.plist"), EMPTY_DICT);
        write_file(&root.join("Podfile"), "pod 'Firebase/DynamicLinks'\n");
        write_file(&root.join("App/App.entitlements"), "<plist><dict>");

        let model =
            build_project_model(&root, &DiscoveryOptions::default()).expect("build model");
        assert!(model.service_config_plist().is_some());
        assert!(model.entitlements().is_none());
        let pods = model.dependency_manifest().expect("podfile");
        assert_eq!(pods.dependencies.len(), 1);
    }

    #[test]
    fn empty_project_has_no_artifacts() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        let model =
            build_project_model(&root, &DiscoveryOptions::default()).expect("build model");
        assert!(model.service_config_plist().is_none());
        assert!(model.dependency_manifest().is_none());
        assert!(model.entitlements().is_none());
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let options = DiscoveryOptions {
            podfile: Some("ios/Podfile".to_string()),
            ..DiscoveryOptions::default()
        };

        let err = build_project_model(&root, &options).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("discover artifacts"));
        assert!(msg.contains("configured Podfile does not exist: ios/Podfile"));
    }

    proptest! {
        #[test]
        fn podfile_scan_never_panics(text in "\\PC*") {
            let _ = fuzz::parse_podfile(&text);
        }

        #[test]
        fn plist_parsers_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = fuzz::parse_service_config(&bytes);
            let _ = fuzz::parse_entitlements(&bytes);
        }

        #[test]
        fn quoted_pod_names_round_trip(name in "[A-Za-z][A-Za-z0-9_/-]{0,30}") {
            let text = format!("target 'App' do\n  pod '{name}', '~> 1.0'\nend\n");
            prop_assert_eq!(fuzz::parse_podfile(&text), vec![name]);
        }
    }
}
