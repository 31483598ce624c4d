use storeguard_types::{Location, RepoPath};
use std::collections::BTreeMap;

/// Entitlements key listing the web domains the app claims to handle.
pub const ASSOCIATED_DOMAINS_KEY: &str = "com.apple.developer.associated-domains";

/// Read-only view of a project, as seen by rules.
///
/// Every accessor is optional: a project may simply not have the artifact.
pub trait ProjectItem {
    fn service_config_plist(&self) -> Option<&ServiceConfig>;
    fn dependency_manifest(&self) -> Option<&DependencyManifest>;
    fn entitlements(&self) -> Option<&Entitlements>;
}

#[derive(Clone, Debug, Default)]
pub struct ProjectModel {
    pub project_root: RepoPath,

    /// `GoogleService-Info.plist`, if the project has one.
    pub service_config: Option<ServiceConfig>,

    /// CocoaPods `Podfile` declarations.
    pub dependency_manifest: Option<DependencyManifest>,

    /// The app target's `.entitlements` plist.
    pub entitlements: Option<Entitlements>,
}

impl ProjectItem for ProjectModel {
    fn service_config_plist(&self) -> Option<&ServiceConfig> {
        self.service_config.as_ref()
    }

    fn dependency_manifest(&self) -> Option<&DependencyManifest> {
        self.dependency_manifest.as_ref()
    }

    fn entitlements(&self) -> Option<&Entitlements> {
        self.entitlements.as_ref()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ServiceConfig {
    pub path: RepoPath,
    /// String-valued top-level entries (`GOOGLE_APP_ID`, `BUNDLE_ID`, ...).
    pub values: BTreeMap<String, String>,
}

impl ServiceConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug, Default)]
pub struct DependencyManifest {
    pub path: RepoPath,
    pub dependencies: Vec<Dependency>,
}

impl DependencyManifest {
    /// First dependency, in declaration order, whose name is one of `names`.
    pub fn find_any(&self, names: &[&str]) -> Option<&Dependency> {
        self.dependencies
            .iter()
            .find(|dep| names.contains(&dep.name.as_str()))
    }
}

#[derive(Clone, Debug)]
pub struct Dependency {
    pub name: String,
    /// Version requirement as written (`~> 10.0`), if any.
    pub requirement: Option<String>,
    pub location: Option<Location>,
}

impl Dependency {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirement: None,
            location: None,
        }
    }
}

// Two declarations of the same pod are the same dependency.
impl PartialEq for Dependency {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Dependency {}

#[derive(Clone, Debug, PartialEq)]
pub enum EntitlementValue {
    Boolean(bool),
    Integer(i64),
    String(String),
    Array(Vec<EntitlementValue>),
    Dictionary(BTreeMap<String, EntitlementValue>),
    /// Data, dates, reals and anything else no rule looks at.
    Other,
}

impl EntitlementValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EntitlementValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[EntitlementValue]> {
        match self {
            EntitlementValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Entitlements {
    pub path: RepoPath,
    pub entries: BTreeMap<String, EntitlementValue>,
}

impl Entitlements {
    pub fn get(&self, key: &str) -> Option<&EntitlementValue> {
        self.entries.get(key)
    }

    /// The associated-domains array. A value of any other shape counts as absent.
    pub fn associated_domains(&self) -> Option<&[EntitlementValue]> {
        self.get(ASSOCIATED_DOMAINS_KEY)?.as_array()
    }
}
