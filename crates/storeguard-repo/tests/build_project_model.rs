use camino::{Utf8Path, Utf8PathBuf};
use storeguard_domain::model::ProjectItem;
use storeguard_repo::{DiscoveryOptions, build_project_model, discover_artifacts};
use tempfile::TempDir;

const SERVICE_CONFIG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>BUNDLE_ID</key>
    <string>com.example.app</string>
</dict>
</plist>
"#;

const ENTITLEMENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>com.apple.developer.associated-domains</key>
    <array>
        <string>applinks:example.app.goo.gl</string>
    </array>
</dict>
</plist>
"#;

const PODFILE: &str = r#"platform :ios, '15.0'

target 'App' do
  use_frameworks!
  pod 'Firebase/Core'
  pod 'Firebase/DynamicLinks'
end
"#;

fn write_file(path: &Utf8Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, content).expect("write file");
}

fn setup_project() -> (TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path");

    write_file(&root.join("App").join("GoogleService-Info.plist"), SERVICE_CONFIG);
    write_file(&root.join("App").join("App.entitlements"), ENTITLEMENTS);
    write_file(&root.join("Podfile"), PODFILE);

    (temp, root)
}

#[test]
fn builds_model_from_discovered_artifacts() {
    let (_temp, root) = setup_project();
    let model = build_project_model(&root, &DiscoveryOptions::default()).expect("build model");

    let cfg = model.service_config_plist().expect("service config");
    assert_eq!(cfg.path.as_str(), "App/GoogleService-Info.plist");
    assert_eq!(cfg.get("BUNDLE_ID"), Some("com.example.app"));

    let pods = model.dependency_manifest().expect("podfile");
    assert_eq!(pods.path.as_str(), "Podfile");
    let links = pods
        .find_any(&["Firebase/DynamicLinks"])
        .expect("dynamic links pod");
    assert_eq!(links.location.as_ref().and_then(|l| l.line), Some(6));

    let ent = model.entitlements().expect("entitlements");
    assert_eq!(ent.path.as_str(), "App/App.entitlements");
    assert_eq!(ent.associated_domains().map(|d| d.len()), Some(1));
}

#[test]
fn vendored_pods_directory_is_not_searched() {
    let (_temp, root) = setup_project();
    write_file(
        &root.join("Pods").join("Firebase").join("Firebase.entitlements"),
        ENTITLEMENTS,
    );

    let artifacts = discover_artifacts(&root, &DiscoveryOptions::default()).expect("discover");
    assert_eq!(
        artifacts.entitlements.as_ref().map(|p| p.as_str()),
        Some("App/App.entitlements")
    );
}

#[test]
fn explicit_entitlements_path_wins() {
    let (_temp, root) = setup_project();
    write_file(&root.join("Config").join("Release.entitlements"), ENTITLEMENTS);

    let options = DiscoveryOptions {
        entitlements: Some("Config/Release.entitlements".to_string()),
        ..DiscoveryOptions::default()
    };
    let model = build_project_model(&root, &options).expect("build model");
    let ent = model.entitlements().expect("entitlements");
    assert_eq!(ent.path.as_str(), "Config/Release.entitlements");
}

#[test]
fn exclude_glob_hides_entitlements() {
    let (_temp, root) = setup_project();
    let options = DiscoveryOptions {
        exclude: vec!["App/*.entitlements".to_string()],
        ..DiscoveryOptions::default()
    };

    let model = build_project_model(&root, &options).expect("build model");
    assert!(model.entitlements().is_none());
    assert!(model.service_config_plist().is_some());
}
