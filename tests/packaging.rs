//! End-to-end packaging runs against a recording command runner.

mod common;

use common::{RecordingRunner, nap_with_demo, write_project};
use nap_packager::bundler::{Error, PackageOutcome, Packager, Platform, SettingsBuilder};
use std::{fs, io::Read, path::Path, sync::Arc};

const TIMESTAMP: &str = "2020.01.01T10.00";

fn packager(nap_root: &Path, platform: Platform, runner: Arc<RecordingRunner>) -> Packager {
    let settings = SettingsBuilder::new()
        .nap_root(nap_root)
        .platform(platform)
        .timestamp(TIMESTAMP)
        .build_jobs(4)
        .build()
        .unwrap();
    Packager::with_runner(settings, runner)
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn unknown_project_runs_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let runner = Arc::new(RecordingRunner::default());

    let err = packager(tmp.path(), Platform::Windows, runner.clone())
        .package("Nope")
        .await
        .unwrap_err();

    assert!(matches!(&err, Error::ProjectNotFound { name, searched } if name == "Nope" && searched.len() == 3));
    assert_eq!(err.exit_code(), 2);
    assert!(runner.commands().is_empty());
}

#[tokio::test]
async fn invalid_manifest_runs_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    write_project(tmp.path(), "examples", "broken", r#"{"title":"Broken"}"#);
    let runner = Arc::new(RecordingRunner::default());

    let err = packager(tmp.path(), Platform::MacOs, runner.clone())
        .package("Broken")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidManifest { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(runner.commands().is_empty());
}

#[tokio::test]
async fn windows_packages_a_single_zip() {
    let (tmp, project_dir) = nap_with_demo();
    fs::create_dir_all(project_dir.join("build_package").join("stale")).unwrap();
    let runner = Arc::new(RecordingRunner::default());

    let outcome = packager(tmp.path(), Platform::Windows, runner.clone())
        .package("Demo")
        .await
        .unwrap();

    let PackageOutcome::Packaged(bundle) = outcome else {
        panic!("expected an archive");
    };
    let expected = format!("Demo-1.2-Win64-{TIMESTAMP}.zip");
    assert_eq!(bundle.path, project_dir.join(&expected));
    assert_eq!(bundle.checksum.len(), 64);
    assert_eq!(bundle.size, fs::metadata(&bundle.path).unwrap().len());
    assert_eq!(file_names(&project_dir), vec![expected, "project.json".to_string()]);

    let lines = runner.command_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(&format!("cmake -H{}", project_dir.display())));
    assert!(lines[0].contains("-G \"Visual Studio 14 2015 Win64\""));
    assert!(lines[0].ends_with("-DPYBIND11_PYTHON_VERSION=3.5 -DPROJECT_PACKAGE_BIN_DIR=bin_package"));
    assert_eq!(lines[1], "cmake --build . --target demo --config Release");
    assert_eq!(
        runner.commands()[1].get_current_dir(),
        Some(project_dir.join("build_package").as_path())
    );

    let mut archive = zip::ZipArchive::new(fs::File::open(&bundle.path).unwrap()).unwrap();
    let top = format!("Demo-1.2-Win64-{TIMESTAMP}/");
    for i in 0..archive.len() {
        let entry = archive.by_index(i).unwrap();
        assert!(entry.name().starts_with(&top), "unexpected entry {}", entry.name());
    }
    let mut contents = String::new();
    archive
        .by_name(&format!("{top}lib/libnap.so"))
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "library");
}

#[tokio::test]
async fn macos_purges_finder_metadata_before_zipping() {
    let (tmp, project_dir) = nap_with_demo();
    let runner = Arc::new(RecordingRunner::default());

    let outcome = packager(tmp.path(), Platform::MacOs, runner.clone())
        .package("demo")
        .await
        .unwrap();

    let PackageOutcome::Packaged(bundle) = outcome else {
        panic!("expected an archive");
    };
    let name = format!("Demo-1.2-macOS-{TIMESTAMP}");
    assert_eq!(bundle.path, project_dir.join(format!("{name}.zip")));
    assert!(runner.staged_finder_files().is_empty());

    let commands = runner.commands();
    let lines = runner.command_lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("-G Xcode"));
    assert_eq!(lines[1], "xcodebuild -configuration Release -target install");
    assert_eq!(lines[2], format!("zip -yr {name}.zip {name}"));
    assert_eq!(commands[2].get_current_dir(), Some(project_dir.as_path()));

    assert!(!project_dir.join(&name).exists());
    assert!(!project_dir.join("bin_package").exists());
    assert!(!project_dir.join("build_package").exists());
}

#[tokio::test]
async fn linux_is_unsupported_by_default() {
    let (tmp, project_dir) = nap_with_demo();
    fs::create_dir_all(project_dir.join("bin_package")).unwrap();
    let runner = Arc::new(RecordingRunner::default());

    let outcome = packager(tmp.path(), Platform::Linux, runner.clone())
        .package("Demo")
        .await
        .unwrap();

    assert!(matches!(outcome, PackageOutcome::Unsupported(Platform::Linux)));
    assert!(runner.commands().is_empty());
    assert!(!project_dir.join("bin_package").exists());
}

#[tokio::test]
async fn experimental_linux_builds_a_tarball() {
    let (tmp, project_dir) = nap_with_demo();
    let runner = Arc::new(RecordingRunner::default());
    let settings = SettingsBuilder::new()
        .nap_root(tmp.path())
        .platform(Platform::Linux)
        .experimental_linux(true)
        .timestamp(TIMESTAMP)
        .build_jobs(4)
        .build()
        .unwrap();

    let outcome = Packager::with_runner(settings, runner.clone())
        .package("Demo")
        .await
        .unwrap();

    let PackageOutcome::Packaged(bundle) = outcome else {
        panic!("expected an archive");
    };
    let name = format!("Demo-1.2-Linux-{TIMESTAMP}");
    assert_eq!(bundle.path, project_dir.join(format!("{name}.tar.xz")));

    let lines = runner.command_lines();
    assert!(lines[0].ends_with("-DCMAKE_BUILD_TYPE=Release -DPROJECT_PACKAGE_BIN_DIR=bin_package"));
    assert_eq!(lines[1], "make all install -j4");
    assert_eq!(lines[2], format!("tar -cJvf {name}.tar.xz {name}"));
}

#[tokio::test]
async fn failed_build_aborts_without_cleanup() {
    let (tmp, project_dir) = nap_with_demo();
    let runner = Arc::new(RecordingRunner::failing_on("cmake --build"));

    let err = packager(tmp.path(), Platform::Windows, runner.clone())
        .package("Demo")
        .await
        .unwrap_err();

    assert!(matches!(&err, Error::CommandFailed { command, .. } if command.starts_with("cmake --build")));
    assert_eq!(err.exit_code(), 1);

    let lines = runner.command_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("cmake -H"));
    assert!(project_dir.join("build_package").is_dir());
    assert_eq!(file_names(&project_dir), vec!["build_package", "project.json"]);
}

#[tokio::test]
async fn failed_archiver_leaves_staging_in_place() {
    let (tmp, project_dir) = nap_with_demo();
    let runner = Arc::new(RecordingRunner::failing_on("zip"));

    let err = packager(tmp.path(), Platform::MacOs, runner.clone())
        .package("Demo")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::CommandFailed { .. }));
    assert_eq!(runner.commands().len(), 3);
    assert!(project_dir.join(format!("Demo-1.2-macOS-{TIMESTAMP}")).is_dir());
}
