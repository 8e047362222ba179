use super::*;
use crate::backends::config::ToolPaths;
use crate::backends::exec::testing::{FakeRunner, Reply};
use crate::packages::SunManager;

const INSTALLED_1_0: &str = "PKGINST: SUNWfoo\nVERSION: 1.0\n";
const SOURCE_2_0: &str = "PKGINST: SUNWfoo\nVERSION: 2.0\n";
const SOURCE_1_0: &str = "PKGINST: SUNWfoo\nVERSION: 1.0\n";
const MISSING: &str = "ERROR: information for \"SUNWfoo\" was not found\n";

const QUERY: &[&str] = &["-l", "SUNWfoo"];
const SOURCE_QUERY: &[&str] = &["-l", "-d", "/spool", "SUNWfoo"];
const PKGADD: &[&str] = &["-d", "/spool", "-n", "SUNWfoo"];
const PKGRM: &[&str] = &["-n", "SUNWfoo"];

fn sun(runner: FakeRunner) -> SunManager<FakeRunner> {
    SunManager::new(ToolPaths::default(), runner)
}

fn ok() -> Reply {
    Reply::Output(String::new())
}

fn wants(ensure: Ensure) -> DesiredState {
    DesiredState::new("SUNWfoo", ensure).with_source("/spool")
}

#[test]
fn install_without_source_fails_before_pkgadd() {
    let manager = sun(FakeRunner::new().on("pkginfo", QUERY, Reply::Fail(MISSING.into())));
    let desired = DesiredState::new("SUNWfoo", Ensure::Present);

    let err = Reconciler::new(&manager).reconcile(&desired).unwrap_err();

    assert!(matches!(err, SunpkgError::ConfigError(_)));
    assert_eq!(manager.runner().count("pkgadd"), 0);
    assert_eq!(manager.runner().programs(), vec!["pkginfo"]);
}

#[test]
fn absent_and_absent_is_a_no_op() {
    let manager = sun(FakeRunner::new().on("pkginfo", QUERY, Reply::Fail(MISSING.into())));

    let transition = Reconciler::new(&manager)
        .reconcile(&wants(Ensure::Absent))
        .unwrap();

    assert_eq!(transition, Transition::Unchanged(PackageState::Absent));
    assert!(!transition.is_change());
    assert_eq!(manager.runner().count("pkgadd"), 0);
    assert_eq!(manager.runner().count("pkgrm"), 0);
}

#[test]
fn absent_removes_installed_package() {
    let manager = sun(FakeRunner::new()
        .on("pkginfo", QUERY, Reply::Output(INSTALLED_1_0.into()))
        .on("pkgrm", PKGRM, ok()));

    let transition = Reconciler::new(&manager)
        .reconcile(&wants(Ensure::Absent))
        .unwrap();

    assert_eq!(
        transition,
        Transition::Remove {
            installed: Some("1.0".to_string())
        }
    );
    assert_eq!(manager.runner().programs(), vec!["pkginfo", "pkgrm"]);
}

#[test]
fn present_installs_missing_package() {
    let manager = sun(FakeRunner::new()
        .on("pkginfo", QUERY, Reply::Fail(MISSING.into()))
        .on("pkgadd", PKGADD, ok()));

    let transition = Reconciler::new(&manager)
        .reconcile(&wants(Ensure::Present))
        .unwrap();

    assert_eq!(transition, Transition::Install { available: None });
    assert_eq!(manager.runner().programs(), vec!["pkginfo", "pkgadd"]);
}

#[test]
fn present_accepts_any_installed_version() {
    let manager = sun(FakeRunner::new().on("pkginfo", QUERY, Reply::Output(INSTALLED_1_0.into())));

    let transition = Reconciler::new(&manager)
        .reconcile(&DesiredState::new("SUNWfoo", Ensure::Present))
        .unwrap();

    assert_eq!(
        transition,
        Transition::Unchanged(PackageState::Present(Some("1.0".to_string())))
    );
    assert_eq!(manager.runner().programs(), vec!["pkginfo"]);
}

#[test]
fn latest_updates_when_source_is_newer() {
    let manager = sun(FakeRunner::new()
        .on("pkginfo", QUERY, Reply::Output(INSTALLED_1_0.into()))
        .on("pkginfo", SOURCE_QUERY, Reply::Output(SOURCE_2_0.into()))
        .on("pkgrm", PKGRM, ok())
        .on("pkgadd", PKGADD, ok()));

    let transition = Reconciler::new(&manager)
        .reconcile(&wants(Ensure::Latest))
        .unwrap();

    assert_eq!(
        transition,
        Transition::Update {
            installed: Some("1.0".to_string()),
            available: Some("2.0".to_string()),
        }
    );
    assert_eq!(transition.to_string(), "update 1.0 -> 2.0");

    // plan query, source query, live re-check, then remove before add
    assert_eq!(
        manager.runner().programs(),
        vec!["pkginfo", "pkginfo", "pkginfo", "pkgrm", "pkgadd"]
    );
}

#[test]
fn update_still_installs_when_recheck_finds_package_gone() {
    let manager = sun(FakeRunner::new()
        .on("pkginfo", QUERY, Reply::Output(INSTALLED_1_0.into()))
        .on("pkginfo", QUERY, Reply::Fail(MISSING.into()))
        .on("pkginfo", SOURCE_QUERY, Reply::Output(SOURCE_2_0.into()))
        .on("pkgrm", PKGRM, ok())
        .on("pkgadd", PKGADD, ok()));

    let transition = Reconciler::new(&manager)
        .reconcile(&wants(Ensure::Latest))
        .unwrap();

    assert!(matches!(transition, Transition::Update { .. }));
    assert_eq!(manager.runner().count("pkgrm"), 0);
    assert_eq!(manager.runner().count("pkgadd"), 1);
}

#[test]
fn latest_is_unchanged_when_versions_match() {
    let manager = sun(FakeRunner::new()
        .on("pkginfo", QUERY, Reply::Output(INSTALLED_1_0.into()))
        .on("pkginfo", SOURCE_QUERY, Reply::Output(SOURCE_1_0.into())));

    let transition = Reconciler::new(&manager)
        .reconcile(&wants(Ensure::Latest))
        .unwrap();

    assert!(!transition.is_change());
    assert_eq!(manager.runner().count("pkgadd"), 0);
}

#[test]
fn latest_leaves_package_when_source_lacks_it() {
    let manager = sun(FakeRunner::new()
        .on("pkginfo", QUERY, Reply::Output(INSTALLED_1_0.into()))
        .on("pkginfo", SOURCE_QUERY, Reply::Fail(MISSING.into())));

    let transition = Reconciler::new(&manager)
        .plan(&wants(Ensure::Latest))
        .unwrap();

    assert_eq!(
        transition,
        Transition::Unchanged(PackageState::Present(Some("1.0".to_string())))
    );
}

#[test]
fn latest_installs_missing_package() {
    let manager = sun(FakeRunner::new()
        .on("pkginfo", QUERY, Reply::Fail(MISSING.into()))
        .on("pkgadd", PKGADD, ok()));

    let transition = Reconciler::new(&manager)
        .reconcile(&wants(Ensure::Latest))
        .unwrap();

    assert_eq!(transition, Transition::Install { available: None });
    assert_eq!(manager.runner().count("pkgrm"), 0);
}

#[test]
fn pinned_version_already_installed_is_unchanged() {
    let manager = sun(FakeRunner::new().on("pkginfo", QUERY, Reply::Output(INSTALLED_1_0.into())));

    let transition = Reconciler::new(&manager)
        .reconcile(&wants(Ensure::Version("1.0".to_string())))
        .unwrap();

    assert!(!transition.is_change());
    assert_eq!(manager.runner().programs(), vec!["pkginfo"]);
}

#[test]
fn pinned_version_offered_by_source_is_updated_to() {
    let manager = sun(FakeRunner::new()
        .on("pkginfo", QUERY, Reply::Output(INSTALLED_1_0.into()))
        .on("pkginfo", SOURCE_QUERY, Reply::Output(SOURCE_2_0.into()))
        .on("pkgrm", PKGRM, ok())
        .on("pkgadd", PKGADD, ok()));

    let transition = Reconciler::new(&manager)
        .reconcile(&wants(Ensure::Version("2.0".to_string())))
        .unwrap();

    assert!(matches!(transition, Transition::Update { .. }));
    assert_eq!(manager.runner().count("pkgrm"), 1);
    assert_eq!(manager.runner().count("pkgadd"), 1);
}

#[test]
fn pinned_version_missing_from_source_fails() {
    let manager = sun(FakeRunner::new()
        .on("pkginfo", QUERY, Reply::Fail(MISSING.into()))
        .on("pkginfo", SOURCE_QUERY, Reply::Output(SOURCE_2_0.into())));

    let err = Reconciler::new(&manager)
        .reconcile(&wants(Ensure::Version("3.0".to_string())))
        .unwrap_err();

    match err {
        SunpkgError::VersionUnavailable {
            wanted, available, ..
        } => {
            assert_eq!(wanted, "3.0");
            assert_eq!(available, "2.0");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(manager.runner().count("pkgadd"), 0);
}

#[test]
fn query_failure_is_surfaced_not_treated_as_absent() {
    let manager = sun(FakeRunner::new().on("pkginfo", QUERY, Reply::Fail("ERROR: disk full\n".into())));

    let err = Reconciler::new(&manager)
        .reconcile(&wants(Ensure::Present))
        .unwrap_err();

    assert!(matches!(err, SunpkgError::QueryFailed { .. }));
    assert_eq!(manager.runner().count("pkgadd"), 0);
}

#[test]
fn plan_never_mutates() {
    let manager = sun(FakeRunner::new().on("pkginfo", QUERY, Reply::Output(INSTALLED_1_0.into())));

    let transition = Reconciler::new(&manager)
        .plan(&wants(Ensure::Absent))
        .unwrap();

    assert!(transition.is_change());
    assert_eq!(manager.runner().programs(), vec!["pkginfo"]);
}

#[test]
fn transition_display() {
    assert_eq!(Transition::Install { available: None }.to_string(), "install");
    assert_eq!(
        Transition::Install {
            available: Some("2.0".into())
        }
        .to_string(),
        "install 2.0"
    );
    assert_eq!(Transition::Remove { installed: None }.to_string(), "remove unknown");
    assert_eq!(
        Transition::Unchanged(PackageState::Absent).to_string(),
        "unchanged (absent)"
    );
}
