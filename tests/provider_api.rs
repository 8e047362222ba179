use std::path::Path;
use std::sync::Mutex;
use sunpkg::backends::parsers::parse_pkginfo;
use sunpkg::backends::{CommandRunner, ToolPaths};
use sunpkg::core::types::{Attribute, DesiredState, Ensure, QueryResult};
use sunpkg::core::{Reconciler, Transition};
use sunpkg::error::{Result, SunpkgError};
use sunpkg::packages::{PackageManager, SunManager};

const LISTING: &str = "   PKGINST:  SUNWcurl
      NAME:  curl - command line URL tool
  CATEGORY:  system
      ARCH:  i386
   VERSION:  7.21.0,REV=2011.03.01
   BASEDIR:  /
    VENDOR:  Oracle Corporation
      DESC:  curl: transfer a URL
    STATUS:  completely installed

   PKGINST:  SUNWzlib
  CATEGORY:  system
      ARCH:  i386
   VERSION:  1.2.3,REV=2010.01.01
";

/// Answers pkginfo from a fixed listing and remembers what was run.
struct Recorder {
    calls: Mutex<Vec<String>>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for Recorder {
    fn execute(&self, program: &Path, args: &[String], _fail_on_nonzero: bool) -> Result<String> {
        let tool = program.file_name().unwrap().to_string_lossy().to_string();
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", tool, args.join(" ")));

        match (tool.as_str(), args.last().map(String::as_str)) {
            ("pkginfo", Some("-l")) => Ok(LISTING.to_string()),
            ("pkginfo", Some("SUNWcurl")) => Ok(LISTING.split("\n\n").next().unwrap().to_string()),
            ("pkginfo", Some(name)) => Ok(format!("ERROR: information for \"{}\" was not found\n", name)),
            _ => Ok(String::new()),
        }
    }
}

#[test]
fn parses_listing_into_blocks() {
    let blocks = parse_pkginfo(LISTING);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0]["DESC"], "curl: transfer a URL");
    assert_eq!(blocks[1]["VERSION"], "1.2.3,REV=2010.01.01");
}

#[test]
fn inventory_maps_attributes() {
    let manager = SunManager::new(ToolPaths::default(), Recorder::new());

    let records = manager.instances().unwrap();

    assert_eq!(records.len(), 2);
    let curl = &records[0];
    assert_eq!(curl.name(), "SUNWcurl");
    assert_eq!(curl.version(), Some("7.21.0,REV=2011.03.01"));
    assert_eq!(curl.get(Attribute::Root), Some("/"));
    assert_eq!(curl.get(Attribute::Platform), Some("i386"));
    assert_eq!(curl.provider(), Some("sun"));
    // STATUS and NAME have no canonical attribute
    assert_eq!(curl.attributes().len(), 7);
}

#[test]
fn single_query_distinguishes_found_and_absent() {
    let manager = SunManager::new(ToolPaths::default(), Recorder::new());

    assert!(matches!(
        manager.info("SUNWcurl", None).unwrap(),
        QueryResult::Found(_)
    ));
    assert_eq!(manager.info("SUNWfoo", None).unwrap(), QueryResult::Absent);
}

#[test]
fn reconciler_removes_through_public_api() {
    let manager = SunManager::new(ToolPaths::default(), Recorder::new());
    let desired = DesiredState::new("SUNWcurl", Ensure::Absent).with_adminfile("/etc/admin");

    let transition = Reconciler::new(&manager).reconcile(&desired).unwrap();

    assert_eq!(
        transition,
        Transition::Remove {
            installed: Some("7.21.0,REV=2011.03.01".to_string())
        }
    );
    assert_eq!(
        manager_calls(&manager),
        vec!["pkginfo -l SUNWcurl", "pkgrm -a /etc/admin -n SUNWcurl"]
    );
}

#[test]
fn missing_source_is_a_config_error() {
    let manager = SunManager::new(ToolPaths::default(), Recorder::new());
    let desired = DesiredState::new("SUNWfoo", Ensure::Latest);

    let err = Reconciler::new(&manager).reconcile(&desired).unwrap_err();
    assert!(matches!(err, SunpkgError::ConfigError(_)));
}

fn manager_calls(manager: &SunManager<Recorder>) -> Vec<String> {
    manager.runner().calls()
}
