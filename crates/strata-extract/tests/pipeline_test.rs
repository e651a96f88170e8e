//! End-to-end pipeline runs over snapshot inputs in a scratch directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use strata_core::config::{
    Classpath, ExtractionConfig, FactsSubset, OutputTarget, ResolutionMode,
};
use strata_core::errors::ResolveError;
use strata_core::resolve::{ResolvedProgram, Resolver, SnapshotResolver};
use strata_extract::run_pipeline;

const SNAPSHOT: &str = r#"{
  "classes": [
    {
      "name": "com.app.Main",
      "artifacts": ["app.jar"],
      "superclass": "java.lang.Object",
      "methods": [
        {
          "name": "main",
          "return_type": "void",
          "parameter_types": ["java.lang.String[]"],
          "modifiers": ["public", "static"],
          "body": {
            "locals": ["h"],
            "instructions": [
              {"opcode": "new", "operands": ["com.app.Helper"], "stores_to": "h"},
              {"opcode": "invoke", "call_target": "<com.app.Helper: void help()>"},
              {"opcode": "return"}
            ]
          }
        }
      ]
    },
    {
      "name": "com.app.Helper",
      "artifacts": ["app.jar"],
      "superclass": "java.lang.Object",
      "methods": [
        {"name": "help", "return_type": "void", "modifiers": ["public"]}
      ]
    },
    {
      "name": "lib.Util",
      "artifacts": ["lib.jar"],
      "superclass": "java.lang.Object"
    }
  ],
  "artifacts": [
    {"id": "app.jar", "kind": "input", "classes": ["com.app.Main", "com.app.Helper"]},
    {"id": "lib.jar", "kind": "platform", "classes": ["lib.Util"]}
  ],
  "properties": {
    "config.properties": {"mode": "release"}
  }
}"#;

fn write_snapshot(dir: &Path) -> PathBuf {
    let path = dir.join("program.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    path
}

fn base_config(snapshot: PathBuf, out: &Path) -> ExtractionConfig {
    ExtractionConfig {
        inputs: vec![snapshot],
        app_glob: "com.app.*".to_string(),
        output: OutputTarget::Directory(out.to_path_buf()),
        cores: Some(2),
        ..ExtractionConfig::default()
    }
}

fn read_facts(out: &Path, predicate: &str) -> String {
    std::fs::read_to_string(out.join(format!("{predicate}.facts"))).unwrap()
}

#[test]
fn full_run_writes_all_fact_families() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("facts");
    let config = base_config(write_snapshot(dir.path()), &out);

    let report = run_pipeline(&config, &SnapshotResolver::new()).unwrap();

    assert_eq!(report.facts.submitted, 3);
    assert_eq!(report.facts.failed, 0);
    assert!(report.dump.is_none());
    assert_eq!(report.provenance_rows, 3);

    // Application classes are classified by the glob and emitted sorted.
    assert_eq!(
        read_facts(&out, "ApplicationClass"),
        "com.app.Helper\ncom.app.Main\n"
    );
    assert_eq!(
        read_facts(&out, "Property"),
        "config.properties\tmode\trelease\n"
    );
    assert_eq!(read_facts(&out, "ClassArtifact").lines().count(), 3);
    assert!(read_facts(&out, "Method")
        .contains("<com.app.Main: void main(java.lang.String[])>"));
    assert!(read_facts(&out, "MethodInvocation")
        .contains("<com.app.Helper: void help()>"));
    assert!(read_facts(&out, "DirectSuperclass")
        .contains("com.app.Main\tjava.lang.Object"));
    // java.lang.Object is not in the snapshot.
    assert!(report.phantom_types > 0);
}

#[test]
fn seed_and_sensitivity_files_are_annotated() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("facts");
    let seed = dir.path().join("seed.txt");
    let sensitivity = dir.path().join("sensitivity.txt");
    std::fs::write(
        &seed,
        "<com.app.Main: void main(java.lang.String[])>\ncom.app.Helper\n<com.app.Main: int count>\n",
    )
    .unwrap();
    std::fs::write(
        &sensitivity,
        "<com.app.Helper: void help()>, 2-object\nnot a record\n",
    )
    .unwrap();

    let mut config = base_config(write_snapshot(dir.path()), &out);
    config.seed_file = Some(seed);
    config.sensitivity_file = Some(sensitivity);

    let report = run_pipeline(&config, &SnapshotResolver::new()).unwrap();
    assert_eq!(report.seed_rows, 2);
    assert_eq!(report.sensitivity_rows, 1);

    assert_eq!(
        read_facts(&out, "KeepMethod"),
        "<com.app.Main: void main(java.lang.String[])>\n"
    );
    assert_eq!(read_facts(&out, "KeepClass"), "com.app.Helper\n");
    assert_eq!(
        read_facts(&out, "SpecialContextSensitivityMethod"),
        "<com.app.Helper: void help()>\t2-object\n"
    );
}

#[test]
fn app_subset_narrows_the_class_set() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("facts");
    let mut config = base_config(write_snapshot(dir.path()), &out);
    config.facts_subset = Some(FactsSubset::App);

    let report = run_pipeline(&config, &SnapshotResolver::new()).unwrap();
    assert_eq!(report.facts.submitted, 2);

    let class_types = read_facts(&out, "ClassType");
    assert!(class_types.contains("com.app.Main"));
    assert!(!class_types.contains("lib.Util"));
}

#[test]
fn dump_wave_writes_one_file_per_class() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("facts");
    let mut config = base_config(write_snapshot(dir.path()), &out);
    config.dump = true;

    let report = run_pipeline(&config, &SnapshotResolver::new()).unwrap();
    let dump = report.dump.unwrap();
    assert_eq!(dump.submitted, 3);
    assert_eq!(dump.failed, 0);

    let text = std::fs::read_to_string(out.join("com.app.Main.ir")).unwrap();
    assert!(text.starts_with("class com.app.Main extends java.lang.Object\n"));
    assert!(out.join("lib.Util.ir").exists());
}

#[test]
fn ordered_mode_skips_dump_and_annotators() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("facts");
    let seed = dir.path().join("seed.txt");
    std::fs::write(&seed, "com.app.Helper\n").unwrap();

    let mut config = base_config(write_snapshot(dir.path()), &out);
    config.ordered_call_graph = true;
    config.dump = true;
    config.seed_file = Some(seed);

    let report = run_pipeline(&config, &SnapshotResolver::new()).unwrap();
    assert_eq!(report.facts.submitted, 3);
    assert!(report.dump.is_none());
    assert_eq!(report.seed_rows, 0);
    assert!(!out.join("KeepClass.facts").exists());

    // Call sites got ordered ids even without a synthetic entry point.
    assert!(read_facts(&out, "ReachableCallSite").ends_with("\t1\n"));
}

#[test]
fn resolver_receives_the_configured_mode() {
    struct RecordingResolver {
        seen: Mutex<Option<ResolutionMode>>,
    }

    impl Resolver for RecordingResolver {
        fn resolve(&self, classpath: &Classpath) -> Result<ResolvedProgram, ResolveError> {
            *self.seen.lock().unwrap() = Some(classpath.mode());
            Ok(ResolvedProgram::new(
                Vec::new(),
                Vec::new(),
                BTreeMap::new(),
                None,
            ))
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("facts");
    let mut config = base_config(write_snapshot(dir.path()), &out);
    config.mode = ResolutionMode::Full;

    let resolver = RecordingResolver {
        seen: Mutex::new(None),
    };
    run_pipeline(&config, &resolver).unwrap();
    assert_eq!(*resolver.seen.lock().unwrap(), Some(ResolutionMode::Full));
}

#[test]
fn missing_input_fails_before_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("facts");
    let config = base_config(dir.path().join("no-such.json"), &out);

    let err = run_pipeline(&config, &SnapshotResolver::new()).unwrap_err();
    assert!(matches!(
        err,
        strata_core::errors::PipelineError::Resolve(_)
    ));
    assert!(!out.exists());
}
