//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use std::path::PathBuf;
use std::sync::LazyLock as Lazy;

use frrconf_isis::apply::ApplyOptions;
use frrconf_isis::generate::FrrTemplates;
use frrconf_isis::pipeline::{self, BASE_PATH};
use frrconf_utils::session::stub::RecordingSession;
use frrconf_utils::tree::ConfigTree;

// Environment variable that controls if the test data needs to be updated or
// verified.
static UPDATE_OUTPUTS: Lazy<bool> =
    Lazy::new(|| std::env::var("FRRCONF_UPDATE_TEST_OUTPUTS").is_ok());

//
// Helper functions.
//

// Runs the full pipeline for one test case.
//
// Each case directory holds the desired configuration document
// (`input.json`), the daemon's running configuration (`running.conf`) and the
// document expected to be committed (`output.conf`).
fn run_test(name: &str, commits: usize) {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/conformance/cases")
        .join(name);
    let read = |file: &str| {
        std::fs::read_to_string(dir.join(file))
            .unwrap_or_else(|error| panic!("{name}/{file}: {error}"))
    };

    let document = serde_json::from_str(&read("input.json")).unwrap();
    let tree = ConfigTree::from_document(document, BASE_PATH);
    let mut session = RecordingSession::new("isisd", &read("running.conf"));
    pipeline::run(&tree, &FrrTemplates, &mut session, &ApplyOptions::default())
        .unwrap();

    assert_eq!(session.commits.len(), commits);
    let actual = session.commits.last().cloned().unwrap_or_default();
    if *UPDATE_OUTPUTS {
        std::fs::write(dir.join("output.conf"), &actual).unwrap();
        return;
    }
    assert_eq!(read("output.conf"), actual);
}

//
// Tests.
//

// Input:
//  * New instance "FOO" replacing instance "OLD", anchors present
// Output:
//  * Previous interface and instance sections removed, new block inserted
//    before the first prefix-list
#[test]
fn replace_instance1() {
    run_test("replace-instance1", 1);
}

// Input:
//  * Instance "CORE" with most options set, replacing instance "OLD", no
//    anchors present
// Output:
//  * New block inserted before the trailing "end"
#[test]
fn replace_instance2() {
    run_test("replace-instance2", 1);
}

// Input:
//  * No IS-IS configuration left
// Output:
//  * Interface and instance sections removed, five commits issued
#[test]
fn remove_instance1() {
    run_test("remove-instance1", 5);
}
