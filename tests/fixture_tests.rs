//! Data-driven conversion tests.
//!
//! Runs every case in tests/fixtures.json and reports all mismatches at once.

use serde::Deserialize;
use std::fs;
use xatena::{to_html_with_options, Options};

#[derive(Debug, Deserialize)]
struct Fixture {
    name: String,
    input: String,
    html: String,
    #[serde(default)]
    hatena_compatible: bool,
}

fn load_fixtures() -> Vec<Fixture> {
    let json = fs::read_to_string("tests/fixtures.json").expect("Failed to read tests/fixtures.json");
    serde_json::from_str(&json).expect("Failed to parse fixtures.json")
}

#[test]
fn fixtures() {
    let fixtures = load_fixtures();
    assert!(!fixtures.is_empty());

    let mut failures = Vec::new();
    for fixture in &fixtures {
        let options = Options {
            hatena_compatible: fixture.hatena_compatible,
            ..Options::default()
        };
        let output = to_html_with_options(&fixture.input, &options);
        if output != fixture.html {
            failures.push(format!(
                "{}\n  input:    {:?}\n  expected: {:?}\n  got:      {:?}",
                fixture.name, fixture.input, fixture.html, output
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} fixtures failed:\n{}",
        failures.len(),
        fixtures.len(),
        failures.join("\n")
    );
}

#[test]
fn fixture_names_are_unique() {
    let fixtures = load_fixtures();
    let mut names: Vec<_> = fixtures.iter().map(|f| f.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), fixtures.len());
}
