use std::path::Path;

use php2js::test_runner::{TestCase, TestResult, TestRunner};

#[test]
fn test_fixture_corpus_passes() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/cases");
    let runner = TestRunner::new(&dir, false);
    let summary = runner.run_all().expect("fixture run failed");

    assert!(summary.total > 0, "no fixtures discovered");
    assert_eq!(summary.failed, 0, "fixtures failed: {:?}", summary.failures);
    assert_eq!(summary.errors, 0, "fixtures errored: {:?}", summary.failures);
}

#[test]
fn test_case_parsing_requires_sections() {
    let err = TestCase::parse("--TEST--\nname\n", "x.p2jt").expect_err("parse should fail");
    assert!(err.contains("missing --FILE--"));

    let err = TestCase::parse("--FILE--\n$a;\n", "x.p2jt").expect_err("parse should fail");
    assert!(err.contains("missing --TEST--"));
}

#[test]
fn test_expectf_wildcards_match() {
    let content = "--TEST--\nwildcards\n--FILE--\necho $x;\n--EXPECTF--\nalert( %s);\n";
    let case = TestCase::parse(content, "w.p2jt").expect("parse failed");
    assert!(matches!(case.run(), TestResult::Pass));
}

#[test]
fn test_pack_section_enables_pack_mode() {
    let content = "--TEST--\npack\n--FILE--\n$a  =  1;\n--PACK--\n--EXPECT--\na = 1;\n";
    let case = TestCase::parse(content, "p.p2jt").expect("parse failed");
    assert!(case.pack);
    assert!(matches!(case.run(), TestResult::Pass));
}

#[test]
fn test_expect_error_matches_substring() {
    let content =
        "--TEST--\nerr\n--FILE--\nclass C {}\n--EXPECT_ERROR--\nForbidden construct 'class'\n";
    let case = TestCase::parse(content, "e.p2jt").expect("parse failed");
    assert!(matches!(case.run(), TestResult::Pass));
}

#[test]
fn test_skipif_short_circuits() {
    let content = "--TEST--\nskip\n--FILE--\n$a;\n--SKIPIF--\nnot today\n--EXPECT--\na;\n";
    let case = TestCase::parse(content, "s.p2jt").expect("parse failed");
    assert!(matches!(case.run(), TestResult::Skipped(_)));
}
