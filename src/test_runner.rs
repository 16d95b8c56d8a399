use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::translator::Translator;

/// What a `.p2jt` fixture expects its translation to produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// Exact output, compared after trimming and newline normalization.
    Exact(String),
    /// Output matched against a pattern with `%s`/`%d`/`%w`/`%a` wildcards.
    Pattern(String),
    /// Translation must fail, and the error display must contain this text.
    Failure(String),
}

/// One parsed `.p2jt` fixture.
///
/// The file format mirrors PHP's `.phpt` layout: `--SECTION--` headers
/// followed by the section body. `--FILE--` holds the PHP source,
/// `--PACK--` turns on pack mode, and exactly one of `--EXPECT--`,
/// `--EXPECTF--` or `--EXPECT_ERROR--` states the expected result.
#[derive(Debug)]
pub struct TestCase {
    pub name: String,
    pub description: String,
    pub path: String,
    pub source: String,
    pub pack: bool,
    pub expectation: Expectation,
    pub skip: Option<String>,
}

#[derive(Debug)]
pub enum TestResult {
    Pass,
    Fail { expected: String, actual: String },
    Error(String),
    Skipped(String),
}

impl TestCase {
    pub fn parse(content: &str, path: &str) -> Result<Self, String> {
        let mut sections: Vec<(String, String)> = Vec::new();
        for line in content.lines() {
            if line.len() > 4 && line.starts_with("--") && line.ends_with("--") {
                sections.push((line.trim_matches('-').to_string(), String::new()));
            } else if let Some((_, body)) = sections.last_mut() {
                if !body.is_empty() {
                    body.push('\n');
                }
                body.push_str(line);
            }
        }

        let mut name = String::new();
        let mut description = String::new();
        let mut source = String::new();
        let mut pack = false;
        let mut skip = None;
        let mut expected = None;
        let mut wildcard = false;
        let mut expected_error = None;

        for (section, body) in sections {
            let body = body.trim().to_string();
            match section.as_str() {
                "TEST" => name = body,
                "DESCRIPTION" => description = body,
                "FILE" => source = body,
                "PACK" => pack = true,
                "EXPECT" => expected = Some(body),
                "EXPECTF" => {
                    expected = Some(body);
                    wildcard = true;
                }
                "EXPECT_ERROR" => expected_error = Some(body),
                "SKIPIF" => skip = Some(body),
                // Unknown sections are ignored for forward compatibility
                _ => {}
            }
        }

        if name.is_empty() {
            return Err(format!("Test file {} is missing --TEST-- section", path));
        }
        if source.is_empty() {
            return Err(format!("Test file {} is missing --FILE-- section", path));
        }
        let expectation = match (expected, expected_error) {
            (_, Some(needle)) => Expectation::Failure(needle),
            (Some(text), None) if wildcard => Expectation::Pattern(text),
            (Some(text), None) => Expectation::Exact(text),
            (None, None) => {
                return Err(format!(
                    "Test file {} is missing --EXPECT-- or --EXPECTF-- or --EXPECT_ERROR-- section",
                    path
                ));
            }
        };

        Ok(TestCase {
            name,
            description,
            path: path.to_string(),
            source,
            pack,
            expectation,
            skip,
        })
    }

    pub fn run(&self) -> TestResult {
        if let Some(reason) = &self.skip {
            return TestResult::Skipped(reason.clone());
        }

        let outcome = Translator::new()
            .translate_source(&self.source, self.pack)
            .map_err(|e| e.to_string());

        match (&self.expectation, outcome) {
            (Expectation::Failure(needle), Err(error)) => {
                if error.contains(needle.as_str()) {
                    TestResult::Pass
                } else {
                    TestResult::Fail {
                        expected: needle.clone(),
                        actual: error,
                    }
                }
            }
            (Expectation::Failure(needle), Ok(output)) => TestResult::Fail {
                expected: format!("Error: {}", needle),
                actual: output,
            },
            (_, Err(error)) => TestResult::Error(error),
            (Expectation::Exact(expected), Ok(output)) => {
                if normalize(&output) == normalize(expected) {
                    TestResult::Pass
                } else {
                    TestResult::Fail {
                        expected: expected.clone(),
                        actual: output,
                    }
                }
            }
            (Expectation::Pattern(pattern), Ok(output)) => match wildcard_regex(pattern) {
                Ok(re) if re.is_match(&normalize(&output)) => TestResult::Pass,
                Ok(_) => TestResult::Fail {
                    expected: pattern.clone(),
                    actual: output,
                },
                Err(e) => TestResult::Error(e),
            },
        }
    }
}

/// Line endings and outer whitespace never decide a fixture.
fn normalize(text: &str) -> String {
    text.trim().replace("\r\n", "\n")
}

/// Compiles an `--EXPECTF--` body to a regex. Wildcards: `%s` the rest of
/// a line, `%d` digits, `%w` optional whitespace, `%a` anything at all.
fn wildcard_regex(pattern: &str) -> Result<Regex, String> {
    let escaped = regex::escape(&normalize(pattern))
        .replace("%s", "[^\n]+")
        .replace("%d", r"\d+")
        .replace("%w", r"\s*")
        .replace("%a", "(?s:.+)");
    Regex::new(&format!("^{}$", escaped)).map_err(|e| format!("invalid EXPECTF pattern: {}", e))
}

/// Discovers and runs a tree of `.p2jt` fixtures, printing progress the
/// usual way: one dot per pass, `F`/`E`/`S` otherwise, details at the end.
pub struct TestRunner {
    root: PathBuf,
    verbose: bool,
}

#[derive(Debug)]
pub struct Failure {
    pub name: String,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Default)]
pub struct TestSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub skipped: usize,
    pub failures: Vec<Failure>,
}

impl TestRunner {
    pub fn new(root: &Path, verbose: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            verbose,
        }
    }

    /// Collects every `.p2jt` file under the root, sorted for stable runs.
    /// The root may also name a single fixture file directly.
    pub fn discover(&self) -> Result<Vec<PathBuf>, String> {
        if self.root.is_file() {
            return if is_fixture(&self.root) {
                Ok(vec![self.root.clone()])
            } else {
                Err(format!("File must have .p2jt extension: {:?}", self.root))
            };
        }
        if !self.root.is_dir() {
            return Err(format!("Path does not exist: {:?}", self.root));
        }

        let mut found = Vec::new();
        collect_fixtures(&self.root, &mut found)?;
        found.sort();
        Ok(found)
    }

    pub fn run_all(&self) -> Result<TestSummary, String> {
        let tests = self.discover()?;
        let mut summary = TestSummary::default();

        if tests.is_empty() {
            println!("No fixtures found in {:?}", self.root);
            return Ok(summary);
        }

        println!("Running {} fixtures...\n", tests.len());

        for path in &tests {
            summary.total += 1;
            let label = self.display_name(path);
            let content = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read test file {:?}: {}", path, e))?;

            match TestCase::parse(&content, &label) {
                Ok(case) => self.record(&mut summary, &case, case.run()),
                Err(e) => {
                    summary.errors += 1;
                    self.report("\x1b[31m", "ERROR", "E", &label, Some(&e));
                    summary.failures.push(Failure {
                        name: label,
                        expected: "a parseable fixture".to_string(),
                        actual: e,
                    });
                }
            }
        }

        if !self.verbose {
            println!();
        }

        println!();
        self.print_summary(&summary);

        Ok(summary)
    }

    fn record(&self, summary: &mut TestSummary, case: &TestCase, result: TestResult) {
        match result {
            TestResult::Pass => {
                summary.passed += 1;
                self.report("\x1b[32m", "PASS", ".", &case.name, None);
            }
            TestResult::Fail { expected, actual } => {
                summary.failed += 1;
                let detail = (!case.description.is_empty()).then_some(case.description.as_str());
                self.report("\x1b[31m", "FAIL", "F", &case.name, detail);
                summary.failures.push(Failure {
                    name: format!("{} ({})", case.name, case.path),
                    expected,
                    actual,
                });
            }
            TestResult::Error(error) => {
                summary.errors += 1;
                self.report("\x1b[31m", "ERROR", "E", &case.name, Some(&error));
                summary.failures.push(Failure {
                    name: format!("{} ({})", case.name, case.path),
                    expected: "a clean translation".to_string(),
                    actual: error,
                });
            }
            TestResult::Skipped(reason) => {
                summary.skipped += 1;
                self.report("\x1b[33m", "SKIP", "S", &case.name, Some(&reason));
            }
        }
    }

    fn report(&self, color: &str, word: &str, mark: &str, name: &str, detail: Option<&str>) {
        if !self.verbose {
            print!("{}{}\x1b[0m", color, mark);
            return;
        }
        match detail {
            Some(detail) => println!("  {}{}\x1b[0m {}: {}", color, word, name, detail),
            None => println!("  {}{}\x1b[0m {}", color, word, name),
        }
    }

    fn print_summary(&self, summary: &TestSummary) {
        if !summary.failures.is_empty() {
            println!("\n\x1b[31mFailures:\x1b[0m\n");
            for (i, failure) in summary.failures.iter().enumerate() {
                println!("{}. {}", i + 1, failure.name);
                println!("   Expected:\n   {}", failure.expected.replace('\n', "\n   "));
                println!("   Actual:\n   {}", failure.actual.replace('\n', "\n   "));
                println!();
            }
        }

        let color = if summary.failed > 0 || summary.errors > 0 {
            "\x1b[31m"
        } else if summary.skipped > 0 {
            "\x1b[33m"
        } else {
            "\x1b[32m"
        };
        println!(
            "{}Tests: {} total, {} passed, {} failed, {} errors, {} skipped\x1b[0m",
            color, summary.total, summary.passed, summary.failed, summary.errors, summary.skipped
        );
    }

    /// Name shown for a fixture: relative to the root directory, or the
    /// bare file name when the runner points at a single file.
    fn display_name(&self, path: &Path) -> String {
        if self.root.is_file() {
            return path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
        }
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

fn is_fixture(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "p2jt")
}

fn collect_fixtures(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("Failed to read directory {:?}: {}", dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();
        if path.is_dir() {
            collect_fixtures(&path, found)?;
        } else if is_fixture(&path) {
            found.push(path);
        }
    }
    Ok(())
}
