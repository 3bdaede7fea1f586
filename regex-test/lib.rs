/*!
Defines the TOML format used by the `regex-recursive` test suite, along with a
runner that applies those tests to the engine from within Rust unit tests.

This crate does not come with any tests itself. The corpus lives in the
`testdata` directory at the root of the repository.

# Format

The corpus is made up of zero or more TOML files. Each file contains zero or
more tests, each defined as a `[[test]]` table.

Each test has the following fields:

* `name` - A name for the test. It must be unique within its file. A test's
[`RegexTest::full_name`] is either `{group_name}/{name}` or
`{group_name}/{name}/{additional_name}`, with the latter only used when
[`TestRunner::expand`] is used. The `group_name` is the file stem (the file
name without the `.toml` suffix).
* `regex` - The pattern to test.
* `haystack` - The text to search.
* `matches` - Zero or more match values, in the order they are found by
iterating over successive non-overlapping matches. Each match value is one
of:
    * A simple span, e.g., `[5, 12]`, giving the start and end of the whole
    match in byte offsets. The start is inclusive and the end is exclusive.
    * A list of capture group spans, with the first one corresponding to the
    whole match. For example, `[[5, 10], [6, 8], [], [9, 10]]`, where `[]`
    is a group in the pattern that did not participate in the match.
* `match-limit` - An optional limit on the number of matches. When absent,
every match should be reported.
* `compiles` - Whether the pattern is expected to validate. Defaults to
`true`. A pattern that doesn't validate must also never match, so tests
with `compiles = false` must have an empty `matches`.
* `unescape` - When enabled, the haystack is unescaped. Sequences like `\x00`
are turned into their corresponding byte values. This permits writing
haystacks that contain invalid UTF-8 without embedding invalid UTF-8 into a
TOML file (which is not allowed).
* `captures-len` - An optional expected number of capture slots reported by
validation, i.e., the number of capturing groups plus one.
* `fixed-len` - An optional expected fixed match length reported by
validation. This is either an integer or the string `"variable"`.
*/

#![deny(missing_docs)]

/// For convenience, `anyhow::Error` is used to represents errors in this
/// crate.
///
/// For this reason, `anyhow` is a public dependency and is re-exported here.
pub extern crate anyhow;

use std::{borrow::Borrow, collections::HashSet, convert::TryFrom};

use {
    anyhow::{bail, Context, Result},
    bstr::{BString, ByteSlice, ByteVec},
    serde::Deserialize,
};

const ENV_REGEX_TEST: &str = "REGEX_TEST";
const ENV_REGEX_TEST_VERBOSE: &str = "REGEX_TEST_VERBOSE";

/// A collection of regex tests, gathered from one or more TOML files.
#[derive(Clone, Debug, Default)]
pub struct RegexTests {
    tests: Vec<RegexTest>,
    seen: HashSet<String>,
}

/// The top-level shape of a single TOML file.
#[derive(Deserialize)]
struct TestFile {
    /// 'default' permits an empty TOML file.
    #[serde(default, rename = "test")]
    tests: Vec<RegexTest>,
}

impl RegexTests {
    /// Create a new empty collection of regex tests.
    pub fn new() -> RegexTests {
        RegexTests::default()
    }

    /// Load all of the TOML encoded tests in `data` into this collection.
    /// Each test's full name is prefixed with the given group name.
    pub fn load_slice(&mut self, group_name: &str, data: &[u8]) -> Result<()> {
        let data = std::str::from_utf8(data)
            .with_context(|| format!("data in {group_name} is not UTF-8"))?;
        let file: TestFile = toml::from_str(data)
            .with_context(|| format!("error decoding TOML for {group_name}"))?;
        for (i, mut t) in file.tests.into_iter().enumerate() {
            if t.name.is_empty() {
                t.name = (i + 1).to_string();
            }
            t.full_name = format!("{group_name}/{}", t.name);
            if t.unescape {
                let escaped = t.haystack.to_str().with_context(|| {
                    format!("haystack of {} is not UTF-8", t.full_name)
                })?;
                t.haystack = BString::from(Vec::unescape_bytes(escaped));
            }
            if !t.compiles && !t.matches.is_empty() {
                bail!(
                    "test '{}' is expected to be rejected but expects matches",
                    t.full_name,
                );
            }
            if !self.seen.insert(t.full_name.clone()) {
                bail!("found duplicate tests for name '{}'", t.full_name);
            }
            self.tests.push(t);
        }
        Ok(())
    }

    /// Return an iterator over all regex tests, in the order in which they
    /// were loaded.
    ///
    /// This is useful to pass to [`TestRunner::test_iter`].
    pub fn iter(&self) -> std::slice::Iter<'_, RegexTest> {
        self.tests.iter()
    }
}

/// A regex test describes the inputs and expected outputs of a search.
///
/// Each `RegexTest` represents a single `[[test]]` table in a TOML test file.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegexTest {
    #[serde(default)]
    name: String,
    #[serde(skip)]
    additional_name: String,
    #[serde(skip)]
    full_name: String,
    regex: String,
    haystack: BString,
    matches: Vec<Captures>,
    #[serde(rename = "match-limit")]
    match_limit: Option<usize>,
    #[serde(default = "default_true")]
    compiles: bool,
    #[serde(default)]
    unescape: bool,
    #[serde(rename = "captures-len")]
    captures_len: Option<usize>,
    #[serde(rename = "fixed-len")]
    fixed_len: Option<FixedLen>,
}

impl RegexTest {
    /// The name of this test, as given in its `[[test]]` block, or its
    /// position in its file when it has no name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The additional name for this test.
    ///
    /// This is only non-empty when the test runner was expanded with
    /// [`TestRunner::expand`].
    pub fn additional_name(&self) -> &str {
        &self.additional_name
    }

    /// The group name, the test name and the additional name (if any),
    /// joined with a `/`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Return the pattern to search with.
    pub fn regex(&self) -> &str {
        &self.regex
    }

    /// Return the bytes that should be searched.
    pub fn haystack(&self) -> &[u8] {
        &self.haystack
    }

    /// Returns the limit on the number of matches that should be reported,
    /// if specified in the test.
    pub fn match_limit(&self) -> Option<usize> {
        self.match_limit
    }

    /// Returns true if the pattern in this test is expected to validate.
    pub fn compiles(&self) -> bool {
        self.compiles
    }

    /// Returns the number of capture slots that validation is expected to
    /// report, if the test specifies one.
    pub fn captures_len(&self) -> Option<usize> {
        self.captures_len
    }

    /// Returns the fixed length that validation is expected to report, if
    /// the test specifies one. The inner `None` means the pattern's matches
    /// are expected to vary in length.
    pub fn fixed_len(&self) -> Option<Option<usize>> {
        self.fixed_len.map(|FixedLen(len)| len)
    }

    fn with_additional_name(&self, name: &str) -> RegexTest {
        RegexTest {
            additional_name: name.to_string(),
            full_name: format!("{}/{}", self.full_name, name),
            ..self.clone()
        }
    }

    fn is_match(&self) -> bool {
        !self.matches.is_empty()
    }

    /// The span of each whole match, without any groups.
    fn spans(&self) -> Vec<Span> {
        self.matches.iter().map(|caps| caps.whole).collect()
    }
}

/// The result of preparing a pattern for testing: a closure that runs a
/// search for any [`RegexTest`] and reports a [`TestResult`].
pub struct CompiledRegex(Box<dyn FnMut(&RegexTest) -> TestResult>);

impl CompiledRegex {
    /// Wrap a closure that executes a search. The `RegexTest` given to the
    /// closure is the same one that was used to prepare it.
    pub fn compiled(
        matcher: impl FnMut(&RegexTest) -> TestResult + 'static,
    ) -> CompiledRegex {
        CompiledRegex(Box::new(matcher))
    }
}

impl std::fmt::Debug for CompiledRegex {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("CompiledRegex(...)")
    }
}

/// What a search or a validation reported for one test.
#[derive(Debug, Clone)]
pub struct TestResult(Outcome);

#[derive(Debug, Clone)]
enum Outcome {
    Matched(bool),
    Spans(Vec<Span>),
    Captures(Vec<Captures>),
    Validated { captures_len: usize, fixed_len: Option<usize> },
    Fail(String),
}

impl TestResult {
    /// Report whether any match was found.
    pub fn matched(yes: bool) -> TestResult {
        TestResult(Outcome::Matched(yes))
    }

    /// Report the span of every match found.
    pub fn matches<I: IntoIterator<Item = Span>>(it: I) -> TestResult {
        TestResult(Outcome::Spans(it.into_iter().collect()))
    }

    /// Report the capture groups of every match found.
    pub fn captures<I: IntoIterator<Item = Captures>>(it: I) -> TestResult {
        TestResult(Outcome::Captures(it.into_iter().collect()))
    }

    /// Report what validation found out about a pattern.
    ///
    /// Only the properties a test specifies are compared. A test that
    /// specifies neither always passes.
    pub fn validated(
        captures_len: usize,
        fixed_len: Option<usize>,
    ) -> TestResult {
        TestResult(Outcome::Validated { captures_len, fixed_len })
    }

    /// Fail the test for the reason given.
    pub fn fail(why: &str) -> TestResult {
        TestResult(Outcome::Fail(why.to_string()))
    }
}

/// A runner for executing regex tests from within a `#[test]` function.
///
/// Failures are collected rather than raised, so one failing test doesn't
/// hide the others. They only cause a panic when [`TestRunner::assert`] is
/// called.
///
/// Tests can be filtered with the `REGEX_TEST` environment variable. Its
/// value is a comma separated list of substrings. A substring prefixed with
/// `-` excludes every test whose full name contains it, and any other
/// substring includes them. When more than one rule applies to a test, the
/// last one wins. If there are any including rules, a test that none of
/// them match is skipped.
///
/// For example, `REGEX_TEST=captures,-captures/nested` runs every test in
/// the `captures` group except those whose name starts with `nested`.
///
/// Setting `REGEX_TEST_VERBOSE=1` prints the name of every test run.
#[derive(Debug)]
pub struct TestRunner {
    filter: Vec<Rule>,
    expanders: Vec<Expander>,
    report: Report,
}

impl TestRunner {
    /// Create a new runner, reading its filter from `REGEX_TEST`.
    pub fn new() -> Result<TestRunner> {
        let mut runner = TestRunner {
            filter: vec![],
            expanders: vec![],
            report: Report::default(),
        };
        for substring in read_env(ENV_REGEX_TEST)?.split(',') {
            let substring = substring.trim();
            if substring.is_empty() {
                continue;
            }
            let (exclude, substring) = match substring.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, substring),
            };
            runner.filter.push(Rule { exclude, substring: substring.into() });
        }
        Ok(runner)
    }

    /// Panics with a report of every failure, if there were any.
    pub fn assert(&mut self) {
        self.report.assert();
    }

    /// Skip every test whose full name contains `substring`, unless a later
    /// `REGEX_TEST` rule includes it again.
    pub fn blacklist(&mut self, substring: &str) -> &mut TestRunner {
        let rule = Rule { exclude: true, substring: substring.into() };
        self.filter.insert(0, rule);
        self
    }

    /// Runs one copy of every test for which `predicate` returns true per
    /// entry in `additional_names`. Each copy has the entry appended to its
    /// name and available via [`RegexTest::additional_name`], so that the
    /// compiler given to `test_iter` can pick which API to exercise.
    ///
    /// Only the first expander whose predicate matches a test applies.
    pub fn expand<S: AsRef<str>>(
        &mut self,
        additional_names: &[S],
        predicate: impl FnMut(&RegexTest) -> bool + 'static,
    ) -> &mut TestRunner {
        self.expanders.push(Expander {
            predicate: Box::new(predicate),
            names: additional_names
                .iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
        });
        self
    }

    /// Run all of the given tests.
    ///
    /// `compile` is given each test and its pattern, and returns either a
    /// [`CompiledRegex`] that searches with the pattern or an error when
    /// the pattern is rejected.
    pub fn test_iter<I, T>(
        &mut self,
        it: I,
        mut compile: impl FnMut(&RegexTest, &str) -> Result<CompiledRegex>,
    ) -> &mut TestRunner
    where
        I: IntoIterator<Item = T>,
        T: Borrow<RegexTest>,
    {
        for test in it {
            let test = test.borrow();
            let copies = match self
                .expanders
                .iter_mut()
                .find_map(|e| if (e.predicate)(test) { Some(e) } else { None })
            {
                None => vec![test.clone()],
                Some(e) => e
                    .names
                    .iter()
                    .map(|name| test.with_additional_name(name))
                    .collect(),
            };
            for test in copies.iter() {
                if self.is_filtered(test) {
                    self.report.skipped.push(test.full_name.clone());
                } else {
                    self.run(test, &mut compile);
                }
            }
        }
        self
    }

    fn run(
        &mut self,
        test: &RegexTest,
        compile: &mut impl FnMut(&RegexTest, &str) -> Result<CompiledRegex>,
    ) {
        let mut compiled = match catch(|| compile(test, test.regex())) {
            Err(msg) => {
                let kind = FailureKind::Panic { during: "compiling", msg };
                return self.report.fail(test, kind);
            }
            Ok(Err(err)) if test.compiles() => {
                return self.report.fail(test, FailureKind::Rejected(err));
            }
            Ok(Err(_)) => return self.report.pass(test),
            Ok(Ok(compiled)) => compiled,
        };
        if !test.compiles() {
            return self.report.fail(test, FailureKind::NotRejected);
        }
        let outcome = match catch(|| (compiled.0)(test)) {
            Ok(TestResult(outcome)) => outcome,
            Err(msg) => {
                let kind = FailureKind::Panic { during: "searching", msg };
                return self.report.fail(test, kind);
            }
        };
        let failure = match outcome {
            Outcome::Matched(yes) if yes != test.is_match() => {
                Some(FailureKind::IsMatch)
            }
            Outcome::Spans(got) if got != test.spans() => {
                Some(FailureKind::Spans(got))
            }
            Outcome::Captures(got) if got != test.matches => {
                Some(FailureKind::Captures(got))
            }
            Outcome::Validated { captures_len, fixed_len }
                if test.captures_len().map_or(false, |n| n != captures_len)
                    || test.fixed_len().map_or(false, |n| n != fixed_len) =>
            {
                Some(FailureKind::Validated { captures_len, fixed_len })
            }
            Outcome::Fail(why) => Some(FailureKind::User(why)),
            _ => None,
        };
        match failure {
            None => self.report.pass(test),
            Some(kind) => self.report.fail(test, kind),
        }
    }

    fn is_filtered(&self, test: &RegexTest) -> bool {
        let mut skip = self.filter.iter().any(|rule| !rule.exclude);
        for rule in self.filter.iter() {
            if test.full_name.as_bytes().contains_str(&rule.substring) {
                skip = rule.exclude;
            }
        }
        skip
    }
}

#[derive(Debug)]
struct Rule {
    exclude: bool,
    substring: BString,
}

struct Expander {
    predicate: Box<dyn FnMut(&RegexTest) -> bool>,
    names: Vec<String>,
}

impl std::fmt::Debug for Expander {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Expander").field("names", &self.names).finish()
    }
}

/// The names of the tests that passed or were skipped, and every failure.
#[derive(Debug, Default)]
struct Report {
    passed: Vec<String>,
    skipped: Vec<String>,
    failures: Vec<Failure>,
}

impl Report {
    fn pass(&mut self, test: &RegexTest) {
        self.passed.push(test.full_name.clone());
    }

    fn fail(&mut self, test: &RegexTest, kind: FailureKind) {
        self.failures.push(Failure { test: test.clone(), kind });
    }

    fn assert(&self) {
        let rule = "~".repeat(79);
        if read_env(ENV_REGEX_TEST_VERBOSE).map_or(false, |s| s == "1") {
            println!("{rule}");
            for name in self.skipped.iter() {
                println!("skip: {name}");
            }
            for name in self.passed.iter() {
                println!("pass: {name}");
            }
            for f in self.failures.iter() {
                println!("FAIL: {}", f.test.full_name);
            }
            println!(
                "\npassed: {}, skipped: {}, failed: {}\n{rule}",
                self.passed.len(),
                self.skipped.len(),
                self.failures.len(),
            );
        }
        if self.failures.is_empty() {
            return;
        }
        let failures = self
            .failures
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<String>>()
            .join("\n\n");
        panic!(
            "found {} failures:\n{rule}\n{failures}\n{rule}\n\n\
             Set the REGEX_TEST environment variable to filter tests, \n\
             e.g., REGEX_TEST=foo,-foo2 runs every test whose name contains \n\
             foo but not foo2\n\n",
            self.failures.len(),
        )
    }
}

#[derive(Debug)]
struct Failure {
    test: RegexTest,
    kind: FailureKind,
}

#[derive(Debug)]
enum FailureKind {
    /// The compiled closure failed the test itself.
    User(String),
    IsMatch,
    Spans(Vec<Span>),
    Captures(Vec<Captures>),
    Validated { captures_len: usize, fixed_len: Option<usize> },
    /// The pattern was expected to be rejected, but it validated.
    NotRejected,
    /// The pattern was expected to validate, but it was rejected.
    Rejected(anyhow::Error),
    Panic { during: &'static str, msg: String },
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let t = &self.test;
        write!(f, "{}: ", t.full_name)?;
        match self.kind {
            FailureKind::User(ref why) => {
                write!(f, "failed by implementor because: {why}")?
            }
            FailureKind::IsMatch if t.is_match() => {
                write!(f, "expected match, but none found")?
            }
            FailureKind::IsMatch => {
                write!(f, "expected no match, but found a match")?
            }
            FailureKind::Spans(ref got) => write!(
                f,
                "did not find expected matches\n\
                 expected: {:?}\n     \
                 got: {:?}",
                t.spans(),
                got,
            )?,
            FailureKind::Captures(ref got) => write!(
                f,
                "expected to find {:?} captures, but got {:?}",
                t.matches, got,
            )?,
            FailureKind::Validated { captures_len, fixed_len } => write!(
                f,
                "expected validation to report captures-len {:?} and \
                 fixed-len {:?}, but got {:?} and {:?}",
                t.captures_len(),
                t.fixed_len(),
                captures_len,
                fixed_len,
            )?,
            FailureKind::NotRejected => {
                write!(f, "expected pattern to be rejected, but it wasn't")?
            }
            FailureKind::Rejected(ref err) => {
                write!(f, "expected pattern to validate, failed: {err}")?
            }
            FailureKind::Panic { during, ref msg } => {
                write!(f, "got unexpected panic while {during}:\n{msg}")?
            }
        }
        write!(
            f,
            "\npattern:     {:?}\nhaystack:    {:?}",
            t.regex,
            t.haystack.as_bstr(),
        )
    }
}

/// The capture groups of a single match.
///
/// The whole match is always present. Groups are only compared when a test
/// lists them.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "Vec<MaybeSpan>")]
pub struct Captures {
    whole: Span,
    groups: Vec<Option<Span>>,
}

impl Captures {
    /// Create the captures of a single match from every capture slot,
    /// starting with the slot for the whole match. Groups that did not
    /// participate in the match are `None`.
    ///
    /// This returns an error if there are no slots or the first one is
    /// `None`.
    pub fn new<I: IntoIterator<Item = Option<Span>>>(
        it: I,
    ) -> Result<Captures> {
        let mut it = it.into_iter();
        let whole = match it.next() {
            Some(Some(whole)) => whole,
            Some(None) => bail!("the whole match (group 0) must be present"),
            None => bail!("captures must contain at least one group"),
        };
        Ok(Captures { whole, groups: it.collect() })
    }
}

/// A match is spelled either as a single span, `[5, 12]`, or as a list of
/// group spans, `[[5, 12], [], [6, 8]]`. Both deserialize as a list whose
/// elements are either numbers or spans.
#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeSpan {
    Offset(usize),
    Span(Vec<usize>),
}

impl TryFrom<Vec<MaybeSpan>> for Captures {
    type Error = anyhow::Error;

    fn try_from(items: Vec<MaybeSpan>) -> Result<Captures> {
        if let [MaybeSpan::Offset(start), MaybeSpan::Offset(end)] = items[..] {
            return Captures::new([Some(Span { start, end })]);
        }
        let spans = items
            .into_iter()
            .map(|item| match item {
                MaybeSpan::Span(v) if v.is_empty() => Ok(None),
                MaybeSpan::Span(v) if v.len() == 2 => {
                    Ok(Some(Span { start: v[0], end: v[1] }))
                }
                _ => bail!("a group must be spelled [] or [start, end]"),
            })
            .collect::<Result<Vec<Option<Span>>>>()?;
        Captures::new(spans)
    }
}

/// A span of contiguous bytes, from start to end, represented via byte
/// offsets.
///
/// The range is inclusive at the beginning and exclusive at the end.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Span {
    /// The starting byte offset of the match.
    pub start: usize,
    /// The ending byte offset of the match.
    pub end: usize,
}

impl std::fmt::Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

/// The `fixed-len` field: either a length or the string `"variable"`.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(try_from = "toml::Value")]
struct FixedLen(Option<usize>);

impl TryFrom<toml::Value> for FixedLen {
    type Error = anyhow::Error;

    fn try_from(value: toml::Value) -> Result<FixedLen> {
        match value {
            toml::Value::Integer(len) => {
                let len = usize::try_from(len)
                    .with_context(|| format!("invalid fixed-len {len}"))?;
                Ok(FixedLen(Some(len)))
            }
            toml::Value::String(s) if s == "variable" => Ok(FixedLen(None)),
            v => {
                bail!("fixed-len must be an integer or 'variable', got {v:?}")
            }
        }
    }
}

/// Read the environment variable given, or an empty string if it isn't set.
fn read_env(var: &str) -> Result<String> {
    match std::env::var_os(var) {
        None => Ok(String::new()),
        Some(val) => val.into_string().map_err(|os| {
            anyhow::anyhow!(
                "invalid UTF-8 in env var {}={:?}",
                var,
                Vec::from_os_str_lossy(&os)
            )
        }),
    }
}

/// Runs the given closure, converting a panic into its message.
fn catch<T>(fun: impl FnOnce() -> T) -> Result<T, String> {
    use std::panic;

    panic::catch_unwind(panic::AssertUnwindSafe(fun)).map_err(|err| {
        // panic and assert produce &str or String
        if let Some(&s) = err.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else {
            "UNABLE TO SHOW RESULT OF PANIC.".to_string()
        }
    })
}

/// Serde needs a path to a function for a default of 'true'.
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(data: &str) -> Result<RegexTests> {
        let mut tests = RegexTests::new();
        tests.load_slice("test", data.as_bytes())?;
        Ok(tests)
    }

    fn span(start: usize, end: usize) -> Option<Span> {
        Some(Span { start, end })
    }

    #[test]
    fn err_missing_fields() {
        let no_regex = r#"
[[test]]
haystack = "lib.rs"
matches = []
"#;
        assert!(load(no_regex).is_err());

        let no_matches = r#"
[[test]]
regex = ".*.rs"
haystack = "lib.rs"
"#;
        assert!(load(no_matches).is_err());
    }

    #[test]
    fn err_unknown_field() {
        let data = r#"
[[test]]
regex = ".*.rs"
haystack = "lib.rs"
matches = []
case-insensitive = true
"#;
        assert!(load(data).is_err());
    }

    #[test]
    fn err_duplicate_name() {
        let data = r#"
[[test]]
name = "foo"
regex = "a"
haystack = "a"
matches = [[0, 1]]

[[test]]
name = "foo"
regex = "b"
haystack = "b"
matches = [[0, 1]]
"#;
        assert!(load(data).is_err());
    }

    #[test]
    fn err_rejected_with_matches() {
        let data = r#"
[[test]]
regex = "a{"
haystack = "a{"
matches = [[0, 2]]
compiles = false
"#;
        assert!(load(data).is_err());
    }

    #[test]
    fn load_match() {
        let data = r#"
[[test]]
name = "foo"
regex = '\d+'
haystack = '\xFF12'
matches = [[1, 3]]
match-limit = 1
unescape = true
captures-len = 1
fixed-len = "variable"
"#;
        let tests = load(data).unwrap();
        let t0 = &tests.tests[0];
        assert_eq!("foo", t0.name());
        assert_eq!("test/foo", t0.full_name());
        assert_eq!(r"\d+", t0.regex());
        assert_eq!(b"\xFF12", t0.haystack());
        assert!(t0.is_match());
        assert!(t0.compiles());
        assert_eq!(Some(1), t0.match_limit());
        assert_eq!(Some(1), t0.captures_len());
        assert_eq!(Some(None), t0.fixed_len());
        assert_eq!(vec![Span { start: 1, end: 3 }], t0.spans());
    }

    #[test]
    fn load_defaults() {
        let data = r#"
[[test]]
regex = "abc"
haystack = "abc"
matches = []
fixed-len = 3
"#;
        let tests = load(data).unwrap();
        let t0 = &tests.tests[0];
        assert_eq!("1", t0.name());
        assert!(!t0.is_match());
        assert_eq!(None, t0.match_limit());
        assert_eq!(None, t0.captures_len());
        assert_eq!(Some(Some(3)), t0.fixed_len());
    }

    #[test]
    fn err_fixed_len_name() {
        let data = r#"
[[test]]
regex = "abc"
haystack = "abc"
matches = []
fixed-len = "fixed"
"#;
        assert!(load(data).is_err());
    }

    #[test]
    fn load_capture_spans() {
        let data = r#"
[[test]]
regex = "(a)|(b)"
haystack = "ab"
matches = [
  [[0, 1], [0, 1], []],
  [[1, 2], [], [1, 2]],
]
"#;
        let tests = load(data).unwrap();
        let t0 = &tests.tests[0];
        assert_eq!(
            vec![Span { start: 0, end: 1 }, Span { start: 1, end: 2 }],
            t0.spans(),
        );
        let expected = vec![
            Captures::new(vec![span(0, 1), span(0, 1), None]).unwrap(),
            Captures::new(vec![span(1, 2), None, span(1, 2)]).unwrap(),
        ];
        assert_eq!(expected, t0.matches);
    }

    #[test]
    fn err_missing_whole_match() {
        let data = r#"
[[test]]
regex = ".*.rs"
haystack = "lib.rs"
matches = [
  [[], [0, 2]],
]
"#;
        assert!(load(data).is_err());
    }

    #[test]
    fn runner_filters() {
        let data = r#"
[[test]]
name = "keep"
regex = "a"
haystack = "a"
matches = [[0, 1]]

[[test]]
name = "drop"
regex = "a"
haystack = "b"
matches = [[0, 1]]
"#;
        let tests = load(data).unwrap();
        let mut runner = TestRunner {
            filter: vec![],
            expanders: vec![],
            report: Report::default(),
        };
        runner.blacklist("drop").test_iter(tests.iter(), |_, _| {
            Ok(CompiledRegex::compiled(|t| {
                TestResult::matched(t.haystack() == b"a")
            }))
        });
        assert_eq!(vec!["test/keep".to_string()], runner.report.passed);
        assert_eq!(vec!["test/drop".to_string()], runner.report.skipped);
        assert!(runner.report.failures.is_empty());
    }

    #[test]
    fn runner_expands() {
        let data = r#"
[[test]]
name = "x"
regex = "a"
haystack = "a"
matches = [[0, 1]]
"#;
        let tests = load(data).unwrap();
        let mut runner = TestRunner {
            filter: vec![],
            expanders: vec![],
            report: Report::default(),
        };
        runner
            .expand(&["one", "two"], |t| t.compiles())
            .test_iter(tests.iter(), |_, _| {
                Ok(CompiledRegex::compiled(|t| match t.additional_name() {
                    "one" => TestResult::matched(true),
                    _ => TestResult::fail("wrong"),
                }))
            });
        assert_eq!(vec!["test/x/one".to_string()], runner.report.passed);
        assert_eq!(1, runner.report.failures.len());
    }
}
