//! Test registry - every declared case, in registration order

use crate::context::Context;
use crate::error::Outcome;
use crate::fixture::{self, Fixture};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::debug;

/// Runs a case's whole lifecycle, recording failures into the context
pub type CaseFn = dyn Fn(&mut Context<'_>) + Send + Sync;

/// A named, runnable case
#[derive(Clone)]
pub struct TestCase {
    suite: String,
    name: String,
    invoke: Arc<CaseFn>,
}

impl TestCase {
    /// Register an arbitrary lifecycle closure
    pub fn new(
        suite: impl Into<String>,
        name: impl Into<String>,
        invoke: impl Fn(&mut Context<'_>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            suite: suite.into(),
            name: name.into(),
            invoke: Arc::new(invoke),
        }
    }

    /// A case without a fixture
    pub fn plain(
        suite: impl Into<String>,
        name: impl Into<String>,
        body: fn(&mut Context<'_>) -> Outcome,
    ) -> Self {
        Self::new(suite, name, move |t| fixture::run_plain(t, body))
    }

    /// A case running against a fresh `F` each time
    pub fn with_fixture<F>(
        suite: impl Into<String>,
        name: impl Into<String>,
        body: fn(&mut Context<'_>, &mut F) -> Outcome,
    ) -> Self
    where
        F: Fixture + 'static,
    {
        Self::new(suite, name, move |t| fixture::run_fixture::<F, _>(t, body))
    }

    pub fn suite(&self) -> &str {
        &self.suite
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `suite.name`, the string filters match against
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.suite, self.name)
    }

    /// Run the case from a clean state; returns `true` when it failed
    pub fn run(&self, t: &mut Context<'_>) -> bool {
        t.reset();
        (self.invoke)(t);
        t.failed()
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("suite", &self.suite)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Static registration record submitted by `tt_test!` and `tt_test_f!`
///
/// `file` and `line` locate the declaring macro call and fix the run order.
pub struct Declaration {
    pub suite: &'static str,
    pub name: &'static str,
    pub file: &'static str,
    pub line: u32,
    pub invoke: fn(&mut Context<'_>),
}

impl Declaration {
    pub const fn new(
        suite: &'static str,
        name: &'static str,
        file: &'static str,
        line: u32,
        invoke: fn(&mut Context<'_>),
    ) -> Self {
        Self {
            suite,
            name,
            file,
            line,
            invoke,
        }
    }
}

inventory::collect!(Declaration);

impl From<&Declaration> for TestCase {
    fn from(decl: &Declaration) -> Self {
        TestCase::new(decl.suite, decl.name, decl.invoke)
    }
}

/// Ordered, append-only collection of cases
#[derive(Debug, Clone, Default)]
pub struct Registry {
    cases: Vec<TestCase>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every case submitted with the declaration macros.
    ///
    /// `inventory` hands declarations back in no particular order, so they
    /// are sorted by source file, then line: declaration order within a file,
    /// files by path.
    pub fn from_declarations() -> Self {
        let mut decls = Vec::new();
        for decl in inventory::iter::<Declaration> {
            decls.push(decl);
        }
        Self::from_sorted(decls)
    }

    fn from_sorted(mut decls: Vec<&Declaration>) -> Self {
        decls.sort_by_key(|decl| (decl.file, decl.line));

        let mut registry = Self::new();
        for decl in decls {
            registry.push(TestCase::from(decl));
        }
        registry
    }

    /// Append a case. Duplicate names are accepted
    pub fn push(&mut self, case: TestCase) {
        debug!(suite = case.suite(), name = case.name(), "registered test case");
        self.cases.push(case);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Full names registered more than once, in first-seen order
    pub fn duplicates(&self) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order = Vec::new();
        for case in &self.cases {
            let full = case.full_name();
            let count = counts.entry(full.clone()).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(full);
            }
        }
        order
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

static GLOBAL: OnceLock<Mutex<Registry>> = OnceLock::new();

fn global() -> MutexGuard<'static, Registry> {
    GLOBAL
        .get_or_init(|| Mutex::new(Registry::from_declarations()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Append a case to the process-wide registry.
///
/// Must happen before `run_all_tests` starts; a running run works on the
/// snapshot it took.
pub fn register(case: TestCase) {
    global().push(case);
}

/// Copy of the process-wide registry
pub fn snapshot() -> Registry {
    global().clone()
}
