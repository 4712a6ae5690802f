//! Framework de self-test do driver
//!
//! Suites rodam no carregamento do driver (feature `self_test`) e também
//! sob `cargo test`, onde o resumo é conferido diretamente.

/// Resultado de teste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

/// Um caso de teste
pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
}

impl TestCase {
    pub const fn new(name: &'static str, func: fn() -> TestResult) -> Self {
        Self { name, func }
    }
}

/// Resumo de uma suite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SuiteSummary {
    pub fn ok(&self) -> bool {
        self.failed == 0
    }
}

/// Executa suite de testes
pub fn run_test_suite(name: &str, tests: &[TestCase]) -> SuiteSummary {
    crate::kinfo!("=== Executando suite: ", name);

    let mut summary = SuiteSummary::default();

    for test in tests {
        match (test.func)() {
            TestResult::Pass => {
                crate::kok!(test.name);
                summary.passed += 1;
            }
            TestResult::Fail => {
                crate::kfail!(test.name);
                summary.failed += 1;
            }
            TestResult::Skip => {
                crate::kwarn!("[SKIP] ", test.name);
                summary.skipped += 1;
            }
        }
    }

    crate::kinfo!(
        "Resultados: passed=",
        crate::core::logging::Dec(summary.passed as u64),
        " failed=",
        crate::core::logging::Dec(summary.failed as u64)
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_pass() -> TestResult {
        TestResult::Pass
    }

    fn always_fail() -> TestResult {
        TestResult::Fail
    }

    fn always_skip() -> TestResult {
        TestResult::Skip
    }

    #[test]
    fn test_summary_counts() {
        const CASES: &[TestCase] = &[
            TestCase::new("pass", always_pass),
            TestCase::new("fail", always_fail),
            TestCase::new("skip", always_skip),
        ];
        let summary = run_test_suite("meta", CASES);
        assert_eq!(
            summary,
            SuiteSummary {
                passed: 1,
                failed: 1,
                skipped: 1
            }
        );
        assert!(!summary.ok());
    }
}
