use std::{path::Path, slice};

use cfjudge_webclient::SampleTestcase;

use crate::storage::testfile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub input: String,
    pub answer: String,
}

impl TestCase {
    pub fn new(input: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            answer: answer.into(),
        }
    }
}

impl From<SampleTestcase> for TestCase {
    fn from(t: SampleTestcase) -> Self {
        Self::new(t.input, t.output)
    }
}

/// Ordered testcases; execution follows this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSuite {
    cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self { cases }
    }

    pub fn load(filepath: impl AsRef<Path>) -> testfile::Result<Self> {
        testfile::load(filepath).map(Self::new)
    }

    pub fn save(&self, filepath: impl AsRef<Path>) -> testfile::Result<()> {
        testfile::save(filepath, &self.cases)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, TestCase> {
        self.cases.iter()
    }
}

impl<'a> IntoIterator for &'a TestSuite {
    type Item = &'a TestCase;
    type IntoIter = slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<TestCase> for TestSuite {
    fn from_iter<I: IntoIterator<Item = TestCase>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
