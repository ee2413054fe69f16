//! ---
//! fc_section: "02-harness"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Example case definition and verdict helpers."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use strum::{Display, EnumString};

/// Zero-argument operation behind an example case.
///
/// `Ok(Verdict::Pass)` passes, `Ok(Verdict::Mismatch(_))` fails, `Err(_)` or a
/// panic errors.
pub type CaseAction = Arc<dyn Fn() -> anyhow::Result<Verdict> + Send + Sync + 'static>;

/// Which half of the feature tour a case belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Core language features.
    #[default]
    Language,
    /// Standard-library features.
    Library,
}

/// Expected/actual pair describing why a case failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Rendering of the documented value.
    pub expected: String,
    /// Rendering of the observed value.
    pub actual: String,
    /// Optional hint on which check inside the case diverged.
    pub note: Option<String>,
}

impl Mismatch {
    /// Build a mismatch from pre-rendered values.
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
            note: None,
        }
    }

    /// Attach a note identifying the diverging check.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, got {}", self.expected, self.actual)?;
        if let Some(note) = &self.note {
            write!(f, " ({note})")?;
        }
        Ok(())
    }
}

/// Result of evaluating a case's success predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The observed behaviour matches the documented one.
    Pass,
    /// The observed behaviour diverges.
    Mismatch(Mismatch),
}

impl Verdict {
    /// Compare two values using their `Debug` renderings in the mismatch detail.
    pub fn compare<T: PartialEq + fmt::Debug + ?Sized>(expected: &T, actual: &T) -> Self {
        if expected == actual {
            Verdict::Pass
        } else {
            Verdict::Mismatch(Mismatch::new(
                format!("{expected:?}"),
                format!("{actual:?}"),
            ))
        }
    }

    /// Pass when `holds`, otherwise fail with the given description.
    pub fn check(holds: bool, expected: impl Into<String>, actual: impl fmt::Display) -> Self {
        if holds {
            Verdict::Pass
        } else {
            Verdict::Mismatch(Mismatch::new(expected, actual.to_string()))
        }
    }

    /// Attach a note to a mismatch; passes are returned unchanged.
    pub fn noted(self, note: impl Into<String>) -> Self {
        match self {
            Verdict::Pass => Verdict::Pass,
            Verdict::Mismatch(mismatch) => Verdict::Mismatch(mismatch.with_note(note)),
        }
    }

    /// First mismatch in `verdicts`, or `Pass` when all pass.
    pub fn all(verdicts: impl IntoIterator<Item = Verdict>) -> Self {
        verdicts
            .into_iter()
            .find(|verdict| !verdict.is_pass())
            .unwrap_or(Verdict::Pass)
    }

    /// Whether this verdict is a pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// A named, self-contained demonstration paired with its success predicate.
#[derive(Clone)]
pub struct ExampleCase {
    name: String,
    description: String,
    category: Category,
    action: CaseAction,
}

impl ExampleCase {
    /// Create a case from an action that produces its own verdict.
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, action: F) -> Self
    where
        F: Fn() -> anyhow::Result<Verdict> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            category: Category::default(),
            action: Arc::new(action),
        }
    }

    /// Create a case that passes when `produce` returns a value equal to `expected`.
    pub fn expect_eq<T, F>(
        name: impl Into<String>,
        description: impl Into<String>,
        expected: T,
        produce: F,
    ) -> Self
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self::new(name, description, move || {
            let actual = produce()?;
            Ok(Verdict::compare(&expected, &actual))
        })
    }

    /// Assign the case to a category.
    pub fn in_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Unique case name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Category the case belongs to.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Shared handle to the action, used when the case runs on another thread.
    pub fn action(&self) -> CaseAction {
        Arc::clone(&self.action)
    }

    /// Invoke the action on the current thread without any failure boundary.
    pub fn execute(&self) -> anyhow::Result<Verdict> {
        (self.action)()
    }
}

impl fmt::Debug for ExampleCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExampleCase")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expect_eq_reports_debug_renderings() {
        let case = ExampleCase::expect_eq("sum", "adds", 6, || Ok(5));
        let verdict = case.execute().unwrap();
        assert_eq!(verdict, Verdict::Mismatch(Mismatch::new("6", "5")));
    }

    #[test]
    fn all_returns_first_mismatch() {
        let verdict = Verdict::all([
            Verdict::Pass,
            Verdict::compare("a", "b").noted("first"),
            Verdict::compare(&1, &2),
        ]);
        let Verdict::Mismatch(mismatch) = verdict else {
            panic!("expected mismatch");
        };
        assert_eq!(mismatch.note.as_deref(), Some("first"));
        assert_eq!(mismatch.to_string(), "expected \"a\", got \"b\" (first)");
    }

    #[test]
    fn check_passes_when_condition_holds() {
        assert!(Verdict::check(true, "anything", "ignored").is_pass());
        assert_eq!(
            Verdict::check(false, "non-empty", "empty"),
            Verdict::Mismatch(Mismatch::new("non-empty", "empty"))
        );
    }

    #[test]
    fn category_parses_and_displays_lowercase() {
        assert_eq!("Library".parse::<Category>().unwrap(), Category::Library);
        assert_eq!(Category::Language.to_string(), "language");
    }

    #[test]
    fn debug_omits_action() {
        let case = ExampleCase::new("n", "d", || Ok(Verdict::Pass)).in_category(Category::Library);
        let rendered = format!("{case:?}");
        assert!(rendered.contains("Library"));
        assert!(!rendered.contains("action"));
    }
}
