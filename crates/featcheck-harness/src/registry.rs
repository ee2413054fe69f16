//! ---
//! fc_section: "02-harness"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Ordered, name-unique example case registry."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::case::{Category, ExampleCase};
use crate::error::{HarnessError, Result};

/// Holds example cases in registration order, keyed by their unique name.
///
/// Populated once at startup, then only read.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    cases: IndexMap<String, ExampleCase>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a case. On error the registry is left unchanged.
    pub fn register(&mut self, case: ExampleCase) -> Result<()> {
        validate_name(case.name())?;
        match self.cases.entry(case.name().to_owned()) {
            Entry::Occupied(entry) => Err(HarnessError::DuplicateName {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!(case = %case.name(), category = %case.category(), "registered example case");
                entry.insert(case);
                Ok(())
            }
        }
    }

    /// Add a batch of cases atomically: either all are registered or none.
    pub fn register_all(&mut self, cases: impl IntoIterator<Item = ExampleCase>) -> Result<()> {
        let cases: Vec<ExampleCase> = cases.into_iter().collect();
        let mut incoming = IndexSet::with_capacity(cases.len());
        for case in &cases {
            validate_name(case.name())?;
            if self.cases.contains_key(case.name()) || !incoming.insert(case.name()) {
                return Err(HarnessError::DuplicateName {
                    name: case.name().to_owned(),
                });
            }
        }
        for case in cases {
            self.register(case)?;
        }
        Ok(())
    }

    /// Registered cases in registration order. Each call starts a fresh pass.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &ExampleCase> + Clone + '_ {
        self.cases.values()
    }

    /// Cases accepted by `selection`, in registration order.
    pub fn select<'a>(
        &'a self,
        selection: &'a Selection,
    ) -> impl Iterator<Item = &'a ExampleCase> + Clone + 'a {
        self.all().filter(move |case| selection.matches(case))
    }

    /// Cases whose name contains `substring`, in registration order.
    pub fn filtered<'a>(
        &'a self,
        substring: &'a str,
    ) -> impl Iterator<Item = &'a ExampleCase> + Clone + 'a {
        self.all().filter(move |case| case.name().contains(substring))
    }

    /// Look up a case by name.
    pub fn get(&self, name: &str) -> Option<&ExampleCase> {
        self.cases.get(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.cases.keys().map(String::as_str)
    }

    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether no case has been registered.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(HarnessError::InvalidName);
    }
    Ok(())
}

/// Criteria restricting which registered cases take part in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Keep cases whose name contains this substring.
    pub filter: Option<String>,
    /// Keep cases of this category.
    pub category: Option<Category>,
}

impl Selection {
    /// Select every case.
    pub fn everything() -> Self {
        Self::default()
    }

    /// Restrict to names containing `substring`.
    pub fn with_filter(mut self, substring: impl Into<String>) -> Self {
        self.filter = Some(substring.into());
        self
    }

    /// Restrict to one category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Whether `case` satisfies every criterion.
    pub fn matches(&self, case: &ExampleCase) -> bool {
        let name_ok = self
            .filter
            .as_deref()
            .map_or(true, |substring| case.name().contains(substring));
        let category_ok = self
            .category
            .map_or(true, |category| case.category() == category);
        name_ok && category_ok
    }
}
