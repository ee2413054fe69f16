//! ---
//! fc_section: "04-catalog"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Feature case catalog and registry construction."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
//! The feature tour as executable cases.
//!
//! Each case renders one section of the tour with its Rust counterpart and
//! checks the value the tour documents for it. The catalog holds no global
//! state: [`build_registry`] constructs a fresh [`Registry`] on every call.

use featcheck_harness::{ExampleCase, Registry, Result};

pub mod language;
pub mod library;

/// Every catalog case, language tour first, in tour order.
pub fn cases() -> Vec<ExampleCase> {
    language::cases()
        .into_iter()
        .chain(library::cases())
        .collect()
}

/// Build a registry holding the whole catalog.
pub fn build_registry() -> Result<Registry> {
    let mut registry = Registry::new();
    registry.register_all(cases())?;
    Ok(registry)
}
