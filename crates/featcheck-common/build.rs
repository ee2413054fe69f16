//! ---
//! fc_section: "01-core-functionality"
//! fc_subsection: "build"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Build script embedding git and cargo metadata."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Without `fail_on_error` vergen emits placeholder values when the
    // checkout has no git metadata (source tarballs, vendored builds).
    EmitBuilder::builder()
        .build_timestamp()
        .all_cargo()
        .git_sha(true)
        .emit()?;

    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
