//! Workspace root package. Exists to carry the pre-commit hook configuration;
//! the service code lives under `crates/`.
