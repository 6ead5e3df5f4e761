//! Манифест сборки клиента (цели и модули) и его линтер.

pub mod errors;
pub mod lint;
pub mod model;

pub use errors::ManifestError;
pub use lint::{lint, Finding, LintReport, Severity};
pub use model::{BuildManifest, DependencyScope, ModuleRule, TargetKind, TargetRule};
