use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::manifest::model::{BuildManifest, DependencyScope};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

/// Замечание линтера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Finding {
    /// Пустой список зависимостей модуля.
    EmptyDependencyList { module: String, scope: DependencyScope },
    /// Зависимость указана в одном списке больше одного раза.
    DuplicateDependency {
        module: String,
        scope: DependencyScope,
        dependency: String,
        occurrences: usize,
    },
    /// Тестовый модуль не зависит публично от модуля, который тестирует.
    MissingTestedModule { module: String, tested: String },
    /// Цель ссылается на необъявленный модуль.
    UnknownTargetModule { target: String, module: String },
    /// Цель не ссылается ни на один модуль.
    TargetWithoutModule { target: String },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::DuplicateDependency { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::EmptyDependencyList { module, scope } => {
                write!(f, "{module}: пустой список {} зависимостей", scope.as_str())
            }
            Finding::DuplicateDependency {
                module,
                scope,
                dependency,
                occurrences,
            } => write!(
                f,
                "{module}: {dependency} повторяется в {} зависимостях ({occurrences} раза)",
                scope.as_str()
            ),
            Finding::MissingTestedModule { module, tested } => {
                write!(f, "{module}: нет публичной зависимости от тестируемого модуля {tested}")
            }
            Finding::UnknownTargetModule { target, module } => {
                write!(f, "{target}: модуль {module} не объявлен")
            }
            Finding::TargetWithoutModule { target } => write!(f, "{target}: цель не ссылается ни на один модуль"),
        }
    }
}

/// Результат проверки манифеста.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LintReport {
    pub findings: Vec<Finding>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity() == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity() == Severity::Error)
    }
}

/// Повторы в списке: имя и сколько раз встретилось, в порядке первого появления.
fn duplicates(items: &[String]) -> Vec<(String, usize)> {
    let mut seen: Vec<(String, usize)> = Vec::new();
    for item in items {
        match seen.iter_mut().find(|(name, _)| name == item) {
            Some((_, count)) => *count += 1,
            None => seen.push((item.clone(), 1)),
        }
    }
    seen.into_iter().filter(|(_, count)| *count > 1).collect()
}

/// Проверить манифест.
pub fn lint(manifest: &BuildManifest) -> LintReport {
    let mut findings = Vec::new();

    for target in &manifest.targets {
        if target.modules.is_empty() {
            findings.push(Finding::TargetWithoutModule {
                target: target.name.clone(),
            });
        }
        for module in &target.modules {
            if manifest.module(module).is_none() {
                findings.push(Finding::UnknownTargetModule {
                    target: target.name.clone(),
                    module: module.clone(),
                });
            }
        }
    }

    for module in &manifest.modules {
        for scope in [DependencyScope::Public, DependencyScope::Private] {
            let deps = module.dependencies(scope);
            if deps.is_empty() {
                findings.push(Finding::EmptyDependencyList {
                    module: module.name.clone(),
                    scope,
                });
                continue;
            }
            for (dependency, occurrences) in duplicates(deps) {
                findings.push(Finding::DuplicateDependency {
                    module: module.name.clone(),
                    scope,
                    dependency,
                    occurrences,
                });
            }
        }

        if let Some(tested) = manifest.tested_module(module) {
            if !module.public.iter().any(|d| d == tested) {
                findings.push(Finding::MissingTestedModule {
                    module: module.name.clone(),
                    tested: tested.to_string(),
                });
            }
        }
    }

    for finding in &findings {
        match finding.severity() {
            Severity::Warning => warn!("{finding}"),
            Severity::Error => error!("{finding}"),
        }
    }
    debug!(findings = findings.len(), "манифест проверен");

    LintReport { findings }
}
