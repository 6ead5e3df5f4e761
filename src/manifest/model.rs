use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::manifest::errors::ManifestError;

const BUNDLED_MANIFEST: &str = include_str!("../../manifests/poker_client.toml");

/// Тип собираемой цели.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Game,
    Editor,
}

/// Цель сборки: исполняемый файл, который тянет перечисленные модули.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetRule {
    pub name: String,
    pub kind: TargetKind,
    #[serde(default)]
    pub modules: Vec<String>,
}

/// Модуль и его зависимости.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleRule {
    pub name: String,
    #[serde(default)]
    pub public: Vec<String>,
    #[serde(default)]
    pub private: Vec<String>,
    /// Какой модуль тестирует этот модуль (для тестовых модулей).
    #[serde(default)]
    pub tests: Option<String>,
}

/// Видимость зависимости.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DependencyScope {
    Public,
    Private,
}

impl DependencyScope {
    pub fn as_str(self) -> &'static str {
        match self {
            DependencyScope::Public => "public",
            DependencyScope::Private => "private",
        }
    }
}

impl ModuleRule {
    pub fn dependencies(&self, scope: DependencyScope) -> &[String] {
        match scope {
            DependencyScope::Public => &self.public,
            DependencyScope::Private => &self.private,
        }
    }
}

/// Манифест сборки: цели и модули.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildManifest {
    #[serde(default)]
    pub targets: Vec<TargetRule>,
    #[serde(default)]
    pub modules: Vec<ModuleRule>,
}

impl BuildManifest {
    pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
        let manifest: BuildManifest = toml::from_str(content)?;
        debug!(
            targets = manifest.targets.len(),
            modules = manifest.modules.len(),
            "манифест разобран"
        );
        Ok(manifest)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Манифест клиента, вшитый в бинарник.
    pub fn bundled() -> Result<Self, ManifestError> {
        Self::from_toml_str(BUNDLED_MANIFEST)
    }

    pub fn module(&self, name: &str) -> Option<&ModuleRule> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Какой модуль тестирует `module`: явное поле `tests`,
    /// иначе имя без суффикса `_tests`, если такой модуль объявлен.
    pub fn tested_module<'a>(&'a self, module: &'a ModuleRule) -> Option<&'a str> {
        if let Some(t) = module.tests.as_deref() {
            return Some(t);
        }
        module
            .name
            .strip_suffix("_tests")
            .filter(|base| self.module(base).is_some())
    }
}
