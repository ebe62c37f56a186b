//! Conformance checks, one per repository convention

pub mod changelog;
pub mod collision;
pub mod descriptor;
pub mod lang;
pub mod modules;
pub mod requirements;
pub mod tables;

use crate::domain::traits::Check;

/// Registry of all available checks
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self { checks: vec![] }
    }

    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    pub fn get_all(&self) -> &[Box<dyn Check>] {
        &self.checks
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Box<dyn Check>> {
        self.checks.iter().find(|c| c.id() == id)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a registry with all available checks, in run order.
pub fn create_registry() -> CheckRegistry {
    let mut registry = CheckRegistry::new();

    registry.register(Box::new(descriptor::DescriptorCheck));
    registry.register(Box::new(modules::ModulesCheck));
    registry.register(Box::new(changelog::ChangelogCheck));
    registry.register(Box::new(requirements::RequirementsCheck));
    registry.register(Box::new(tables::TablesCheck));
    registry.register(Box::new(lang::LangCheck));
    registry.register(Box::new(collision::NameCollisionCheck));

    registry
}
