//! Idempotent component registry
//!
//! The legacy runtime registered the element in a global registry and
//! swallowed the duplicate-registration error. Here registration is an
//! explicit, module-scoped map where the first definition wins and
//! re-registration is a visible no-op.

use std::collections::HashMap;
use std::sync::LazyLock;
use std::sync::Mutex;

use log::debug;

use crate::component::ATTR_SRC;
use crate::component::ComponentConfig;
use crate::component::TableComponent;
use crate::template::TemplateSet;

/// The component's element tag name.
pub const TAG_NAME: &str = "tao-test-component";

/// Everything needed to instantiate a registered component.
#[derive(Debug, Clone)]
pub struct ComponentDefinition {
    templates: TemplateSet,
    config: ComponentConfig,
}

impl ComponentDefinition {
    /// Creates a definition with the given templates and default config.
    pub fn new(templates: TemplateSet) -> Self {
        Self {
            templates,
            config: ComponentConfig::default(),
        }
    }

    /// Sets the config new instances are created with.
    pub fn with_config(mut self, config: ComponentConfig) -> Self {
        self.config = config;
        self
    }

    /// Instantiates a fresh component from this definition.
    pub fn instantiate(&self) -> TableComponent {
        TableComponent::with_config(self.templates.clone(), self.config)
    }
}

static REGISTRY: LazyLock<Mutex<HashMap<String, ComponentDefinition>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Registers a component definition under `name`, once.
///
/// The first registration wins; calling again with the same name is a
/// no-op and returns `false`, never an error.
pub fn register_once(name: &str, definition: ComponentDefinition) -> bool {
    let mut registry = REGISTRY.lock().unwrap();
    if registry.contains_key(name) {
        debug!("{name} already registered, ignoring");
        return false;
    }
    registry.insert(name.to_string(), definition);
    true
}

/// Returns `true` if a definition is registered under `name`.
pub fn is_registered(name: &str) -> bool {
    REGISTRY.lock().unwrap().contains_key(name)
}

/// Creates a [`TAG_NAME`] component, optionally with its `src`
/// attribute set.
///
/// Uses the registered definition if there is one, the built-in
/// templates otherwise. The `src` attribute is only recorded here;
/// the host drives the initial load by calling
/// [`TableComponent::connected`] once the component is attached.
pub fn factory(src: Option<&str>) -> TableComponent {
    let definition = REGISTRY
        .lock()
        .unwrap()
        .get(TAG_NAME)
        .cloned()
        .unwrap_or_else(|| ComponentDefinition::new(TemplateSet::builtin()));
    let component = definition.instantiate();
    if let Some(src) = src {
        component.record_attribute(ATTR_SRC, src);
    }
    component
}
