use crate::descriptor::ToolDescriptor;
use crate::error::{RegistryError, Result};
use crate::manifest::ToolManifest;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

const BUILTIN_MANIFEST: &str = include_str!("../data/tools.json");

static GLOBAL: OnceLock<ToolRegistry> = OnceLock::new();

/// Read-only lookup table over the tool manifest. Built once, never mutated,
/// safe to share across threads without coordination.
pub struct ToolRegistry {
    descriptors: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn from_manifest(manifest: ToolManifest) -> Self {
        let descriptors = manifest.into_descriptors();
        let mut index = HashMap::with_capacity(descriptors.len());
        for (pos, descriptor) in descriptors.iter().enumerate() {
            index.insert(descriptor.id.clone(), pos);
        }

        debug!(tools = descriptors.len(), "tool registry initialized");
        Self { descriptors, index }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(Self::from_manifest(content.parse()?))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_manifest(ToolManifest::from_path(path.as_ref())?))
    }

    /// Registry backed by the manifest compiled into the crate.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_MANIFEST).expect("builtin tool manifest is valid")
    }

    /// Process-wide registry, initialized from the builtin manifest on first
    /// access and read-only afterwards.
    pub fn global() -> &'static ToolRegistry {
        GLOBAL.get_or_init(Self::builtin)
    }

    pub fn get(&self, id: &str) -> Result<&ToolDescriptor> {
        self.index
            .get(id)
            .map(|&pos| &self.descriptors[pos])
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// All registered ids, no order guarantee.
    pub fn list_ids(&self) -> Vec<&str> {
        self.index.keys().map(|id| id.as_str()).collect()
    }

    /// Descriptors in manifest declaration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.descriptors.iter()
    }

    pub fn to_manifest(&self) -> ToolManifest {
        ToolManifest::from_descriptors(self.descriptors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "tools": {
            "skill_gap": {
                "description": "Analyzes skill gaps",
                "functionality": "Compares skills against target roles",
                "features": ["Skill matching", "Gap analysis"],
                "use_cases": ["Planning a role transition"]
            },
            "web_search": {
                "description": "Fetches real-time information",
                "functionality": "Runs live web searches",
                "features": ["Real-time search"],
                "use_cases": ["Checking current facts"]
            }
        }
    }"#;

    #[test]
    fn should_build_registry_from_json() {
        let registry = ToolRegistry::from_json(SAMPLE).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert!(registry.contains("skill_gap"));
        assert!(registry.contains("web_search"));
    }

    #[test]
    fn should_get_registered_descriptor() {
        let registry = ToolRegistry::from_json(SAMPLE).unwrap();
        let descriptor = registry.get("skill_gap").unwrap();

        assert_eq!(descriptor.id, "skill_gap");
        assert_eq!(descriptor.description, "Analyzes skill gaps");
        assert_eq!(descriptor.features, vec!["Skill matching", "Gap analysis"]);
    }

    #[test]
    fn should_fail_to_get_unregistered_tool() {
        let registry = ToolRegistry::from_json(SAMPLE).unwrap();
        let result = registry.get("resume_builder");

        assert!(matches!(result, Err(RegistryError::NotFound(_))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Tool 'resume_builder' is not registered"
        );
    }

    #[test]
    fn should_list_ids_without_duplicates() {
        let registry = ToolRegistry::from_json(SAMPLE).unwrap();
        let mut ids = registry.list_ids();
        ids.sort_unstable();

        assert_eq!(ids, vec!["skill_gap", "web_search"]);
    }

    #[test]
    fn should_iterate_descriptors_in_declaration_order() {
        let registry = ToolRegistry::from_json(SAMPLE).unwrap();
        let ids: Vec<&str> = registry.descriptors().map(|d| d.id.as_str()).collect();

        assert_eq!(ids, vec!["skill_gap", "web_search"]);
    }

    #[test]
    fn should_restart_descriptor_iteration() {
        let registry = ToolRegistry::from_json(SAMPLE).unwrap();

        assert_eq!(registry.descriptors().count(), 2);
        assert_eq!(registry.descriptors().count(), 2);
    }

    #[test]
    fn should_round_trip_registry_through_manifest() {
        let registry = ToolRegistry::from_json(SAMPLE).unwrap();
        let serialized = registry.to_manifest().to_json_string().unwrap();
        let reloaded = ToolRegistry::from_json(&serialized).unwrap();

        assert_eq!(registry.to_manifest(), reloaded.to_manifest());
    }

    #[test]
    fn should_load_registry_from_file() {
        use std::io::Write;

        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file.write_all(SAMPLE.as_bytes()).unwrap();

        let registry = ToolRegistry::load(temp_file.path()).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn should_surface_parse_error_from_load() {
        use std::io::Write;

        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file.write_all(b"{\"no_tools\": true}").unwrap();

        let result = ToolRegistry::load(temp_file.path());
        assert!(matches!(result, Err(RegistryError::Parse(_))));
    }

    #[test]
    fn should_expose_builtin_registry() {
        let registry = ToolRegistry::builtin();

        assert!(registry.contains("career_path"));
        assert!(registry.contains("tool_registry"));
    }

    #[test]
    fn should_return_same_global_instance() {
        let first = ToolRegistry::global() as *const ToolRegistry;
        let second = ToolRegistry::global() as *const ToolRegistry;

        assert_eq!(first, second);
        assert!(!ToolRegistry::global().is_empty());
    }
}
