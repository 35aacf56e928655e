use crate::detect::PackageManagerFact;
use crate::stack::PackageManagerId;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Everything the detectors learned about a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildFacts {
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    pub node_version: Option<String>,
    pub package_manager: PackageManagerFact,
}

/// Named step outputs in emission order. Undetermined values are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutputs(Vec<(&'static str, String)>);

impl StepOutputs {
    pub fn from_facts(facts: &BuildFacts) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let manager = facts.package_manager.name;
        let commands = manager.map(|id| id.commands());

        let mut outputs = vec![
            ("app-name", text(&facts.app_name)),
            ("app-version", text(&facts.app_version)),
            ("node-version", text(&facts.node_version)),
            (
                "package-manager",
                manager.map(|id| id.name().to_string()).unwrap_or_default(),
            ),
        ];

        for id in PackageManagerId::all_variants() {
            let version = if manager == Some(*id) {
                text(&facts.package_manager.version)
            } else {
                String::new()
            };
            outputs.push((id.version_output(), version));
        }

        outputs.push((
            "install-command",
            commands.map(|c| c.install.to_string()).unwrap_or_default(),
        ));
        outputs.push((
            "exec-command",
            commands.map(|c| c.exec.to_string()).unwrap_or_default(),
        ));

        Self(outputs)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for StepOutputs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
