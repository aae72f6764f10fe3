use crate::descriptor::{DescriptorBody, ToolDescriptor};
use crate::error::{RegistryError, Result};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Parsed form of the static tool document: a `tools` map of id to
/// descriptor. Descriptors keep the order they were declared in, which only
/// matters for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolManifest {
    descriptors: Vec<ToolDescriptor>,
}

impl ToolManifest {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| RegistryError::Io(path.to_path_buf(), e))?;
        content.parse()
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RegistryError::Parse(e.to_string()))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub(crate) fn from_descriptors(descriptors: Vec<ToolDescriptor>) -> Self {
        Self { descriptors }
    }

    pub(crate) fn into_descriptors(self) -> Vec<ToolDescriptor> {
        self.descriptors
    }
}

impl FromStr for ToolManifest {
    type Err = RegistryError;

    fn from_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| RegistryError::Parse(e.to_string()))
    }
}

impl Serialize for ToolManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct BodyRef<'a> {
            description: &'a str,
            functionality: &'a str,
            features: &'a [String],
            use_cases: &'a [String],
        }

        struct ToolsRef<'a>(&'a [ToolDescriptor]);

        impl Serialize for ToolsRef<'_> {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for descriptor in self.0 {
                    map.serialize_entry(
                        &descriptor.id,
                        &BodyRef {
                            description: &descriptor.description,
                            functionality: &descriptor.functionality,
                            features: &descriptor.features,
                            use_cases: &descriptor.use_cases,
                        },
                    )?;
                }
                map.end()
            }
        }

        let mut root = serializer.serialize_map(Some(1))?;
        root.serialize_entry("tools", &ToolsRef(&self.descriptors))?;
        root.end()
    }
}

// Hand-written so declaration order survives without an ordered-map
// dependency, and so duplicate ids fail instead of silently overwriting.
impl<'de> Deserialize<'de> for ToolManifest {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct ToolsMap(Vec<ToolDescriptor>);

        impl<'de> Deserialize<'de> for ToolsMap {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                struct ToolsVisitor;

                impl<'de> Visitor<'de> for ToolsVisitor {
                    type Value = ToolsMap;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str("a map of tool id to descriptor")
                    }

                    fn visit_map<A: MapAccess<'de>>(
                        self,
                        mut map: A,
                    ) -> std::result::Result<Self::Value, A::Error> {
                        let mut descriptors: Vec<ToolDescriptor> =
                            Vec::with_capacity(map.size_hint().unwrap_or(0));

                        while let Some((id, body)) =
                            map.next_entry::<String, DescriptorBody>()?
                        {
                            if descriptors.iter().any(|d| d.id == id) {
                                return Err(de::Error::custom(format!(
                                    "duplicate tool id `{id}`"
                                )));
                            }
                            if body.description.trim().is_empty() {
                                return Err(de::Error::custom(format!(
                                    "tool `{id}`: `description` must not be empty"
                                )));
                            }
                            if body.functionality.trim().is_empty() {
                                return Err(de::Error::custom(format!(
                                    "tool `{id}`: `functionality` must not be empty"
                                )));
                            }
                            descriptors.push(ToolDescriptor::from_parts(id, body));
                        }

                        Ok(ToolsMap(descriptors))
                    }
                }

                deserializer.deserialize_map(ToolsVisitor)
            }
        }

        struct ManifestVisitor;

        impl<'de> Visitor<'de> for ManifestVisitor {
            type Value = ToolManifest;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object with a `tools` map")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut tools: Option<ToolsMap> = None;

                while let Some(key) = map.next_key::<String>()? {
                    if key == "tools" {
                        if tools.is_some() {
                            return Err(de::Error::duplicate_field("tools"));
                        }
                        tools = Some(map.next_value()?);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }

                let tools = tools.ok_or_else(|| de::Error::missing_field("tools"))?;
                Ok(ToolManifest {
                    descriptors: tools.0,
                })
            }
        }

        deserializer.deserialize_map(ManifestVisitor)
    }
}
