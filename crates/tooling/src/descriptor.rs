use serde::{Deserialize, Serialize};

/// Metadata for one tool: what it is for, what it claims to do, and where it
/// is useful. The text is purely descriptive and implies no behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub id: String,
    pub description: String,
    pub functionality: String,
    pub features: Vec<String>,
    pub use_cases: Vec<String>,
}

impl ToolDescriptor {
    pub(crate) fn from_parts(id: String, body: DescriptorBody) -> Self {
        Self {
            id,
            description: body.description,
            functionality: body.functionality,
            features: body.features,
            use_cases: body.use_cases,
        }
    }
}

/// Wire shape of a descriptor; the id is the enclosing map key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DescriptorBody {
    pub description: String,
    pub functionality: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
}
