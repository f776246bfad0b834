use serde::Serialize;
use utoipa::ToSchema;

use crate::features::h5p::models::Capability;

/// Short name under which the functions are published as one service
pub const SERVICE_SHORT_NAME: &str = "local_h5p_api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FunctionType {
    Read,
    Write,
}

/// A callable function from the service catalog.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FunctionDefinition {
    /// Function name as sent in `wsfunction` (e.g. "local_h5p_api_upload")
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub function_type: FunctionType,
    /// Permission the caller needs in the target scope
    pub capability: &'static str,
}

/// Operations reachable through the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum H5pFunction {
    Upload,
    List,
    GetEmbed,
}

impl H5pFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "local_h5p_api_upload" => Some(H5pFunction::Upload),
            "local_h5p_api_list" => Some(H5pFunction::List),
            "local_h5p_api_get_embed" => Some(H5pFunction::GetEmbed),
            _ => None,
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            H5pFunction::Upload => Capability::Upload,
            H5pFunction::List | H5pFunction::GetEmbed => Capability::Access,
        }
    }
}

/// All exposed functions. This is the single source of truth for the catalog.
const FUNCTION_REGISTRY: &[FunctionDefinition] = &[
    FunctionDefinition {
        name: "local_h5p_api_upload",
        description: "Upload an H5P package to the content bank and return its embed URL",
        function_type: FunctionType::Write,
        capability: "contentbank:upload",
    },
    FunctionDefinition {
        name: "local_h5p_api_list",
        description: "List H5P content in a content bank scope",
        function_type: FunctionType::Read,
        capability: "contentbank:access",
    },
    FunctionDefinition {
        name: "local_h5p_api_get_embed",
        description: "Get the embed URL, iframe markup and short code of H5P content",
        function_type: FunctionType::Read,
        capability: "contentbank:access",
    },
];

/// Return all registered functions.
pub fn all_functions() -> Vec<FunctionDefinition> {
    FUNCTION_REGISTRY.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_registered_function_is_dispatchable() {
        for def in FUNCTION_REGISTRY {
            let function = H5pFunction::from_name(def.name)
                .unwrap_or_else(|| panic!("{} has no dispatch target", def.name));
            assert_eq!(function.capability().permission(), def.capability);
        }
    }

    fn find_function(name: &str) -> Option<&'static FunctionDefinition> {
        FUNCTION_REGISTRY.iter().find(|def| def.name == name)
    }

    #[test]
    fn test_function_types() {
        assert_eq!(
            find_function("local_h5p_api_upload").map(|d| d.function_type),
            Some(FunctionType::Write)
        );
        assert_eq!(
            find_function("local_h5p_api_list").map(|d| d.function_type),
            Some(FunctionType::Read)
        );
        assert!(find_function("core_course_get_contents").is_none());
        assert!(H5pFunction::from_name("core_course_get_contents").is_none());
    }

    #[test]
    fn test_definition_serializes_type_field() {
        let value = serde_json::to_value(&all_functions()[0]).unwrap();
        assert_eq!(value["type"], "write");
        assert_eq!(value["name"], "local_h5p_api_upload");
    }
}
