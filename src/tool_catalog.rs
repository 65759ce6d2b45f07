//! Static catalog of Unity Editor tools and how each one maps onto the Unity bridge HTTP API.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::unity_bridge_client::BridgeError;

/// Arguments of a tool call, keyed by parameter name
pub type Arguments = Map<String, Value>;

/// Every tool the gateway exposes, one variant per Unity bridge endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnityTool {
    CreateGameObject,
    SetTransform,
    AddComponent,
    SetProperty,
    DeleteGameObject,
    FindGameObject,
    ListScene,
    PlayMode,
    SaveScene,
    NewScene,
}

/// Immutable description of a tool as advertised to MCP clients
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Arguments,
}

impl UnityTool {
    /// All tools, in the order they are listed to clients
    pub const ALL: [UnityTool; 10] = [
        UnityTool::CreateGameObject,
        UnityTool::SetTransform,
        UnityTool::AddComponent,
        UnityTool::SetProperty,
        UnityTool::DeleteGameObject,
        UnityTool::FindGameObject,
        UnityTool::ListScene,
        UnityTool::PlayMode,
        UnityTool::SaveScene,
        UnityTool::NewScene,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            UnityTool::CreateGameObject => "create-gameobject",
            UnityTool::SetTransform => "set-transform",
            UnityTool::AddComponent => "add-component",
            UnityTool::SetProperty => "set-property",
            UnityTool::DeleteGameObject => "delete-gameobject",
            UnityTool::FindGameObject => "find-gameobject",
            UnityTool::ListScene => "list-scene",
            UnityTool::PlayMode => "play-mode",
            UnityTool::SaveScene => "save-scene",
            UnityTool::NewScene => "new-scene",
        }
    }

    /// Path of the Unity bridge endpoint that performs this tool
    pub fn path(self) -> &'static str {
        match self {
            UnityTool::CreateGameObject => "/createGameObject",
            UnityTool::SetTransform => "/setTransform",
            UnityTool::AddComponent => "/addComponent",
            UnityTool::SetProperty => "/setProperty",
            UnityTool::DeleteGameObject => "/deleteGameObject",
            UnityTool::FindGameObject => "/findGameObject",
            UnityTool::ListScene => "/listScene",
            UnityTool::PlayMode => "/playMode",
            UnityTool::SaveScene => "/saveScene",
            UnityTool::NewScene => "/newScene",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            UnityTool::CreateGameObject => {
                "Create a new GameObject in the active Unity scene, optionally as a primitive and under a parent"
            }
            UnityTool::SetTransform => "Set the position, rotation and/or scale of a GameObject",
            UnityTool::AddComponent => "Add a component to a GameObject",
            UnityTool::SetProperty => "Set a property value on a component of a GameObject",
            UnityTool::DeleteGameObject => "Delete a GameObject from the active scene",
            UnityTool::FindGameObject => "Find a GameObject by name and return its details",
            UnityTool::ListScene => "List all GameObjects in the active scene hierarchy",
            UnityTool::PlayMode => "Enter or exit Play Mode in the Unity Editor",
            UnityTool::SaveScene => "Save the active scene, optionally to a specific path",
            UnityTool::NewScene => "Create a new empty scene",
        }
    }

    /// Arguments a call must carry; everything else is optional
    pub fn required_arguments(self) -> &'static [&'static str] {
        match self {
            UnityTool::CreateGameObject
            | UnityTool::SetTransform
            | UnityTool::DeleteGameObject
            | UnityTool::FindGameObject => &["name"],
            UnityTool::AddComponent => &["name", "componentType"],
            UnityTool::SetProperty => &["name", "componentType", "property", "value"],
            UnityTool::PlayMode => &["play"],
            UnityTool::ListScene | UnityTool::SaveScene | UnityTool::NewScene => &[],
        }
    }

    pub fn input_schema(self) -> Arguments {
        let properties = match self {
            UnityTool::CreateGameObject => json!({
                "name": { "type": "string", "description": "Name of the GameObject" },
                "primitiveType": {
                    "type": "string",
                    "description": "Optional primitive to create",
                    "enum": ["Cube", "Sphere", "Capsule", "Cylinder", "Plane", "Quad"]
                },
                "parent": { "type": "string", "description": "Optional name of the parent GameObject" }
            }),
            UnityTool::SetTransform => json!({
                "name": { "type": "string", "description": "Name of the GameObject" },
                "position": vector3_schema("World position"),
                "rotation": vector3_schema("Euler rotation in degrees"),
                "scale": vector3_schema("Local scale")
            }),
            UnityTool::AddComponent => json!({
                "name": { "type": "string", "description": "Name of the GameObject" },
                "componentType": {
                    "type": "string",
                    "description": "Component type name, e.g. Rigidbody or BoxCollider"
                }
            }),
            UnityTool::SetProperty => json!({
                "name": { "type": "string", "description": "Name of the GameObject" },
                "componentType": { "type": "string", "description": "Component type name" },
                "property": { "type": "string", "description": "Property or field name" },
                "value": { "description": "Value to assign" }
            }),
            UnityTool::DeleteGameObject => json!({
                "name": { "type": "string", "description": "Name of the GameObject to delete" }
            }),
            UnityTool::FindGameObject => json!({
                "name": { "type": "string", "description": "Name of the GameObject to find" }
            }),
            UnityTool::PlayMode => json!({
                "play": { "type": "boolean", "description": "true to enter Play Mode, false to exit" }
            }),
            UnityTool::SaveScene => json!({
                "path": {
                    "type": "string",
                    "description": "Optional asset path, e.g. Assets/Scenes/Main.unity"
                }
            }),
            UnityTool::ListScene | UnityTool::NewScene => json!({}),
        };

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), properties);
        let required = self.required_arguments();
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }
        schema
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }

    /// Build the JSON body forwarded to the Unity bridge
    ///
    /// Returns `Ok(None)` for tools whose endpoint takes no body.
    pub fn shape_arguments(self, args: &Arguments) -> Result<Option<Value>, BridgeError> {
        for &argument in self.required_arguments() {
            if !args.contains_key(argument) {
                return Err(BridgeError::MissingArgument {
                    tool: self.name().to_string(),
                    argument: argument.to_string(),
                });
            }
        }

        let mut body = Map::new();
        match self {
            UnityTool::ListScene | UnityTool::NewScene => return Ok(None),
            UnityTool::CreateGameObject => {
                forward(args, &mut body, "name");
                forward_or_empty(args, &mut body, "primitiveType");
                forward_or_empty(args, &mut body, "parent");
            }
            UnityTool::SetTransform => {
                forward(args, &mut body, "name");
                // Absent vectors are not forwarded
                forward(args, &mut body, "position");
                forward(args, &mut body, "rotation");
                forward(args, &mut body, "scale");
            }
            UnityTool::AddComponent => {
                forward(args, &mut body, "name");
                forward(args, &mut body, "componentType");
            }
            UnityTool::SetProperty => {
                forward(args, &mut body, "name");
                forward(args, &mut body, "componentType");
                forward(args, &mut body, "property");
                forward(args, &mut body, "value");
            }
            UnityTool::DeleteGameObject | UnityTool::FindGameObject => {
                forward(args, &mut body, "name");
            }
            UnityTool::PlayMode => {
                forward(args, &mut body, "play");
            }
            UnityTool::SaveScene => {
                forward_or_empty(args, &mut body, "path");
            }
        }
        Ok(Some(Value::Object(body)))
    }
}

/// Definitions of every tool, in catalog order
pub fn tool_definitions() -> Vec<ToolDefinition> {
    UnityTool::ALL.into_iter().map(UnityTool::definition).collect()
}

fn vector3_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "properties": {
            "x": { "type": "number" },
            "y": { "type": "number" },
            "z": { "type": "number" }
        },
        "required": ["x", "y", "z"]
    })
}

/// Copies the argument as given, `null` included
fn forward(args: &Arguments, body: &mut Arguments, key: &str) {
    if let Some(value) = args.get(key) {
        body.insert(key.to_string(), value.clone());
    }
}

/// Missing or `null` becomes `""`
fn forward_or_empty(args: &Arguments, body: &mut Arguments, key: &str) {
    let value = args
        .get(key)
        .filter(|value| !value.is_null())
        .cloned()
        .unwrap_or_else(|| json!(""));
    body.insert(key.to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn args(value: Value) -> Arguments {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_catalog_order_and_names() {
        let names: Vec<_> = tool_definitions().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "create-gameobject",
                "set-transform",
                "add-component",
                "set-property",
                "delete-gameobject",
                "find-gameobject",
                "list-scene",
                "play-mode",
                "save-scene",
                "new-scene",
            ]
        );
    }

    #[test]
    fn test_names_and_paths_are_unique() {
        let names: HashSet<_> = UnityTool::ALL.iter().map(|t| t.name()).collect();
        let paths: HashSet<_> = UnityTool::ALL.iter().map(|t| t.path()).collect();
        assert_eq!(names.len(), UnityTool::ALL.len());
        assert_eq!(paths.len(), UnityTool::ALL.len());
    }

    #[test]
    fn test_from_name_round_trips_every_tool() {
        for tool in UnityTool::ALL {
            assert_eq!(UnityTool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(UnityTool::from_name("launch-rocket"), None);
        assert_eq!(UnityTool::from_name("CreateGameObject"), None);
    }

    #[test]
    fn test_schema_lists_required_arguments() {
        for tool in UnityTool::ALL {
            let schema = tool.input_schema();
            assert_eq!(schema["type"], "object");
            let properties = schema["properties"].as_object().unwrap();
            for required in tool.required_arguments() {
                assert!(properties.contains_key(*required), "{} lacks {}", tool.name(), required);
            }
            match schema.get("required") {
                Some(required) => assert_eq!(required, &json!(tool.required_arguments())),
                None => assert!(tool.required_arguments().is_empty()),
            }
        }
    }

    #[test]
    fn test_create_gameobject_defaults() {
        let body = UnityTool::CreateGameObject
            .shape_arguments(&args(json!({ "name": "Player" })))
            .unwrap();
        assert_eq!(
            body,
            Some(json!({ "name": "Player", "primitiveType": "", "parent": "" }))
        );
    }

    #[test]
    fn test_create_gameobject_keeps_given_values() {
        let body = UnityTool::CreateGameObject
            .shape_arguments(&args(json!({
                "name": "Ball",
                "primitiveType": "Sphere",
                "parent": "Level",
                "ignored": 42
            })))
            .unwrap();
        assert_eq!(
            body,
            Some(json!({ "name": "Ball", "primitiveType": "Sphere", "parent": "Level" }))
        );
    }

    #[test]
    fn test_set_transform_omits_absent_vectors() {
        let body = UnityTool::SetTransform
            .shape_arguments(&args(json!({
                "name": "Foo",
                "position": { "x": 1, "y": 2, "z": 3 }
            })))
            .unwrap()
            .unwrap();
        let body = body.as_object().unwrap();
        assert_eq!(body.len(), 2);
        assert!(!body.contains_key("rotation"));
        assert!(!body.contains_key("scale"));
    }

    #[test]
    fn test_save_scene_defaults_path() {
        let body = UnityTool::SaveScene.shape_arguments(&Arguments::new()).unwrap();
        assert_eq!(body, Some(json!({ "path": "" })));

        let body = UnityTool::SaveScene
            .shape_arguments(&args(json!({ "path": null })))
            .unwrap();
        assert_eq!(body, Some(json!({ "path": "" })));
    }

    #[test]
    fn test_bodyless_tools() {
        assert_eq!(UnityTool::ListScene.shape_arguments(&Arguments::new()).unwrap(), None);
        assert_eq!(
            UnityTool::NewScene
                .shape_arguments(&args(json!({ "name": "unused" })))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_set_property_forwards_any_value_type() {
        let body = UnityTool::SetProperty
            .shape_arguments(&args(json!({
                "name": "Cube",
                "componentType": "Rigidbody",
                "property": "mass",
                "value": 2.5
            })))
            .unwrap();
        assert_eq!(
            body,
            Some(json!({
                "name": "Cube",
                "componentType": "Rigidbody",
                "property": "mass",
                "value": 2.5
            }))
        );
    }

    #[test]
    fn test_play_mode_false_is_present() {
        let body = UnityTool::PlayMode
            .shape_arguments(&args(json!({ "play": false })))
            .unwrap();
        assert_eq!(body, Some(json!({ "play": false })));
    }

    #[test]
    fn test_null_required_argument_is_forwarded() {
        let body = UnityTool::SetProperty
            .shape_arguments(&args(json!({
                "name": "Turret",
                "componentType": "TurretAim",
                "property": "target",
                "value": null
            })))
            .unwrap();
        assert_eq!(
            body,
            Some(json!({
                "name": "Turret",
                "componentType": "TurretAim",
                "property": "target",
                "value": null
            }))
        );
    }

    #[test]
    fn test_missing_required_argument() {
        let err = UnityTool::AddComponent
            .shape_arguments(&args(json!({ "name": "Cube" })))
            .unwrap_err();
        assert!(matches!(
            &err,
            BridgeError::MissingArgument { tool, argument }
                if tool == "add-component" && argument == "componentType"
        ));
        assert_eq!(
            err.to_string(),
            "Missing required argument 'componentType' for tool 'add-component'"
        );
    }
}
