//! Widget manifest describing the widget to its hosting environment.
//!
//! The host reads the manifest to learn the element tag, the script that
//! defines it, and the properties, methods, events and data bindings the
//! widget exposes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::WidgetConfig;
use crate::event::ROW_CLICK_EVENT;

/// Top-level manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetManifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub new_instance_prefix: String,
    pub webcomponents: Vec<WebComponent>,
    pub properties: BTreeMap<String, PropertySpec>,
    pub methods: BTreeMap<String, MethodSpec>,
    pub events: BTreeMap<String, EventSpec>,
    pub data_bindings: BTreeMap<String, DataBindingSpec>,
}

/// A script defining the widget's element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebComponent {
    pub kind: String,
    pub tag: String,
    pub url: String,
    pub integrity: String,
    pub ignore_integrity: bool,
}

/// A settable widget property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub default: String,
}

/// A method callable from host scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSpec {
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// An event the widget dispatches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    pub description: String,
}

/// A data binding slot and its feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBindingSpec {
    pub feeds: Vec<FeedSpec>,
}

/// One feed of a data binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSpec {
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl WidgetManifest {
    /// Builds the manifest for a widget configured by `config`, served from
    /// `script_url`.
    #[must_use]
    pub fn from_config(config: &WidgetConfig, script_url: &str) -> Self {
        let tag = config.tag_name.clone();
        let prefix: String = tag
            .split('-')
            .filter(|part| !part.is_empty())
            .map(capitalize)
            .collect();

        let properties = BTreeMap::from([(
            "tableTitle".to_string(),
            PropertySpec {
                kind: "string".to_string(),
                description: "Title displayed above the table".to_string(),
                default: config.default_title.clone(),
            },
        )]);

        let methods = BTreeMap::from([
            (
                "setTableData".to_string(),
                MethodSpec {
                    description: "Replace the table rows".to_string(),
                    parameters: vec![ParameterSpec {
                        name: "data".to_string(),
                        kind: "string|Object[]".to_string(),
                        description: "Array of records, or its JSON encoding".to_string(),
                    }],
                    return_type: None,
                },
            ),
            (
                "getTableData".to_string(),
                MethodSpec {
                    description: "Copy of the current table rows".to_string(),
                    parameters: Vec::new(),
                    return_type: Some("Object[]".to_string()),
                },
            ),
        ]);

        let events = BTreeMap::from([(
            ROW_CLICK_EVENT.to_string(),
            EventSpec {
                description: "Fired when a table cell is clicked".to_string(),
            },
        )]);

        let data_bindings = BTreeMap::from([(
            config.binding_property.clone(),
            DataBindingSpec {
                feeds: vec![
                    FeedSpec {
                        id: "dimensions".to_string(),
                        description: "Dimensions".to_string(),
                        kind: "dimension".to_string(),
                    },
                    FeedSpec {
                        id: "measures".to_string(),
                        description: "Measures".to_string(),
                        kind: "mainStructureMember".to_string(),
                    },
                ],
            },
        )]);

        Self {
            id: format!("com.widgets.{}", tag.replace('-', "")),
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: prefix.clone(),
            description: "Right-to-left table fed by a data binding".to_string(),
            new_instance_prefix: prefix,
            webcomponents: vec![WebComponent {
                kind: "main".to_string(),
                tag,
                url: script_url.to_string(),
                integrity: String::new(),
                ignore_integrity: true,
            }],
            properties,
            methods,
            events,
            data_bindings,
        }
    }

    /// Pretty-printed JSON.
    #[must_use]
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn manifest_for_default_widget() {
        let manifest = WidgetManifest::from_config(&WidgetConfig::default(), "/widget.js");

        assert_eq!(manifest.id, "com.widgets.dynamicrtltable");
        assert_eq!(manifest.new_instance_prefix, "DynamicRtlTable");
        assert_eq!(manifest.webcomponents[0].tag, "dynamic-rtl-table");
        assert_eq!(manifest.webcomponents[0].url, "/widget.js");
        assert!(manifest.methods.contains_key("setTableData"));
        assert!(manifest.methods.contains_key("getTableData"));
        assert!(manifest.events.contains_key("onRowClick"));
        assert_eq!(manifest.data_bindings["myBinding"].feeds.len(), 2);
    }

    #[test]
    fn manifest_json_uses_host_field_names() {
        let json = WidgetManifest::from_config(&WidgetConfig::default(), "w.js").to_json_pretty();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["newInstancePrefix"], "DynamicRtlTable");
        assert_eq!(value["webcomponents"][0]["ignoreIntegrity"], true);
        assert_eq!(value["properties"]["tableTitle"]["type"], "string");
        assert_eq!(value["methods"]["getTableData"]["returnType"], "Object[]");
        assert_eq!(
            value["methods"]["setTableData"]["parameters"][0]["type"],
            "string|Object[]"
        );
        assert!(value["methods"]["getTableData"].get("parameters").is_none());
        assert_eq!(value["dataBindings"]["myBinding"]["feeds"][1]["type"], "mainStructureMember");
    }

    #[test]
    fn capitalize_parts() {
        assert_eq!(capitalize("table"), "Table");
        assert_eq!(capitalize(""), "");
    }
}
