//! Built-in format parsers.
//!
//! Each parser reads a whole file and converts the decoded document into a
//! [`serde_json::Value`] tree. Decoder errors are reported as
//! [`Error::ParseFailure`] tagged with the parser's [`Format`].

use std::fs;
use std::path::Path;

use ini::{Ini, ParseOption, Properties};
use serde_json::map::Entry;
use serde_json::{Map, Value};

use super::Parser;
use crate::error::{Error, Format, Result};

/// Parser for TOML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlParser;

impl Parser for TomlParser {
    fn parse(&self, path: &Path) -> Result<Value> {
        let contents = fs::read_to_string(path)?;
        let table: toml::Table = toml::from_str(&contents)
            .map_err(|e| Error::parse_failure(path, Format::Toml, e))?;
        Ok(from_toml(toml::Value::Table(table)))
    }
}

fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, from_toml(value)))
                .collect(),
        ),
    }
}

/// Parser for JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, path: &Path) -> Result<Value> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| Error::parse_failure(path, Format::Json, e))
    }
}

/// Parser for INI files.
///
/// Sections become nested objects and keys outside any section land at the
/// root. All values are strings. Keys written as `name[]` accumulate into a
/// sequence under `name`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IniParser;

impl Parser for IniParser {
    fn parse(&self, path: &Path) -> Result<Value> {
        let contents = fs::read_to_string(path)?;
        let options = ParseOption {
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(&contents, options)
            .map_err(|e| Error::parse_failure(path, Format::Ini, e))?;

        let mut root = Map::new();
        for (section, properties) in ini.iter() {
            let entries = ini_properties(properties);
            match section {
                None => root.extend(entries),
                Some(name) => match root
                    .entry(name)
                    .or_insert_with(|| Value::Object(Map::new()))
                {
                    Value::Object(existing) => existing.extend(entries),
                    other => *other = Value::Object(entries),
                },
            }
        }
        Ok(Value::Object(root))
    }
}

fn ini_properties(properties: &Properties) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in properties.iter() {
        let value = Value::String(value.to_string());
        match key.strip_suffix("[]") {
            Some(name) => match map
                .entry(name)
                .or_insert_with(|| Value::Array(Vec::new()))
            {
                Value::Array(items) => items.push(value),
                other => *other = Value::Array(vec![value]),
            },
            None => {
                map.insert(key.to_string(), value);
            }
        }
    }
    map
}

/// Parser for XML documents.
///
/// The root element's children become the top-level object. Repeated sibling
/// names collect into a sequence, text-only elements become strings and
/// attributes are kept under `@attributes`. Every scalar is text.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

/// Key under which element attributes are stored.
pub const XML_ATTRIBUTES_KEY: &str = "@attributes";

impl Parser for XmlParser {
    fn parse(&self, path: &Path) -> Result<Value> {
        let contents = fs::read_to_string(path)?;
        let document = roxmltree::Document::parse(&contents)
            .map_err(|e| Error::parse_failure(path, Format::Xml, e))?;
        Ok(xml_element(document.root_element()))
    }
}

fn xml_element(node: roxmltree::Node<'_, '_>) -> Value {
    let mut map = Map::new();

    let attributes: Map<String, Value> = node
        .attributes()
        .map(|attr| (attr.name().to_string(), Value::String(attr.value().to_string())))
        .collect();
    if !attributes.is_empty() {
        map.insert(XML_ATTRIBUTES_KEY.to_string(), Value::Object(attributes));
    }

    let mut has_elements = false;
    for child in node.children().filter(roxmltree::Node::is_element) {
        has_elements = true;
        let value = xml_element(child);
        match map.entry(child.tag_name().name()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(items) => items.push(value),
                existing => {
                    let first = std::mem::take(existing);
                    *existing = Value::Array(vec![first, value]);
                }
            },
        }
    }

    if !has_elements {
        let text: String = node
            .children()
            .filter(roxmltree::Node::is_text)
            .filter_map(|child| child.text())
            .collect();
        if !text.trim().is_empty() {
            if map.is_empty() {
                return Value::String(text);
            }
            map.insert("0".to_string(), Value::String(text));
        }
    }

    Value::Object(map)
}

/// Parser for YAML documents.
///
/// Merge keys (`<<: *anchor`) are resolved, mapping keys that are not
/// strings are converted to their textual form and tagged values are
/// unwrapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl Parser for YamlParser {
    fn parse(&self, path: &Path) -> Result<Value> {
        let contents = fs::read_to_string(path)?;
        let mut value: serde_yaml::Value = serde_yaml::from_str(&contents)
            .map_err(|e| Error::parse_failure(path, Format::Yaml, e))?;
        value
            .apply_merge()
            .map_err(|e| Error::parse_failure(path, Format::Yaml, e))?;
        Ok(from_yaml(value))
    }
}

fn from_yaml(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64().map_or(Value::Null, Value::from)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(from_yaml).collect())
        }
        serde_yaml::Value::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), from_yaml(value)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
