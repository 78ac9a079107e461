//! Structural query validation.
//!
//! One recursive validator walks the query tree, driven by the static table of
//! [`KeyRule`]s below. A key whose name has no rule (the operator bodies under
//! WHERE, the entries of COLUMNS) is accepted here and checked when the query
//! is compiled.
//!
//! Validation stops at the first violation and the error names the key.

use crate::resolver::is_apply_name;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use insight_core::{Error, Result};
use insight_json::{JsonObject, JsonValue};

/// Name of the rule applied to a whole query.
pub const ROOT_RULE: &str = "QUERY";

/// Expected value type of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleKind {
    Object,
    Array,
    String,
}

impl RuleKind {
    fn name(&self) -> &'static str {
        match self {
            RuleKind::Object => "an object",
            RuleKind::Array => "an array",
            RuleKind::String => "a string",
        }
    }
}

/// Validation rule for the value stored under one key.
#[derive(Clone, Copy, Debug)]
pub struct KeyRule {
    pub key: &'static str,
    pub kind: RuleKind,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    /// Arrays need an element, objects need a key.
    pub non_empty: bool,
    pub max_keys: Option<usize>,
    /// Rule applied to every array element, or to the value of every apply-name
    /// key of an object.
    pub element: Option<&'static str>,
    /// A bare string is accepted as `{dir: "UP", keys: [string]}`.
    pub string_shorthand: bool,
}

impl KeyRule {
    const fn new(key: &'static str, kind: RuleKind) -> Self {
        Self {
            key,
            kind,
            required: &[],
            optional: &[],
            non_empty: false,
            max_keys: None,
            element: None,
            string_shorthand: false,
        }
    }

    const fn required(mut self, keys: &'static [&'static str]) -> Self {
        self.required = keys;
        self
    }

    const fn optional(mut self, keys: &'static [&'static str]) -> Self {
        self.optional = keys;
        self
    }

    const fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    const fn max_keys(mut self, n: usize) -> Self {
        self.max_keys = Some(n);
        self
    }

    const fn element(mut self, rule: &'static str) -> Self {
        self.element = Some(rule);
        self
    }

    const fn string_shorthand(mut self) -> Self {
        self.string_shorthand = true;
        self
    }

    fn declares(&self, key: &str) -> bool {
        self.required.iter().chain(self.optional).any(|k| *k == key)
    }
}

// Apply entries and apply rule objects are never looked up by key; their
// rule names contain an underscore so no query key can reach them.
const APPLY_ENTRY: &str = "APPLY_ENTRY";
const APPLY_RULE: &str = "APPLY_RULE";

/// The rule table.
pub static RULES: [KeyRule; 12] = [
    KeyRule::new(ROOT_RULE, RuleKind::Object)
        .required(&["WHERE", "OPTIONS"])
        .optional(&["TRANSFORMATIONS"]),
    KeyRule::new("WHERE", RuleKind::Object)
        .optional(&["AND", "OR", "LT", "GT", "EQ", "IS", "NOT"])
        .max_keys(1),
    KeyRule::new("OPTIONS", RuleKind::Object)
        .required(&["COLUMNS"])
        .optional(&["ORDER"])
        .max_keys(2),
    KeyRule::new("COLUMNS", RuleKind::Array).non_empty(),
    KeyRule::new("ORDER", RuleKind::Object)
        .required(&["dir", "keys"])
        .string_shorthand(),
    KeyRule::new("dir", RuleKind::String),
    KeyRule::new("keys", RuleKind::Array).non_empty(),
    KeyRule::new("TRANSFORMATIONS", RuleKind::Object).required(&["GROUP", "APPLY"]),
    KeyRule::new("GROUP", RuleKind::Array).non_empty(),
    KeyRule::new("APPLY", RuleKind::Array).element(APPLY_ENTRY),
    KeyRule::new(APPLY_ENTRY, RuleKind::Object)
        .non_empty()
        .max_keys(1)
        .element(APPLY_RULE),
    KeyRule::new(APPLY_RULE, RuleKind::Object)
        .optional(&["MAX", "MIN", "AVG", "SUM", "COUNT"])
        .non_empty()
        .max_keys(1),
];

/// Looks up the rule for a key.
pub fn rule_for(key: &str) -> Option<&'static KeyRule> {
    RULES.iter().find(|rule| rule.key == key)
}

/// Validates the structure of a whole query.
pub fn validate_query(query: &JsonValue) -> Result<()> {
    match rule_for(ROOT_RULE) {
        Some(rule) => validate(rule, query),
        None => Err(Error::validation("No rule for the query root")),
    }
}

/// Validates a value against a rule, recursing into nested rules.
pub fn validate(rule: &KeyRule, value: &JsonValue) -> Result<()> {
    if rule.string_shorthand {
        if let Some(key) = value.as_str() {
            return validate(rule, &expand_order_shorthand(key));
        }
    }

    match rule.kind {
        RuleKind::String => {
            if value.is_string() {
                Ok(())
            } else {
                Err(type_error(rule, value))
            }
        }
        RuleKind::Array => {
            let items = value.as_array().ok_or_else(|| type_error(rule, value))?;
            if rule.non_empty && items.is_empty() {
                return Err(Error::validation(format!(
                    "{} must be a non-empty array",
                    rule.key
                )));
            }
            if let Some(element) = rule.element.and_then(rule_for) {
                for item in items {
                    validate(element, item)?;
                }
            }
            Ok(())
        }
        RuleKind::Object => {
            let obj = value.as_object().ok_or_else(|| type_error(rule, value))?;
            validate_object(rule, obj)
        }
    }
}

fn validate_object(rule: &KeyRule, obj: &JsonObject) -> Result<()> {
    if rule.non_empty && obj.is_empty() {
        return Err(Error::validation(format!("{} must not be empty", rule.key)));
    }
    if let Some(max) = rule.max_keys {
        if obj.len() > max {
            return Err(Error::validation(format!(
                "{} expects at most {} key(s), found {}",
                rule.key,
                max,
                obj.len()
            )));
        }
    }

    let mut validated = 0;
    for &key in rule.required {
        let value = obj
            .get(key)
            .ok_or_else(|| Error::validation(format!("{} missing {}", rule.key, key)))?;
        validate_key(key, value)?;
        validated += 1;
    }
    for &key in rule.optional {
        if let Some(value) = obj.get(key) {
            validate_key(key, value)?;
            validated += 1;
        }
    }
    if let Some(element) = rule.element.and_then(rule_for) {
        for (key, value) in obj.iter().filter(|(k, _)| !rule.declares(k)) {
            if !is_apply_name(key) {
                return Err(Error::validation(format!("Invalid apply name {:?}", key)));
            }
            validate(element, value)?;
            validated += 1;
        }
    }

    if validated != obj.len() {
        let unknown = obj
            .keys()
            .find(|k| !rule.declares(k))
            .map(|k| k.to_string())
            .unwrap_or_default();
        return Err(Error::validation(format!(
            "Invalid key {} in {}",
            unknown, rule.key
        )));
    }
    Ok(())
}

fn validate_key(key: &str, value: &JsonValue) -> Result<()> {
    match rule_for(key) {
        Some(rule) => validate(rule, value),
        None => Ok(()),
    }
}

fn type_error(rule: &KeyRule, value: &JsonValue) -> Error {
    Error::validation(format!(
        "{} must be {}, found {}",
        rule.key,
        rule.kind.name(),
        value.type_name()
    ))
}

/// Expands the ORDER string shorthand.
pub fn expand_order_shorthand(key: &str) -> JsonValue {
    let mut obj = JsonObject::with_capacity(2);
    obj.insert(String::from("dir"), JsonValue::from("UP"));
    obj.insert(String::from("keys"), JsonValue::from(vec![JsonValue::from(key)]));
    JsonValue::Object(obj)
}
