// Config parsing & validation against a processor's parameter declarations.

use std::collections::{HashMap, HashSet};

use zeekline_api::config::{ConfigParam, ConfigValues, ParamType, ParamValue};

use crate::error::EngineError;

/// Parse a processor config block into typed key-value pairs.
///
/// - Rejects unknown keys (not declared in `params`).
/// - Converts `toml::Value` → `ParamValue` based on declared `ParamType`.
///
/// Returns only the keys present in the block. Defaults and required-checks
/// are handled by `validate_and_build`.
pub fn parse_processor_config(
    config: Option<&toml::Value>,
    params: &[ConfigParam],
) -> Result<HashMap<String, ParamValue>, EngineError> {
    let table = match config {
        Some(toml::Value::Table(table)) => table,
        Some(_) => {
            return Err(EngineError::Config(
                "processor config must be a table".into(),
            ))
        }
        None => return Ok(HashMap::new()),
    };

    let known: HashSet<&str> = params.iter().map(|p| p.name.as_str()).collect();
    if let Some(key) = table.keys().find(|k| !known.contains(k.as_str())) {
        return Err(EngineError::Config(format!("unknown parameter '{key}'")));
    }

    let mut result = HashMap::new();
    for param in params {
        if let Some(v) = table.get(&param.name) {
            result.insert(param.name.clone(), value_to_param_value(v, param)?);
        }
    }
    Ok(result)
}

/// Build `ConfigValues` from parsed key-value pairs.
///
/// For each declared param:
/// - If present in `parsed`: use the value.
/// - If absent with default: use default value.
/// - If absent and required: return error.
pub fn validate_and_build(
    parsed: &HashMap<String, ParamValue>,
    params: &[ConfigParam],
) -> Result<ConfigValues, EngineError> {
    let mut values = ConfigValues::new();
    for param in params {
        match (parsed.get(&param.name), &param.default) {
            (Some(v), _) => values.set(&param.name, v.clone()),
            (None, Some(default)) => values.set(&param.name, default.clone()),
            (None, None) if param.required => {
                return Err(EngineError::Config(format!(
                    "missing required parameter '{}'",
                    param.name
                )));
            }
            (None, None) => {}
        }
    }
    Ok(values)
}

/// Both steps at once.
pub fn build_config_values(
    config: Option<&toml::Value>,
    params: &[ConfigParam],
) -> Result<ConfigValues, EngineError> {
    let parsed = parse_processor_config(config, params)?;
    validate_and_build(&parsed, params)
}

fn value_to_param_value(val: &toml::Value, param: &ConfigParam) -> Result<ParamValue, EngineError> {
    let mismatch = |expected: &str| {
        EngineError::Config(format!(
            "parameter '{}': expected {expected}, got {}",
            param.name,
            val.type_str()
        ))
    };
    match param.param_type {
        ParamType::U64 => {
            let i = val.as_integer().ok_or_else(|| mismatch("integer"))?;
            u64::try_from(i).map(ParamValue::U64).map_err(|_| {
                EngineError::Config(format!(
                    "parameter '{}': expected non-negative integer, got {i}",
                    param.name
                ))
            })
        }
        ParamType::Str => val
            .as_str()
            .map(|s| ParamValue::Str(s.to_string()))
            .ok_or_else(|| mismatch("string")),
    }
}
