use anyhow::{Context, Result, anyhow};
use schemars::Schema;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

/// One promptable property of a struct schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: FieldKind,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Allowed values of a string enum; empty for free text.
    pub choices: Vec<String>,
}

/// Lists the properties of a struct schema that map to a prompt. Properties
/// marked `skip` are absent from the schema and so are never asked.
pub fn field_specs(root: &Schema) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;
    let props = root_obj
        .get("properties")
        .and_then(|v| v.as_object())
        .context("schema has no properties")?;

    let mut out = Vec::new();
    for (name, field_schema) in props {
        let field_obj = field_schema
            .as_object()
            .context("field schema not object")?;
        let resolved = resolve_ref_obj(root_obj, field_obj)
            .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;

        let lookup = |key: &str| field_obj.get(key).or_else(|| resolved.get(key));

        let title = lookup("title")
            .and_then(|v| v.as_str())
            .unwrap_or(name)
            .to_string();
        let description = lookup("description")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let choices = enum_choices(resolved);
        let kind = if choices.is_empty() {
            match detect_field_kind(resolved.get("type")) {
                Some(kind) => kind,
                None => continue,
            }
        } else {
            FieldKind::String
        };

        let min = lookup("minimum")
            .or_else(|| lookup("exclusiveMinimum"))
            .and_then(|v| v.as_f64());
        let max = lookup("maximum")
            .or_else(|| lookup("exclusiveMaximum"))
            .and_then(|v| v.as_f64());

        out.push(FieldSpec {
            name: name.clone(),
            title,
            description,
            kind,
            min,
            max,
            choices,
        });
    }
    Ok(out)
}

/// String values of `enum`, or the `const` of each `oneOf` branch (the form
/// used when variants carry doc comments).
fn enum_choices(obj: &Map<String, Value>) -> Vec<String> {
    if let Some(arr) = obj.get("enum").and_then(|v| v.as_array()) {
        return arr
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
    }
    obj.get("oneOf")
        .and_then(|v| v.as_array())
        .map(|branches| {
            branches
                .iter()
                .filter_map(|b| {
                    let b = b.as_object()?;
                    b.get("const").and_then(|v| v.as_str()).map(str::to_string).or_else(|| {
                        match b.get("enum")?.as_array()?.as_slice() {
                            [single] => single.as_str().map(str::to_string),
                            _ => None,
                        }
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Resolve a local $ref like "#/$defs/SplitCriterionKind" against the root
/// object. Objects without a $ref resolve to themselves.
fn resolve_ref_obj<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            let mut cur: &Map<String, Value> = root_obj;
            for raw_seg in path.split('/') {
                // JSON Pointer unescape (~1 => /, ~0 => ~)
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur = cur.get(&seg)?.as_object()?;
            }
            Some(cur)
        }
        _ => Some(obj),
    }
}

fn kind_from_name(s: &str) -> Option<FieldKind> {
    match s {
        "string" => Some(FieldKind::String),
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        "boolean" => Some(FieldKind::Boolean),
        _ => None,
    }
}

fn detect_field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    match ty {
        Some(Value::String(s)) => kind_from_name(s),
        // unions like ["null","integer"] for Option<T>
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|v| v.as_str())
            .find_map(kind_from_name),
        _ => None,
    }
}
