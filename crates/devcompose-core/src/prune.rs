use serde_json::Value;

/// Strip absent and empty values from a document tree.
///
/// Map entries whose pruned value is null, `{}` or `[]` are dropped. List
/// elements that prune to null, `{}`, `[]` or `""` are dropped, and a list left
/// empty collapses to null so that its parent entry is dropped too. Scalars
/// pass through.
pub fn prune(node: Value) -> Value {
    match node {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter_map(|(key, value)| {
                    let value = prune(value);
                    (!is_empty(&value)).then_some((key, value))
                })
                .collect(),
        ),
        Value::Array(items) => {
            let kept: Vec<Value> = items
                .into_iter()
                .map(prune)
                .filter(|v| !is_empty(v) && v.as_str() != Some(""))
                .collect();
            if kept.is_empty() {
                Value::Null
            } else {
                Value::Array(kept)
            }
        }
        scalar => scalar,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
