use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// One flat row: dotted response path (`pairs.token0.symbol`) to value.
pub type ResultRecord = IndexMap<String, JsonValue>;

/// Flatten `value` into a single record.
///
/// Nested objects become dotted keys. Lists of objects are expanded with the
/// element index as a path segment (`swaps.0.id`), while lists of scalars
/// (and empty lists) are kept whole as leaf values.
pub fn flatten(value: &JsonValue) -> ResultRecord {
    let mut record = ResultRecord::new();
    flatten_into("", value, &mut record);
    record
}

/// Flatten `value` into one record per logical row.
///
/// Every list of objects multiplies the rows it appears in: each element
/// contributes its own row, and sibling lists combine as a cartesian
/// product. Scalar values are repeated on every row they apply to. An empty
/// list contributes no keys but does not remove the row it's in.
pub fn rows(value: &JsonValue) -> Vec<ResultRecord> {
    rows_of("", value)
}

fn flatten_into(prefix: &str, value: &JsonValue, record: &mut ResultRecord) {
    match value {
        JsonValue::Object(map) => {
            for (key, child) in map {
                flatten_into(&join(prefix, key), child, record);
            }
        },
        JsonValue::Array(items) if items.iter().any(JsonValue::is_object) => {
            for (idx, item) in items.iter().enumerate() {
                flatten_into(&join(prefix, &idx.to_string()), item, record);
            }
        },
        leaf => {
            record.insert(prefix.to_string(), leaf.clone());
        },
    }
}

fn rows_of(prefix: &str, value: &JsonValue) -> Vec<ResultRecord> {
    match value {
        JsonValue::Object(map) => {
            let mut acc = vec![ResultRecord::new()];
            for (key, child) in map {
                let child_rows = rows_of(&join(prefix, key), child);
                if child_rows.is_empty() {
                    continue;
                }
                acc = acc.iter()
                    .flat_map(|row| child_rows.iter().map(move |child_row| {
                        let mut combined = row.clone();
                        combined.extend(child_row.iter().map(|(k, v)| (k.to_owned(), v.clone())));
                        combined
                    }))
                    .collect();
            }
            acc
        },
        JsonValue::Array(items) if items.iter().any(JsonValue::is_object) =>
            items.iter().flat_map(|item| rows_of(prefix, item)).collect(),
        JsonValue::Array(items) if items.is_empty() => vec![],
        leaf => {
            let mut row = ResultRecord::new();
            row.insert(prefix.to_string(), leaf.clone());
            vec![row]
        },
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
