use serde_json::Value;
use tracing::warn;

use crate::record::Record;

const SUCCESS_CODE: i64 = 200;

/// Flatten one API page into records plus the total result count for the
/// (category, year) pair. Anything other than a well-formed success page
/// yields `([], 0)`.
pub fn extract(page: Option<&Value>, max_results: u64) -> (Vec<Record>, u64) {
    let Some(page) = page else {
        return (Vec::new(), 0);
    };
    if page.get("code").and_then(Value::as_i64) != Some(SUCCESS_CODE) {
        return (Vec::new(), 0);
    }

    let result_num = page.get("resultNum").and_then(as_u64).unwrap_or(0);
    if result_num > max_results {
        warn!(result_num, max_results, "Result count exceeds ceiling");
    }

    let records: Vec<Record> = page
        .get("body")
        .and_then(|b| b.get("data"))
        .and_then(Value::as_array)
        .map(|items| items.iter().map(to_record).collect())
        .unwrap_or_default();

    (records, result_num)
}

fn to_record(item: &Value) -> Record {
    Record {
        p_id: field(item, "pID"),
        name: field(item, "name").trim().to_string(),
        score: field(item, "score").trim().to_string(),
        year: field(item, "year").trim().to_string(),
        content_style: field(item, "contentStyle").trim().to_string(),
        cont_display_name: field(item, "contDisplayName").trim().to_string(),
    }
}

/// Strings pass through, numbers and bools are rendered, the rest is empty.
fn field(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn as_u64(v: &Value) -> Option<u64> {
    v.as_u64().or_else(|| v.as_str()?.trim().parse().ok())
}
