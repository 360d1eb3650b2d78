use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Columns pushed to the end of list tables.
const TRAILING_COLUMNS: &[&str] = &["created_at", "updated_at"];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    Ok(match value {
        Value::Array(items) => render_rows(&items),
        Value::Object(map) => {
            let mut fields = Vec::new();
            let mut lists = Vec::new();
            flatten_into("", &map, &mut fields, &mut lists);
            let mut out =
                table::render_entity_table(&["field", "value"], &fields, table_options());
            for (key, items) in lists {
                out.push_str(&format!("\n\n{key}:\n{}", render_rows(items)));
            }
            out
        }
        scalar => table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            table_options(),
        ),
    })
}

/// Nested objects become dotted keys (`issue.title`). Lists of objects are
/// collected into `lists` and rendered as their own tables.
fn flatten_into<'a>(
    prefix: &str,
    map: &'a Map<String, Value>,
    fields: &mut Vec<Vec<String>>,
    lists: &mut Vec<(String, &'a [Value])>,
) {
    for (key, value) in map {
        let key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(&key, inner, fields, lists),
            Value::Array(items) if items.iter().any(Value::is_object) => lists.push((key, items.as_slice())),
            other => fields.push(vec![key, value_to_cell(other)]),
        }
    }
}

fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, table_options());
    }

    let headers = column_order(items);
    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

/// Union of keys: `id` first, timestamps last, the rest sorted.
fn column_order(items: &[Value]) -> Vec<String> {
    let mut keys = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    keys.sort_by_key(|key| {
        let rank = if key == "id" {
            0
        } else if TRAILING_COLUMNS.contains(&key.as_str()) {
            2
        } else {
            1
        };
        (rank, key.clone())
    });
    keys
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::{column_order, render, value_to_cell};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        hours: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "x", hours: 7 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert_eq!(parsed["hours"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "x", hours: 7 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn nested_objects_flatten_to_dotted_fields() {
        let value = json!({
            "issue": { "number": 12, "title": "Fix login" },
            "labels": ["bug", "backend"],
            "task": null,
        });
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("field")));
        assert!(out.contains("issue.title"));
        assert!(out.contains("bug, backend"));
    }

    #[test]
    fn nested_lists_render_as_their_own_table() {
        let value = json!({
            "project": "site",
            "days": [{"date": "02/03/26", "total_hours": "3:00:00"}],
        });
        let out = render(&value, OutputFormat::Table).unwrap();
        let (fields, days) = out.split_once("\n\ndays:\n").expect("days section");
        assert!(fields.contains("project"));
        assert!(days.starts_with("date"));
        assert!(days.contains("02/03/26"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let out = render(&Vec::<Example>::new(), OutputFormat::Table).unwrap();
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn columns_put_id_first_and_timestamps_last() {
        let items = vec![
            json!({"updated_at": "t", "title": "a", "id": "tsk-1"}),
            json!({"created_at": "t", "status": "open", "id": "tsk-2"}),
        ];
        assert_eq!(
            column_order(&items),
            vec!["id", "status", "title", "created_at", "updated_at"]
        );
    }

    #[test]
    fn null_cells_render_as_dash() {
        assert_eq!(value_to_cell(&serde_json::Value::Null), "-");
    }
}
