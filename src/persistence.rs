//! Whole-file JSON persistence of the route list.

use crate::schema;
use crate::store::Route;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

/// Read, parse and validate a route document from `path`.
///
/// The file is read whole as UTF-8 text and parsed as JSON; the parsed value
/// is checked by [`schema::validate`] before being decoded into typed
/// records. Every document the schema accepts decodes: `number` may be any
/// JSON number and keys outside the schema are carried along. Any failure
/// (missing file, malformed JSON, schema violation) comes back as an error,
/// and the caller keeps its current list untouched.
pub fn load_routes(path: &Path) -> Result<Vec<Route>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("can't read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    if let Err(violations) = schema::validate(&value) {
        anyhow::bail!("{} failed validation: {}", path.display(), violations[0]);
    }
    let routes: Vec<Route> = serde_json::from_value(value)
        .with_context(|| format!("can't decode routes from {}", path.display()))?;
    Ok(routes)
}

/// Serialize the whole list to `path`, overwriting any existing file.
///
/// Output is pretty-printed JSON with 4-space indentation; non-ASCII text is
/// written literally (serde_json does not escape it), so the file stays
/// readable for Cyrillic route names. No validation happens on save.
pub fn save_routes(path: &Path, routes: &[Route]) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    routes
        .serialize(&mut serializer)
        .context("can't serialize routes")?;
    fs::write(path, &buf).with_context(|| format!("can't write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env as stdenv;
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_unique_temp_path(tag: &str) -> PathBuf {
        let mut p = stdenv::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("routes_{}_{}_{}.json", tag, std::process::id(), nanos));
        p
    }

    fn route(name1: &str, name2: &str, number: i64) -> Route {
        Route {
            name1: name1.to_string(),
            name2: name2.to_string(),
            number: serde_json::Number::from(number),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let path = make_unique_temp_path("round_trip");
        let routes = vec![route("Москва", "Тверь", 2), route("A", "B", 5)];

        save_routes(&path, &routes).unwrap();
        let loaded = load_routes(&path).unwrap();

        assert_eq!(loaded, routes);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_save_uses_four_space_indent_and_literal_cyrillic() {
        let path = make_unique_temp_path("format");
        save_routes(&path, &[route("Москва", "Тверь", 5)]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("    {"));
        assert!(text.contains("        \"name1\": \"Москва\""));
        assert!(!text.contains("\\u"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let path = make_unique_temp_path("missing");
        let err = load_routes(&path).unwrap_err();
        assert!(err.to_string().contains("can't read"));
    }

    #[test]
    fn test_load_malformed_json_errors() {
        let path = make_unique_temp_path("malformed");
        let mut f = fs::File::create(&path).unwrap();
        write!(f, "[{{not json").unwrap();
        drop(f);

        let err = load_routes(&path).unwrap_err();
        assert!(err.to_string().contains("is not valid JSON"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_schema_violation_reports_first_diagnostic() {
        let path = make_unique_temp_path("violation");
        fs::write(&path, r#"[{"name1": "A", "name2": "B"}]"#).unwrap();

        let err = load_routes(&path).unwrap_err();
        assert!(
            err.to_string()
                .contains("'number' is a required property of element 0")
        );

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_accepts_any_schema_valid_number() {
        // A fractional number passes the schema, so it must load too.
        let path = make_unique_temp_path("fractional");
        let text = r#"[{"name1": "A", "name2": "B", "number": 2.5}]"#;
        fs::write(&path, text).unwrap();

        let value: Value = serde_json::from_str(text).unwrap();
        assert!(schema::validate(&value).is_ok());

        let routes = load_routes(&path).unwrap();
        assert_eq!(routes[0].number.as_f64(), Some(2.5));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_keeps_keys_outside_the_schema() {
        let path = make_unique_temp_path("extra_keys");
        fs::write(
            &path,
            r#"[{"name1": "A", "name2": "B", "number": 1, "color": "red"}]"#,
        )
        .unwrap();

        let routes = load_routes(&path).unwrap();
        assert_eq!(
            routes[0].extra.get("color"),
            Some(&serde_json::json!("red"))
        );

        save_routes(&path, &routes).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"color\": \"red\""));

        let _ = fs::remove_file(path);
    }
}
