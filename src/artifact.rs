//! The published snapshot: a pretty-printed JSON array of canonical activities.

use crate::activity::CanonicalActivity;
use crate::error::{ArtifactError, DataFormatError};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Render activities exactly as they are written to disk.
pub fn render(activities: &[CanonicalActivity]) -> Result<String, ArtifactError> {
    let mut body = serde_json::to_string_pretty(activities)
        .map_err(|e| ArtifactError::Serialize(e.to_string()))?;
    body.push('\n');
    Ok(body)
}

/// Replace the artifact at `path` in one step.
///
/// The body goes to a sibling `.tmp` file first and is renamed over the
/// target, so readers see either the old snapshot or the new one.
pub fn write(path: &Path, activities: &[CanonicalActivity]) -> Result<(), ArtifactError> {
    let body = render(activities)?;
    let write_err = |source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, body).map_err(write_err)?;
    fs::rename(tmp, path).map_err(write_err)?;
    Ok(())
}

/// Parse an artifact body. The top level must be an array of activities.
pub fn parse(body: &str) -> Result<Vec<CanonicalActivity>, DataFormatError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| DataFormatError::InvalidJson(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(DataFormatError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| DataFormatError::WrongShape(format!("activity #{index}: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn activity(id: &str) -> CanonicalActivity {
        CanonicalActivity {
            id: id.into(),
            name: "储蓄卡签到".into(),
            description: "暂无描述".into(),
            icon: "🏦".into(),
            link: "#".into(),
            categories: vec!["Bank".into()],
            source_app: "招商银行".into(),
            target_app: "招商银行".into(),
            special_note: None,
            end_date: None,
            steps_text: None,
        }
    }

    #[test]
    fn render_is_pretty_and_newline_terminated() {
        let body = render(&[activity("rec1")]).unwrap();
        assert!(body.starts_with("[\n  {\n    \"id\": \"rec1\""));
        assert!(body.ends_with("]\n"));
    }

    #[test]
    fn write_creates_parents_and_leaves_no_tmp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("public").join("activities.json");
        write(&path, &[activity("rec1"), activity("rec2")]).unwrap();

        let parsed = parse(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(!dir.path().join("public").join("activities.json.tmp").exists());
    }

    #[test]
    fn object_top_level_is_not_an_array() {
        let err = parse(r#"{"records": []}"#).unwrap_err();
        assert!(matches!(err, DataFormatError::NotAnArray));
    }

    #[test]
    fn truncated_body_is_invalid_json() {
        let err = parse(r#"[{"id": "rec1""#).unwrap_err();
        assert!(matches!(err, DataFormatError::InvalidJson(_)));
    }

    #[test]
    fn wrong_element_shape_names_the_index() {
        let err = parse(r#"[{"id": "a", "name": "ok"}, 42]"#).unwrap_err();
        match err {
            DataFormatError::WrongShape(msg) => assert!(msg.contains("#1")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse("[]").unwrap().is_empty());
    }
}
