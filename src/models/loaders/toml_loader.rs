use crate::error::{AppResult, FileError};
use crate::models::rubric::SlrRubric;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载评审标准
///
/// 字段名与 [`SlrRubric`] 相同，缺少任何字段都视为解析失败。
pub async fn load_rubric_toml(toml_file_path: &Path) -> AppResult<SlrRubric> {
    let path_display = toml_file_path.display().to_string();

    if !toml_file_path.exists() {
        return Err(FileError::NotFound { path: path_display }.into());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: path_display.clone(),
            source,
        })?;

    let rubric: SlrRubric = toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
        path: path_display.clone(),
        source,
    })?;

    tracing::info!(
        "✓ 已加载评审标准: {} ({} 个研究问题)",
        rubric.title,
        rubric.research_questions.len()
    );

    Ok(rubric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    const RUBRIC_TOML: &str = r#"
title = "Edge AI Deployment Review"
research_questions = ["RQ1: Where?", "RQ2: How?", "RQ3: Why?"]
inclusion_criteria = ["IC1: Deployed systems"]
exclusion_criteria = ["EC1: Surveys"]
time_period = "2020-2024"
data_extraction_fields = ["Hardware", "Latency"]
"#;

    #[tokio::test]
    async fn test_load_rubric_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rubric.toml");
        std::fs::write(&path, RUBRIC_TOML).unwrap();

        let rubric = load_rubric_toml(&path).await.unwrap();
        assert_eq!(rubric.title, "Edge AI Deployment Review");
        assert_eq!(rubric.research_questions.len(), 3);
        assert_eq!(rubric.data_extraction_fields, vec!["Hardware", "Latency"]);
    }

    #[tokio::test]
    async fn test_load_rubric_toml_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rubric.toml");
        std::fs::write(&path, "title = \"Only a title\"\n").unwrap();

        let err = load_rubric_toml(&path).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::File(FileError::TomlParseFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_rubric_toml_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rubric_toml(&dir.path().join("missing.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }
}
