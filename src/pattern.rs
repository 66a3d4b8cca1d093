//! 소스 필터링 모듈
//!
//! 폴더 병합 시 소스 형식의 확장자 검사와 glob 패턴으로 입력 파일을
//! 선별합니다.

use glob::Pattern;
use std::path::Path;

use crate::convert::Format;
use crate::error::{Result, TConvertError};

/// 확장자 + 패턴 기반 소스 필터
pub struct SourceFilter {
    format: Format,
    pattern: Option<Pattern>,
}

impl SourceFilter {
    /// 새 소스 필터 생성
    ///
    /// # Arguments
    /// * `format` - 소스 형식 (확장자가 일치하는 파일만 선별)
    /// * `pattern` - 글로브 패턴 문자열 (None이면 확장자만 검사)
    ///
    /// # Examples
    /// ```
    /// use tconvert::convert::Format;
    /// use tconvert::pattern::SourceFilter;
    ///
    /// let filter = SourceFilter::new(Format::Json, Some("part_*".to_string())).unwrap();
    /// assert!(filter.matches("part_1.json"));
    /// assert!(!filter.matches("part_1.csv"));
    /// assert!(!filter.matches("other.json"));
    /// ```
    pub fn new(format: Format, pattern: Option<String>) -> Result<Self> {
        let compiled = match pattern {
            Some(ref p) => Some(
                Pattern::new(p)
                    .map_err(|_| TConvertError::InvalidPattern { pattern: p.clone() })?,
            ),
            None => None,
        };

        Ok(Self {
            format,
            pattern: compiled,
        })
    }

    /// 파일 이름이 소스 형식의 확장자와 패턴 모두에 일치하는지 확인
    pub fn matches(&self, file_name: &str) -> bool {
        let ext_ok = Path::new(file_name)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.eq_ignore_ascii_case(self.format.extension()))
            .unwrap_or(false);

        if !ext_ok {
            return false;
        }

        match &self.pattern {
            Some(p) => p.matches(file_name),
            None => true,
        }
    }

    /// 패턴이 설정되어 있는지 확인
    pub fn has_pattern(&self) -> bool {
        self.pattern.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_only() {
        let filter = SourceFilter::new(Format::Csv, None).unwrap();
        assert!(filter.matches("data.csv"));
        assert!(filter.matches("DATA.CSV"));
        assert!(!filter.matches("data.json"));
        assert!(!filter.matches("data"));
    }

    #[test]
    fn test_extension_and_pattern() {
        let filter = SourceFilter::new(Format::Json, Some("export_*".to_string())).unwrap();
        assert!(filter.matches("export_2024.json"));
        assert!(!filter.matches("export_2024.csv"));
        assert!(!filter.matches("backup_2024.json"));
    }

    #[test]
    fn test_pattern_question_mark() {
        let filter = SourceFilter::new(Format::Csv, Some("part?.csv".to_string())).unwrap();
        assert!(filter.matches("part1.csv"));
        assert!(!filter.matches("part12.csv"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = SourceFilter::new(Format::Csv, Some("[invalid".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_has_pattern() {
        let with_pattern = SourceFilter::new(Format::Csv, Some("*.csv".to_string())).unwrap();
        let without_pattern = SourceFilter::new(Format::Csv, None).unwrap();

        assert!(with_pattern.has_pattern());
        assert!(!without_pattern.has_pattern());
    }
}
