//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::convert::Format;

/// 출력 파일 모드
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum WriteMode {
    /// 기존 파일이 있으면 덮어쓰기
    #[default]
    Overwrite,
    /// 기존 파일에 추가
    Append,
    /// 기존 파일이 있으면 에러
    Error,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Overwrite => write!(f, "Overwrite"),
            WriteMode::Append => write!(f, "Append"),
            WriteMode::Error => write!(f, "Error"),
        }
    }
}

/// tconvert CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "tconvert",
    author = "YourName <your@email.com>",
    version,
    about = "TABULAR DATA FORMAT CONVERTER - CSV와 JSON 간 테이블 데이터를 변환하고 병합하는 CLI 도구",
    long_about = r#"
TABULAR DATA FORMAT CONVERTER
=============================

CSV(헤더 + 쉼표 구분 행)와 JSON(컨테이너 키 아래 레코드 배열) 간
테이블 데이터를 변환합니다. 입력이 폴더이면 같은 형식의 파일들을
스키마 검증 후 하나로 병합하여 변환합니다.

특징:
  • 폴더 병합 시 소스 간 스키마 일치 검증
  • 병렬 디코딩 (결과는 항상 입력 순서 유지)
  • 다양한 출력 모드 지원 (덮어쓰기/추가/에러)
  • glob 패턴으로 입력 파일 필터링
  • 스키마 검사 전용 모드

예제:
  tconvert -i data.csv -t json
  tconvert -i ./exports -f json -t csv -o merged.csv
  tconvert -i ./exports -t csv --pattern "part_*" --verbose
  tconvert -i ./exports -f json -t csv --check
  tconvert -i data.json -t csv --data-key rows
"#
)]
pub struct Args {
    /// 입력 경로 (파일 하나 또는 병합할 파일들이 있는 폴더)
    #[arg(short, long)]
    pub input: PathBuf,

    /// 출력 파일 경로 (기본값: 타임스탬프 기반 자동 생성)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 소스 형식 (생략 시 입력 확장자에서 추론, 폴더면 타깃의 반대 형식)
    #[arg(short = 'f', long, value_enum)]
    pub from: Option<Format>,

    /// 타깃 형식
    #[arg(short = 't', long, value_enum)]
    pub to: Format,

    /// 출력 파일 모드
    #[arg(short, long, value_enum, default_value_t = WriteMode::Overwrite)]
    pub mode: WriteMode,

    /// 중첩 형식의 레코드 배열 컨테이너 키
    #[arg(long, default_value = "data")]
    pub data_key: String,

    /// 파일 이름 패턴 필터 (glob 형식, 폴더 입력 시 적용)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 변환 없이 처리될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 디코딩과 스키마 검증만 수행 (출력 없음)
    #[arg(long)]
    pub check: bool,

    /// 중첩 형식 출력 시 들여쓰기 적용
    #[arg(long)]
    pub pretty: bool,

    /// 병렬 처리 스레드 수 (기본값: CPU 코어 수)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// 최대 폴더 탐색 깊이
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// 에러 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,
}

impl Args {
    /// 소스 형식 결정
    ///
    /// 우선순위: `--from` 플래그, 입력 파일 확장자, 타깃의 반대 형식.
    pub fn resolve_from(&self) -> Format {
        if let Some(from) = self.from {
            return from;
        }

        Format::from_path(&self.input).unwrap_or_else(|| self.to.counterpart())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(input: &str, from: Option<Format>, to: Format) -> Args {
        Args {
            input: PathBuf::from(input),
            output: None,
            from,
            to,
            mode: WriteMode::Overwrite,
            data_key: "data".to_string(),
            pattern: None,
            verbose: false,
            dry_run: false,
            check: false,
            pretty: false,
            threads: None,
            max_depth: None,
            log: None,
        }
    }

    #[test]
    fn test_resolve_from_explicit_flag() {
        let args = args_with("data.csv", Some(Format::Json), Format::Csv);
        assert_eq!(args.resolve_from(), Format::Json);
    }

    #[test]
    fn test_resolve_from_extension() {
        let args = args_with("data.csv", None, Format::Json);
        assert_eq!(args.resolve_from(), Format::Csv);
    }

    #[test]
    fn test_resolve_from_folder_counterpart() {
        let args = args_with("./exports", None, Format::Csv);
        assert_eq!(args.resolve_from(), Format::Json);
    }
}
