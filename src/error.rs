//! 에러 타입 정의 모듈
//!
//! tconvert에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! 코덱/병합 단계의 에러는 모두 동기적으로 호출자에게 전파되며,
//! 내부에서 재시도하거나 무시하지 않습니다.
//!
//! 참고: `SchemaMismatch`의 `source` 필드는 입력 소스 이름(String)이며
//! 에러 체인의 source가 아니므로, thiserror의 암묵적 source 추론을 피하기 위해
//! `Display`/`Error`를 직접 구현합니다.

use std::fmt;
use std::path::PathBuf;

/// tconvert에서 발생할 수 있는 에러 타입
#[derive(Debug)]
pub enum TConvertError {
    /// 입력 경로가 존재하지 않음
    InputNotFound { path: PathBuf },

    /// 출력 파일이 이미 존재 (Error 모드에서)
    OutputExists { path: PathBuf },

    /// 파일 열기/읽기 실패
    FileOpenError { file: PathBuf, reason: String },

    /// 파일 쓰기 실패
    WriteError { reason: String },

    /// JSON 파싱 실패
    ParseError { reason: String },

    /// JSON 직렬화 실패
    SerializeError { reason: String },

    /// 빈 입력 (헤더를 유도할 레코드가 없음)
    EmptyInput { reason: String },

    /// 구분자 형식 행의 필드 수가 헤더와 불일치
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// 값에 구분자 또는 줄바꿈 문자 포함 (인용 미지원)
    DelimiterCollision { row: usize, field: String },

    /// 문서 구조가 기대 스키마와 다름
    SchemaError { reason: String },

    /// 병합 대상 소스 간 스키마 불일치
    SchemaMismatch { source: String },

    /// 병합할 소스가 하나도 없음
    NoInput,

    /// 동일 형식 간 변환 요청 (단순 복사는 변환이 아님)
    UnsupportedConversion { from: String, to: String },

    /// 구조 비교 중 깊이 한도 초과 (순환/과도한 중첩)
    StructuralError { max: usize },

    /// 스레드 풀 초기화 실패
    ThreadPoolError { reason: String },

    /// 유효하지 않은 패턴
    InvalidPattern { pattern: String },

    /// 처리할 파일 없음
    NoFilesFound,
}

impl fmt::Display for TConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputNotFound { path } => {
                write!(f, "입력 경로를 찾을 수 없습니다: {}", path.display())
            }
            Self::OutputExists { path } => {
                write!(f, "출력 파일이 이미 존재합니다: {}", path.display())
            }
            Self::FileOpenError { file, reason } => {
                write!(f, "파일을 읽을 수 없습니다 ({}): {}", file.display(), reason)
            }
            Self::WriteError { reason } => write!(f, "파일 쓰기 실패: {}", reason),
            Self::ParseError { reason } => write!(f, "JSON 파싱 실패: {}", reason),
            Self::SerializeError { reason } => write!(f, "JSON 직렬화 실패: {}", reason),
            Self::EmptyInput { reason } => write!(f, "빈 입력입니다: {}", reason),
            Self::MalformedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "{}행 형식 오류: 헤더 필드 수 {}, 실제 {}",
                line, expected, found
            ),
            Self::DelimiterCollision { row, field } => write!(
                f,
                "{}번 레코드의 '{}' 필드 값에 구분자 또는 줄바꿈이 포함되어 있습니다",
                row, field
            ),
            Self::SchemaError { reason } => write!(f, "스키마 오류: {}", reason),
            Self::SchemaMismatch { source } => write!(
                f,
                "스키마 불일치: '{}' 소스의 레코드 구조가 첫 번째 소스와 다릅니다",
                source
            ),
            Self::NoInput => write!(f, "병합할 입력 소스가 없습니다"),
            Self::UnsupportedConversion { from, to } => {
                write!(f, "지원하지 않는 변환입니다: {} -> {}", from, to)
            }
            Self::StructuralError { max } => {
                write!(f, "구조 비교 깊이 한도({})를 초과했습니다", max)
            }
            Self::ThreadPoolError { reason } => {
                write!(f, "스레드 풀 초기화 실패: {}", reason)
            }
            Self::InvalidPattern { pattern } => write!(f, "유효하지 않은 패턴: {}", pattern),
            Self::NoFilesFound => write!(f, "처리할 입력 파일이 없습니다"),
        }
    }
}

impl std::error::Error for TConvertError {}

/// tconvert 결과 타입 별칭
pub type Result<T> = std::result::Result<T, TConvertError>;
