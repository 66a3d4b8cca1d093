//! tconvert - TABULAR DATA FORMAT CONVERTER
//!
//! CSV와 JSON 간 테이블 데이터를 변환하고, 같은 스키마의 여러 입력을
//! 하나로 병합하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 🔄 **양방향 변환**: CSV(헤더 + 행) ↔ JSON(컨테이너 키 아래 레코드 배열)
//! - 🧩 **폴더 병합**: 같은 형식의 파일들을 스키마 검증 후 하나로 병합
//! - 🔬 **구조 비교**: 값과 무관한 형태 증인 기반 스키마 일치 검증
//! - 🚀 **병렬 디코딩**: Rayon 팬아웃 + 입력 순서 보존 수집
//! - 🔍 **패턴 필터링**: glob 형식의 파일 이름 필터링
//! - 📝 **다양한 출력 모드**: 덮어쓰기, 추가, 에러 모드 지원
//! - 🧪 **드라이런/검사 모드**: 변환 없이 대상 목록 또는 스키마만 확인
//! - 🎨 **컬러 출력**: 가독성 높은 컬러 터미널 출력
//!
//! # 예제
//!
//! ```bash
//! # 단일 파일 변환
//! tconvert -i data.csv -t json
//!
//! # 폴더 내 JSON 파일 병합 후 CSV로 변환
//! tconvert -i ./exports -f json -t csv -o merged.csv
//!
//! # 스키마 검사만
//! tconvert -i ./exports -f json -t csv --check
//! ```

pub mod cli;
pub mod convert;
pub mod delimited;
pub mod equality;
pub mod error;
pub mod merge;
pub mod nested;
pub mod pattern;
pub mod processor;
pub mod stats;

/// 단일 레코드: 필드 이름과 값의 순서 보존 매핑
///
/// 필드 순서가 CSV 헤더 순서를 결정하므로 순서 보존이 필수입니다
/// (serde_json의 `preserve_order` 기능 사용).
pub type Record = serde_json::Map<String, serde_json::Value>;

// Re-exports for convenient access
pub use cli::{Args, WriteMode};
pub use convert::{convert, decode_records, encode_records, ConvertOptions, Format};
pub use equality::is_deep_equal;
pub use error::{Result, TConvertError};
pub use merge::{aggregate, shape_witness, Source};
pub use pattern::SourceFilter;
pub use processor::{process_source, ProcessOptions, SourceResult};
pub use stats::{format_bytes, Statistics};
