//! 변환 오케스트레이터 모듈
//!
//! 소스/타깃 형식에 따라 알맞은 코덱 쌍으로 디스패치합니다.
//! 저장소 입출력은 여기서 다루지 않습니다.

use clap::ValueEnum;
use std::path::Path;

use crate::error::{Result, TConvertError};
use crate::nested::DEFAULT_DATA_KEY;
use crate::{delimited, nested, Record};

/// 지원하는 데이터 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// 구분자 형식 (헤더 + 쉼표 구분 행)
    Csv,
    /// 중첩 형식 (컨테이너 키 아래 레코드 배열)
    Json,
}

impl Format {
    /// 형식에 해당하는 파일 확장자
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }

    /// 반대쪽 형식 (형식이 둘뿐이므로 유일하게 결정됨)
    pub fn counterpart(&self) -> Format {
        match self {
            Format::Csv => Format::Json,
            Format::Json => Format::Csv,
        }
    }

    /// 파일 확장자로부터 형식 추론
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(Format::Csv)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Format::Json)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Csv => write!(f, "CSV"),
            Format::Json => write!(f, "JSON"),
        }
    }
}

/// 변환 옵션
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// 중첩 형식의 컨테이너 키
    pub data_key: String,
    /// 중첩 형식 출력 시 들여쓰기 여부
    pub pretty: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            data_key: DEFAULT_DATA_KEY.to_string(),
            pretty: false,
        }
    }
}

impl ConvertOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 컨테이너 키 설정
    pub fn with_data_key(mut self, data_key: impl Into<String>) -> Self {
        self.data_key = data_key.into();
        self
    }

    /// 들여쓰기 출력 설정
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// 원본 텍스트를 소스 형식에서 타깃 형식으로 변환
///
/// 디코딩과 인코딩을 순서대로 수행할 뿐, 다른 비즈니스 로직은 없습니다.
/// 동일 형식 간 변환은 호출자 오류입니다 (복사는 변환이 아님).
///
/// # Arguments
/// * `raw` - 소스 형식의 원본 텍스트
/// * `from` - 소스 형식
/// * `to` - 타깃 형식
/// * `options` - 컨테이너 키, 들여쓰기 등 변환 옵션
///
/// # Errors
/// - `UnsupportedConversion`: `from == to`
/// - 각 코덱의 디코딩/인코딩 에러
pub fn convert(raw: &str, from: Format, to: Format, options: &ConvertOptions) -> Result<String> {
    if from == to {
        return Err(TConvertError::UnsupportedConversion {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let records = decode_records(raw, from, options)?;
    encode_records(&records, to, options)
}

/// 형식에 따라 디코딩 디스패치
pub fn decode_records(raw: &str, format: Format, options: &ConvertOptions) -> Result<Vec<Record>> {
    match format {
        Format::Csv => delimited::decode(raw),
        Format::Json => nested::decode(raw, &options.data_key),
    }
}

/// 형식에 따라 인코딩 디스패치
pub fn encode_records(
    records: &[Record],
    format: Format,
    options: &ConvertOptions,
) -> Result<String> {
    match format {
        Format::Csv => delimited::encode(records),
        Format::Json => nested::encode(records, &options.data_key, options.pretty),
    }
}
