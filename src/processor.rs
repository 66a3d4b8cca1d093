//! 소스 파일 처리 모듈
//!
//! 개별 입력 파일의 읽기와 디코딩을 담당합니다. rayon 팬아웃 경계를
//! 넘어도 패닉하지 않도록 실패는 `SourceResult`에 담아 반환합니다.

use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use crate::convert::{decode_records, ConvertOptions, Format};
use crate::error::{Result, TConvertError};
use crate::Record;

/// 파일 처리 결과
#[derive(Debug)]
pub struct SourceResult {
    /// 처리된 파일 경로
    pub path: PathBuf,
    /// 디코딩된 레코드 (성공 시)
    pub records: Option<Vec<Record>>,
    /// 에러 메시지 (실패 시)
    pub error: Option<String>,
    /// 원본 파일 크기
    pub file_size: u64,
}

impl SourceResult {
    /// 성공 결과 생성
    pub fn success(path: PathBuf, records: Vec<Record>, file_size: u64) -> Self {
        Self {
            path,
            records: Some(records),
            error: None,
            file_size,
        }
    }

    /// 실패 결과 생성
    pub fn failure(path: PathBuf, error: String, file_size: u64) -> Self {
        Self {
            path,
            records: None,
            error: Some(error),
            file_size,
        }
    }

    /// 에러 메시지에 쓸 소스 이름 (파일 이름, 없으면 전체 경로)
    pub fn source_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// 소스 처리 옵션
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// 소스 파일의 형식
    pub format: Format,
    /// 코덱 옵션 (컨테이너 키 등)
    pub convert: ConvertOptions,
    /// 대용량 파일 임계값 (이상이면 메모리 매핑 사용)
    pub mmap_threshold: u64,
}

impl ProcessOptions {
    /// 기본 옵션 생성
    pub fn new(format: Format) -> Self {
        Self {
            format,
            convert: ConvertOptions::default(),
            mmap_threshold: 10 * 1024 * 1024, // 10MB
        }
    }

    /// 코덱 옵션 설정
    pub fn with_convert(mut self, convert: ConvertOptions) -> Self {
        self.convert = convert;
        self
    }
}

/// 단일 소스 파일 읽기 + 디코딩
///
/// # Arguments
/// * `path` - 처리할 파일 경로
/// * `options` - 처리 옵션
///
/// # Returns
/// 성공/실패를 담은 `SourceResult`
pub fn process_source(path: PathBuf, options: &ProcessOptions) -> SourceResult {
    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

    match process_internal(&path, file_size, options) {
        Ok(records) => SourceResult::success(path, records, file_size),
        Err(e) => SourceResult::failure(path, e.to_string(), file_size),
    }
}

/// 내부 처리 로직
fn process_internal(
    path: &PathBuf,
    file_size: u64,
    options: &ProcessOptions,
) -> Result<Vec<Record>> {
    let raw = if file_size >= options.mmap_threshold {
        // 대용량 파일: 메모리 매핑 사용
        read_with_mmap(path)?
    } else {
        // 일반 파일: 버퍼 리더 사용
        read_with_reader(path)?
    };

    decode_records(&raw, options.format, &options.convert)
}

/// 버퍼 리더를 사용한 텍스트 읽기
fn read_with_reader(path: &PathBuf) -> Result<String> {
    let file = File::open(path).map_err(|e| TConvertError::FileOpenError {
        file: path.clone(),
        reason: e.to_string(),
    })?;

    let mut reader = BufReader::new(file);
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| TConvertError::FileOpenError {
            file: path.clone(),
            reason: e.to_string(),
        })?;

    Ok(text)
}

/// 메모리 매핑을 사용한 텍스트 읽기 (대용량 파일용)
fn read_with_mmap(path: &PathBuf) -> Result<String> {
    let file = File::open(path).map_err(|e| TConvertError::FileOpenError {
        file: path.clone(),
        reason: e.to_string(),
    })?;

    let mmap = unsafe {
        Mmap::map(&file).map_err(|e| TConvertError::FileOpenError {
            file: path.clone(),
            reason: format!("메모리 매핑 실패: {}", e),
        })?
    };

    let text = std::str::from_utf8(&mmap).map_err(|e| TConvertError::FileOpenError {
        file: path.clone(),
        reason: format!("UTF-8 텍스트가 아닙니다: {}", e),
    })?;

    Ok(text.to_string())
}
