//! 구분자 형식(CSV) 코덱 모듈
//!
//! 레코드 컬렉션을 헤더 + 행 형태의 구분자 텍스트로 인코딩하고,
//! 구분자 텍스트를 다시 레코드 컬렉션으로 디코딩합니다.
//! 인용(quoting)은 지원하지 않으며, 값에 구분자가 포함되면 에러입니다.

use serde_json::Value;

use crate::error::{Result, TConvertError};
use crate::Record;

/// 필드 구분자
pub const DELIMITER: char = ',';

/// 행 구분자
pub const ROW_SEPARATOR: char = '\n';

/// 레코드 컬렉션을 구분자 텍스트로 인코딩
///
/// 첫 번째 레코드의 필드 순서가 헤더가 되며, 모든 레코드는
/// 동일한 필드 집합과 순서를 가져야 합니다.
///
/// # Arguments
/// * `records` - 인코딩할 레코드 목록 (비어 있으면 에러)
///
/// # Returns
/// 헤더 행 + 레코드당 한 행으로 구성된 텍스트
///
/// # Errors
/// - `EmptyInput`: 레코드가 없어 헤더를 유도할 수 없음
/// - `SchemaError`: 필드 구성이 헤더와 다르거나 값이 스칼라가 아님
/// - `DelimiterCollision`: 값에 구분자 또는 줄바꿈 포함
pub fn encode(records: &[Record]) -> Result<String> {
    let first = match records.first() {
        Some(record) => record,
        None => {
            return Err(TConvertError::EmptyInput {
                reason: "인코딩할 레코드가 없습니다".to_string(),
            })
        }
    };

    let header: Vec<&str> = first.keys().map(String::as_str).collect();
    for field in &header {
        if field.contains(DELIMITER) || field.contains(ROW_SEPARATOR) {
            return Err(TConvertError::DelimiterCollision {
                row: 0,
                field: (*field).to_string(),
            });
        }
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header.join(","));

    for (idx, record) in records.iter().enumerate() {
        let row = idx + 1;

        // 모든 레코드는 헤더와 동일한 필드 집합/순서를 가져야 함
        let same_shape = record.len() == header.len()
            && record.keys().map(String::as_str).eq(header.iter().copied());
        if !same_shape {
            return Err(TConvertError::SchemaError {
                reason: format!("{}번 레코드의 필드 구성이 헤더와 다릅니다", row),
            });
        }

        let mut cells = Vec::with_capacity(header.len());
        for (field, value) in record {
            let cell = match scalar_to_cell(value) {
                Some(cell) => cell,
                None => {
                    return Err(TConvertError::SchemaError {
                        reason: format!(
                            "{}번 레코드의 '{}' 필드 값이 스칼라가 아닙니다",
                            row, field
                        ),
                    })
                }
            };

            if cell.contains(DELIMITER) || cell.contains(ROW_SEPARATOR) {
                return Err(TConvertError::DelimiterCollision {
                    row,
                    field: field.clone(),
                });
            }

            cells.push(cell);
        }

        lines.push(cells.join(","));
    }

    Ok(lines.join("\n"))
}

/// 스칼라 값을 셀 텍스트로 변환 (null은 빈 문자열)
fn scalar_to_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// 구분자 텍스트를 레코드 컬렉션으로 디코딩
///
/// 첫 행을 헤더로 해석하고, 이후 각 행을 헤더 순서대로 필드에
/// 대응시킵니다. 디코딩된 모든 값은 문자열이며 타입 추론은 하지
/// 않습니다. 필드 수가 헤더와 다른 행이 하나라도 있으면 문서 전체를
/// 거부합니다 (행 단위 스킵 없음).
///
/// # Arguments
/// * `text` - 디코딩할 구분자 텍스트 (CRLF와 마지막 줄바꿈 허용)
///
/// # Errors
/// - `EmptyInput`: 헤더 행이 없음
/// - `MalformedRow`: 필드 수가 헤더와 다른 행 존재
pub fn decode(text: &str) -> Result<Vec<Record>> {
    let mut lines = text.lines();

    let header_line = match lines.next() {
        Some(line) if !line.is_empty() => line,
        _ => {
            return Err(TConvertError::EmptyInput {
                reason: "헤더 행이 없습니다".to_string(),
            })
        }
    };

    let header: Vec<&str> = header_line.split(DELIMITER).collect();

    let mut records = Vec::new();
    for (offset, line) in lines.enumerate() {
        let cells: Vec<&str> = line.split(DELIMITER).collect();
        if cells.len() != header.len() {
            return Err(TConvertError::MalformedRow {
                line: offset + 2, // 헤더가 1행
                expected: header.len(),
                found: cells.len(),
            });
        }

        let mut record = Record::new();
        for (field, cell) in header.iter().zip(cells) {
            record.insert((*field).to_string(), Value::String(cell.to_string()));
        }
        records.push(record);
    }

    Ok(records)
}
