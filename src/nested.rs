//! 중첩 형식(JSON) 코덱 모듈
//!
//! 레코드 배열이 컨테이너 키 아래에 중첩된 JSON 문서를 파싱하고
//! 직렬화합니다. 컨테이너 키는 호출자가 지정할 수 있습니다.

use serde_json::Value;

use crate::error::{Result, TConvertError};
use crate::Record;

/// 기본 컨테이너 키
pub const DEFAULT_DATA_KEY: &str = "data";

/// 중첩 형식 텍스트를 레코드 컬렉션으로 디코딩
///
/// 최상위 값은 객체여야 하고, `key` 멤버는 객체들의 배열이어야 합니다.
///
/// # Arguments
/// * `text` - 디코딩할 JSON 텍스트
/// * `key` - 레코드 배열이 위치한 컨테이너 키
///
/// # Errors
/// - `ParseError`: JSON 문법 오류
/// - `SchemaError`: 키 부재, 배열 아님, 요소가 객체 아님
pub fn decode(text: &str, key: &str) -> Result<Vec<Record>> {
    let root: Value = serde_json::from_str(text).map_err(|e| TConvertError::ParseError {
        reason: e.to_string(),
    })?;

    let mut root_map = match root {
        Value::Object(map) => map,
        _ => {
            return Err(TConvertError::SchemaError {
                reason: "최상위 값이 객체가 아닙니다".to_string(),
            })
        }
    };

    let items = match root_map.remove(key) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(TConvertError::SchemaError {
                reason: format!("'{}' 키의 값이 배열이 아닙니다", key),
            })
        }
        None => {
            return Err(TConvertError::SchemaError {
                reason: format!("'{}' 키가 없습니다", key),
            })
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(map) => records.push(map),
            _ => {
                return Err(TConvertError::SchemaError {
                    reason: format!("'{}' 배열의 {}번 요소가 객체가 아닙니다", key, idx + 1),
                })
            }
        }
    }

    Ok(records)
}

/// 레코드 컬렉션을 중첩 형식 텍스트로 인코딩
///
/// `{ key: [record, ...] }` 형태로 직렬화합니다. 빈 컬렉션은 빈
/// 배열로 표현됩니다 (구분자 형식과 달리 헤더가 필요 없음).
///
/// # Arguments
/// * `records` - 인코딩할 레코드 목록
/// * `key` - 레코드 배열을 담을 컨테이너 키
/// * `pretty` - 들여쓰기 출력 여부
pub fn encode(records: &[Record], key: &str, pretty: bool) -> Result<String> {
    let items: Vec<Value> = records.iter().cloned().map(Value::Object).collect();

    let mut root = Record::new();
    root.insert(key.to_string(), Value::Array(items));
    let root = Value::Object(root);

    let text = if pretty {
        serde_json::to_string_pretty(&root)
    } else {
        serde_json::to_string(&root)
    };

    text.map_err(|e| TConvertError::SerializeError {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> Record {
        let mut map = Record::new();
        for (key, value) in pairs {
            map.insert((*key).to_string(), value.clone());
        }
        map
    }

    #[test]
    fn test_decode_basic() {
        let text = r#"{"data": [{"id": 1, "name": "First"}, {"id": 2, "name": "Second"}]}"#;
        let records = decode(text, DEFAULT_DATA_KEY).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("id"), Some(&json!(1)));
        assert_eq!(records[1].get("name"), Some(&json!("Second")));
    }

    #[test]
    fn test_decode_custom_key() {
        let text = r#"{"rows": [{"id": 1}]}"#;
        let records = decode(text, "rows").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_decode_missing_key() {
        let text = r#"{"items": [{"id": 1}]}"#;
        let result = decode(text, DEFAULT_DATA_KEY);
        assert!(matches!(result, Err(TConvertError::SchemaError { .. })));
    }

    #[test]
    fn test_decode_key_not_array() {
        let text = r#"{"data": {"id": 1}}"#;
        let result = decode(text, DEFAULT_DATA_KEY);
        assert!(matches!(result, Err(TConvertError::SchemaError { .. })));
    }

    #[test]
    fn test_decode_root_not_object() {
        let result = decode(r#"[{"id": 1}]"#, DEFAULT_DATA_KEY);
        assert!(matches!(result, Err(TConvertError::SchemaError { .. })));
    }

    #[test]
    fn test_decode_element_not_object() {
        let text = r#"{"data": [{"id": 1}, 2]}"#;
        let result = decode(text, DEFAULT_DATA_KEY);
        assert!(matches!(result, Err(TConvertError::SchemaError { .. })));
    }

    #[test]
    fn test_decode_invalid_json() {
        let result = decode(r#"{"data": ["#, DEFAULT_DATA_KEY);
        assert!(matches!(result, Err(TConvertError::ParseError { .. })));
    }

    #[test]
    fn test_encode_basic() {
        let records = vec![record(&[("id", json!(1)), ("name", json!("a"))])];
        let text = encode(&records, DEFAULT_DATA_KEY, false).unwrap();
        assert_eq!(text, r#"{"data":[{"id":1,"name":"a"}]}"#);
    }

    #[test]
    fn test_encode_empty_collection() {
        let text = encode(&[], DEFAULT_DATA_KEY, false).unwrap();
        assert_eq!(text, r#"{"data":[]}"#);
    }

    #[test]
    fn test_encode_pretty() {
        let records = vec![record(&[("id", json!(1))])];
        let text = encode(&records, DEFAULT_DATA_KEY, true).unwrap();
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_round_trip() {
        let records = vec![
            record(&[("id", json!(1)), ("name", json!("First"))]),
            record(&[("id", json!(2)), ("name", json!("Second"))]),
        ];

        let text = encode(&records, "rows", false).unwrap();
        let decoded = decode(&text, "rows").unwrap();
        assert_eq!(decoded, records);
    }
}
