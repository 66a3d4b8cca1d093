//! 병합 모듈
//!
//! 디코딩된 여러 소스의 레코드 컬렉션을 하나로 합칩니다.
//! 합치기 전에 각 소스의 첫 레코드에서 만든 "형태 증인"을 비교하여
//! 모든 소스가 동일한 스키마를 갖는지 먼저 검증합니다. 검증이 값이
//! 아닌 구조에만 의존하도록 증인의 모든 리프 값은 고정 센티널(null)로
//! 치환됩니다.

use serde_json::Value;

use crate::equality::is_deep_equal;
use crate::error::{Result, TConvertError};
use crate::Record;

/// 병합 대상 소스 하나 (표시 이름 + 디코딩된 레코드)
#[derive(Debug, Clone)]
pub struct Source {
    /// 에러 메시지에 사용할 소스 이름 (보통 파일 이름)
    pub name: String,
    /// 디코딩된 레코드 목록
    pub records: Vec<Record>,
}

impl Source {
    /// 새 소스 생성
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

/// 레코드의 형태 증인 생성
///
/// 구조(키 이름, 중첩, 배열 길이)는 유지하고 모든 리프 값을 null
/// 센티널로 치환한 복사본을 반환합니다. 값과 무관하게 스키마를
/// 비교할 수 있게 합니다.
pub fn shape_witness(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, v)| (key.clone(), shape_witness(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(shape_witness).collect()),
        _ => Value::Null,
    }
}

/// 여러 소스의 레코드를 소스 순서대로 하나의 컬렉션으로 병합
///
/// 1단계: 각 소스의 첫 레코드로 형태 증인을 만들어 첫 소스의 증인과
/// 비교합니다. 2단계: 모두 일치할 때만 레코드를 소스 순서대로
/// 이어붙입니다. 하나라도 불일치하면 아무것도 병합하지 않습니다.
///
/// # Arguments
/// * `sources` - 병합할 소스 목록 (비어 있으면 에러)
///
/// # Errors
/// - `NoInput`: 소스가 하나도 없음
/// - `EmptyInput`: 다중 병합 시 레코드 없는 소스 존재
/// - `SchemaMismatch`: 첫 소스와 구조가 다른 소스 존재 (최초 불일치 소스 이름 포함)
/// - `StructuralError`: 증인 비교 중 깊이 한도 초과
pub fn aggregate(sources: Vec<Source>) -> Result<Vec<Record>> {
    let mut iter = sources.into_iter();

    let first = match iter.next() {
        Some(source) => source,
        None => return Err(TConvertError::NoInput),
    };

    let rest: Vec<Source> = iter.collect();

    // 단일 소스: 스키마 비교 없이 그대로 반환
    if rest.is_empty() {
        return Ok(first.records);
    }

    let baseline = witness_of(&first)?;
    for source in &rest {
        let witness = witness_of(source)?;
        if !is_deep_equal(&baseline, &witness)? {
            return Err(TConvertError::SchemaMismatch {
                source: source.name.clone(),
            });
        }
    }

    let total = first.records.len() + rest.iter().map(|s| s.records.len()).sum::<usize>();
    let mut merged = Vec::with_capacity(total);
    merged.extend(first.records);
    for source in rest {
        merged.extend(source.records);
    }

    Ok(merged)
}

/// 소스의 첫 레코드에서 형태 증인 추출
fn witness_of(source: &Source) -> Result<Value> {
    match source.records.first() {
        Some(record) => Ok(shape_witness(&Value::Object(record.clone()))),
        None => Err(TConvertError::EmptyInput {
            reason: format!("'{}' 소스에 레코드가 없습니다", source.name),
        }),
    }
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

    fn id_name(id: i64, name: &str) -> Record {
        record(&[("id", json!(id)), ("name", json!(name))])
    }

    #[test]
    fn test_shape_witness_replaces_leaves() {
        let value = json!({"id": 7, "tags": ["a", "b"], "meta": {"x": 1}});
        let witness = shape_witness(&value);
        assert_eq!(
            witness,
            json!({"id": null, "tags": [null, null], "meta": {"x": null}})
        );
    }

    #[test]
    fn test_aggregate_empty_sources() {
        let result = aggregate(vec![]);
        assert!(matches!(result, Err(TConvertError::NoInput)));
    }

    #[test]
    fn test_aggregate_single_source_no_check() {
        // 단일 소스는 비어 있어도 스키마 검증 없이 통과
        let merged = aggregate(vec![Source::new("only", vec![])]).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_aggregate_two_matching_sources() {
        let a = Source::new("a.json", vec![id_name(1, "A"), id_name(2, "B")]);
        let b = Source::new("b.json", vec![id_name(3, "C"), id_name(4, "D")]);

        let merged = aggregate(vec![a, b]).unwrap();

        assert_eq!(merged.len(), 4);
        // 소스 순서 유지
        assert_eq!(merged[0].get("id"), Some(&json!(1)));
        assert_eq!(merged[2].get("id"), Some(&json!(3)));
        assert_eq!(merged[3].get("name"), Some(&json!("D")));
    }

    #[test]
    fn test_aggregate_schema_mismatch_names_source() {
        let a = Source::new("a.json", vec![id_name(1, "A")]);
        let b = Source::new(
            "b.json",
            vec![record(&[("id", json!(2)), ("email", json!("x@y"))])],
        );

        let result = aggregate(vec![a, b]);
        match result {
            Err(TConvertError::SchemaMismatch { source }) => assert_eq!(source, "b.json"),
            other => panic!("SchemaMismatch 에러를 기대했으나: {:?}", other),
        }
    }

    #[test]
    fn test_aggregate_values_do_not_matter() {
        // 구조만 같으면 값 타입이 달라도 병합 가능 (증인이 값을 제거)
        let a = Source::new("a", vec![record(&[("id", json!(1))])]);
        let b = Source::new("b", vec![record(&[("id", json!("two"))])]);

        let merged = aggregate(vec![a, b]).unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_aggregate_empty_source_in_multi_merge() {
        let a = Source::new("a", vec![id_name(1, "A")]);
        let b = Source::new("b", vec![]);

        let result = aggregate(vec![a, b]);
        assert!(matches!(result, Err(TConvertError::EmptyInput { .. })));
    }

    #[test]
    fn test_aggregate_mismatch_merges_nothing() {
        let a = Source::new("a", vec![id_name(1, "A")]);
        let b = Source::new("b", vec![record(&[("other", json!(1))])]);
        let c = Source::new("c", vec![id_name(2, "B")]);

        // 중간 소스가 불일치하면 전체 실패
        assert!(aggregate(vec![a, b, c]).is_err());
    }
}
