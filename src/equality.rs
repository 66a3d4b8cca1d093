//! 구조 동등성 비교 모듈
//!
//! 두 JSON 값이 구조와 값 모두 동일한지 재귀적으로 비교합니다.
//! 병합 전 스키마 검증(섀도우 레코드 비교)에 사용됩니다.

use serde_json::Value;

use crate::error::{Result, TConvertError};

/// 비교 가능한 최대 중첩 깊이
///
/// 한도를 넘는 중첩은 스택 오버플로 대신 `StructuralError`로 보고됩니다.
pub const MAX_COMPARE_DEPTH: usize = 128;

/// 두 JSON 값의 깊은 동등성 비교
///
/// - 스칼라: 타입 강제 변환 없는 엄격한 동등성 (`1`과 `"1"`은 다름)
/// - 객체: 키 개수와 **키 이름 집합**이 모두 같고, 각 키의 값이 재귀적으로 동일
/// - 배열: 길이가 같고 요소별로 재귀적으로 동일
///
/// 순회는 명시적 스택 기반으로, [`MAX_COMPARE_DEPTH`]를 초과하면
/// `StructuralError`를 반환합니다.
///
/// # Arguments
/// * `a` - 비교할 첫 번째 값
/// * `b` - 비교할 두 번째 값
///
/// # Returns
/// 동등 여부 또는 깊이 한도 초과 에러
///
/// # Examples
/// ```
/// use serde_json::json;
/// use tconvert::equality::is_deep_equal;
///
/// let a = json!({"id": 1, "name": "a"});
/// assert!(is_deep_equal(&a, &a).unwrap());
/// assert!(!is_deep_equal(&json!({"a": 1}), &json!({"b": 1})).unwrap());
/// ```
pub fn is_deep_equal(a: &Value, b: &Value) -> Result<bool> {
    let mut stack: Vec<(&Value, &Value, usize)> = vec![(a, b, 0)];

    while let Some((left, right, depth)) = stack.pop() {
        if depth > MAX_COMPARE_DEPTH {
            return Err(TConvertError::StructuralError {
                max: MAX_COMPARE_DEPTH,
            });
        }

        match (left, right) {
            (Value::Object(lm), Value::Object(rm)) => {
                if lm.len() != rm.len() {
                    return Ok(false);
                }
                // 키 개수뿐 아니라 키 이름까지 대칭적으로 확인
                for (key, lv) in lm {
                    match rm.get(key) {
                        Some(rv) => stack.push((lv, rv, depth + 1)),
                        None => return Ok(false),
                    }
                }
            }
            (Value::Array(la), Value::Array(ra)) => {
                if la.len() != ra.len() {
                    return Ok(false);
                }
                for (lv, rv) in la.iter().zip(ra.iter()) {
                    stack.push((lv, rv, depth + 1));
                }
            }
            // 스칼라 또는 타입이 다른 조합
            (lv, rv) => {
                if lv != rv {
                    return Ok(false);
                }
            }
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity() {
        let values = vec![
            json!(null),
            json!(true),
            json!(42),
            json!("text"),
            json!([1, 2, 3]),
            json!({"id": 1, "nested": {"a": [1, {"b": 2}]}}),
        ];

        for v in &values {
            assert!(is_deep_equal(v, v).unwrap());
        }
    }

    #[test]
    fn test_no_type_coercion() {
        assert!(!is_deep_equal(&json!(1), &json!("1")).unwrap());
        assert!(!is_deep_equal(&json!(0), &json!(false)).unwrap());
        assert!(!is_deep_equal(&json!(null), &json!("")).unwrap());
    }

    #[test]
    fn test_same_key_count_different_names() {
        // 키 개수는 같지만 이름이 다른 경우: 반드시 불일치
        let a = json!({"a": 1, "b": 2});
        let b = json!({"a": 1, "c": 2});
        assert!(!is_deep_equal(&a, &b).unwrap());
        assert!(!is_deep_equal(&b, &a).unwrap());
    }

    #[test]
    fn test_key_count_mismatch() {
        let a = json!({"a": 1});
        let b = json!({"a": 1, "b": 2});
        assert!(!is_deep_equal(&a, &b).unwrap());
    }

    #[test]
    fn test_key_order_ignored() {
        // 객체 비교는 키 순서와 무관
        let a = json!({"a": 1, "b": 2});
        let b = json!({"b": 2, "a": 1});
        assert!(is_deep_equal(&a, &b).unwrap());
    }

    #[test]
    fn test_array_elementwise() {
        assert!(is_deep_equal(&json!([1, "a", null]), &json!([1, "a", null])).unwrap());
        assert!(!is_deep_equal(&json!([1, 2]), &json!([2, 1])).unwrap());
        assert!(!is_deep_equal(&json!([1, 2]), &json!([1, 2, 3])).unwrap());
    }

    #[test]
    fn test_mixed_types() {
        assert!(!is_deep_equal(&json!({"a": 1}), &json!([1])).unwrap());
        assert!(!is_deep_equal(&json!([1]), &json!(1)).unwrap());
    }

    #[test]
    fn test_depth_limit_reported_not_crashed() {
        // 한도보다 깊은 중첩 배열 생성
        let mut deep = json!(1);
        for _ in 0..(MAX_COMPARE_DEPTH + 10) {
            deep = json!([deep]);
        }

        let result = is_deep_equal(&deep, &deep);
        assert!(matches!(
            result,
            Err(TConvertError::StructuralError { .. })
        ));
    }

    #[test]
    fn test_depth_within_limit() {
        let mut nested = json!(1);
        for _ in 0..(MAX_COMPARE_DEPTH - 1) {
            nested = json!([nested]);
        }
        assert!(is_deep_equal(&nested, &nested).unwrap());
    }
}
