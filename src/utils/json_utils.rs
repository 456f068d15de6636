//! # JSON 응답 변환
//!
//! BSON 타입(`ObjectId`, `DateTime`)을 그대로 `serde_json`으로 직렬화하면
//! 확장 JSON 형태(`{"$oid": ...}`, `{"$date": {"$numberLong": ...}}`)가 됩니다.
//! 프론트엔드는 문자열 id와 ISO-8601 날짜를 기대하므로 응답 직전에
//! 이 모듈로 평탄화합니다.
//!
//! ```rust,ignore
//! let body = to_plain_json(&categories)?;
//! Ok(HttpResponse::Ok().json(json!({ "success": true, "categories": body })))
//! ```

use chrono::{DateTime, SecondsFormat};
use serde::Serialize;
use serde_json::{Map, Value};
use crate::core::errors::{AppError, AppResult};

/// 값을 직렬화한 뒤 확장 JSON 표현을 평문 값으로 바꿉니다.
pub fn to_plain_json<T: Serialize + ?Sized>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map(normalize)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize response: {}", e)))
}

/// 확장 JSON 표현을 재귀적으로 평탄화합니다.
///
/// * `{"$oid": "..."}` → `"..."`
/// * `{"$date": {"$numberLong": "ms"}}`, `{"$date": ms}`, `{"$date": "iso"}` → RFC 3339 문자열
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Object(map) => normalize_object(map),
        other => other,
    }
}

fn normalize_object(map: Map<String, Value>) -> Value {
    if map.len() == 1 {
        if let Some(Value::String(oid)) = map.get("$oid") {
            return Value::String(oid.clone());
        }
        if let Some(date) = map.get("$date") {
            if let Some(iso) = extended_date_to_iso(date) {
                return Value::String(iso);
            }
        }
    }

    Value::Object(map.into_iter().map(|(k, v)| (k, normalize(v))).collect())
}

fn extended_date_to_iso(date: &Value) -> Option<String> {
    let millis = match date {
        Value::Object(inner) => inner.get("$numberLong")?.as_str()?.parse::<i64>().ok()?,
        Value::Number(number) => number.as_i64()?,
        Value::String(iso) => return Some(iso.clone()),
        _ => return None,
    };

    DateTime::from_timestamp_millis(millis).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// 참조 id 필드를 참조된 문서로 바꾼 평문 JSON을 만듭니다.
///
/// 참조 문서가 없으면 해당 필드는 `null`이 됩니다.
pub fn populate<T, R>(value: &T, field: &str, referenced: Option<&R>) -> AppResult<Value>
where
    T: Serialize + ?Sized,
    R: Serialize + ?Sized,
{
    let mut plain = to_plain_json(value)?;
    let replacement = match referenced {
        Some(doc) => to_plain_json(doc)?,
        None => Value::Null,
    };

    if let Value::Object(map) = &mut plain {
        map.insert(field.to_string(), replacement);
    }

    Ok(plain)
}

/// `(문서, 참조 문서)` 목록을 [`populate`]로 한꺼번에 변환합니다.
pub fn populate_pairs<T, R>(pairs: &[(T, Option<R>)], field: &str) -> AppResult<Vec<Value>>
where
    T: Serialize,
    R: Serialize,
{
    pairs
        .iter()
        .map(|(value, referenced)| populate(value, field, referenced.as_ref()))
        .collect()
}
