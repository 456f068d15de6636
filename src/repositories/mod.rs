//! # Repositories
//!
//! 컬렉션 하나당 리포지토리 하나가 MongoDB 접근을 담당합니다.
//!
//! 각 리포지토리는 [`ServiceLocator`](crate::core::registry::ServiceLocator)에
//! 싱글톤으로 캐시되며 `inventory::submit!`으로 등록되어, 부팅 시
//! `initialize_all`이 인덱스를 만듭니다.
//!
//! | 리포지토리 | 컬렉션 |
//! |-----------|--------|
//! | `VendorRepository` | `vendors` |
//! | `CategoryRepository` | `categories` |
//! | `SubCategoryRepository` | `subcategories` |
//! | `ProductRepository` | `products` |
//! | `CouponRepository` | `coupons` |
//! | `OrderRepository` | `orders` |
//! | `UserRepository` | `users` (읽기 전용, 등록하지 않음) |

pub mod vendors;
pub mod catalog;
pub mod coupons;
pub mod orders;
pub mod users;

use mongodb::bson::{oid::ObjectId, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use crate::core::errors::AppError;

/// MongoDB 중복 키 오류 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 유니크 인덱스 위반인지 서버 오류 코드로 판별합니다.
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_CODE,
        ErrorKind::InsertMany(insert_error) => insert_error
            .write_errors
            .as_ref()
            .is_some_and(|errors| errors.iter().any(|e| e.code == DUPLICATE_KEY_CODE)),
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// 쓰기 오류를 변환합니다. 유니크 인덱스 위반은 `conflict_message`의 409가 됩니다.
pub(crate) fn write_error(error: mongodb::error::Error, conflict_message: &str) -> AppError {
    if is_duplicate_key(&error) {
        AppError::ConflictError(conflict_message.to_string())
    } else {
        AppError::DatabaseError(error.to_string())
    }
}

pub(crate) fn db_error(error: mongodb::error::Error) -> AppError {
    AppError::DatabaseError(error.to_string())
}

/// `insert_one` 결과에서 생성된 `_id`를 꺼냅니다.
pub(crate) fn inserted_object_id(id: &Bson) -> Result<ObjectId, AppError> {
    id.as_object_id()
        .ok_or_else(|| AppError::InternalError("Inserted id is not an ObjectId".to_string()))
}

/// 벤더 스냅샷 기준 필터 (`vendor._id`)
pub(crate) fn vendor_scope(vendor_id: &ObjectId) -> Document {
    mongodb::bson::doc! { "vendor._id": *vendor_id }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserted_object_id() {
        let id = ObjectId::new();

        assert_eq!(inserted_object_id(&Bson::ObjectId(id)).unwrap(), id);
        assert!(inserted_object_id(&Bson::String("x".to_string())).is_err());
    }

    fn write_failure(code: i32) -> mongodb::error::Error {
        let write_error = mongodb::bson::from_document(mongodb::bson::doc! {
            "code": code,
            "errmsg": "index: slug_unique dup key",
        })
        .unwrap();
        mongodb::error::Error::from(ErrorKind::Write(WriteFailure::WriteError(write_error)))
    }

    #[test]
    fn test_duplicate_key_maps_to_conflict() {
        let error = write_error(write_failure(11000), "Category already exists.");
        assert!(matches!(error, AppError::ConflictError(msg) if msg == "Category already exists."));
    }

    #[test]
    fn test_other_write_errors_stay_database_errors() {
        assert!(!is_duplicate_key(&write_failure(121)));
        assert!(matches!(write_error(write_failure(121), "dup"), AppError::DatabaseError(_)));

        // 메시지에 E11000이 들어 있어도 코드가 다르면 중복으로 보지 않습니다
        let custom = mongodb::error::Error::custom("E11000 duplicate key error");
        assert!(!is_duplicate_key(&custom));
    }

    #[test]
    fn test_vendor_scope() {
        let id = ObjectId::new();
        assert_eq!(vendor_scope(&id).get_object_id("vendor._id").unwrap(), id);
    }
}
