//! # Service Registry
//!
//! 타입 기반 싱글톤 컨테이너입니다. 인프라 컴포넌트(`Database`,
//! `CloudinaryClient`)는 `main`에서 [`ServiceLocator::set`]으로 등록하고,
//! 리포지토리와 서비스는 처음 요청될 때 [`ServiceLocator::get_or_try_init`]으로
//! 생성되어 캐시됩니다.
//!
//! 리포지토리는 `inventory::submit!`으로 [`RepositoryRegistration`]을 제출하며,
//! 부팅 시 [`ServiceLocator::initialize_all`]이 각 리포지토리를 생성하고
//! 컬렉션 인덱스를 준비합니다.
//!
//! ```rust,ignore
//! ServiceLocator::set(Arc::new(database));
//! ServiceLocator::set(Arc::new(cloudinary));
//! ServiceLocator::initialize_all().await?;
//!
//! let service = CategoryService::instance()?;
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use futures_util::future::BoxFuture;
use once_cell::sync::Lazy;
use crate::core::errors::{AppError, AppResult};
use crate::utils::display_terminal::{print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task};

/// 리포지토리 초기화 함수 타입
///
/// 인스턴스를 생성(또는 조회)하고 인덱스를 준비하는 비동기 함수입니다.
pub type RepositoryInit = fn() -> BoxFuture<'static, AppResult<()>>;

/// 리포지토리 등록 정보
pub struct RepositoryRegistration {
    /// 리포지토리 이름 (로그 출력용)
    pub name: &'static str,
    /// 연결된 MongoDB 컬렉션 이름
    pub collection: &'static str,
    /// 부팅 시 실행할 초기화 함수
    pub init: RepositoryInit,
}

inventory::collect!(RepositoryRegistration);

pub struct ServiceLocator {
    /// `TypeId`별 싱글톤 인스턴스
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    /// 현재 생성 중인 타입 (순환 의존 감지용)
    initializing: RwLock<HashSet<TypeId>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 외부에서 생성한 인스턴스를 등록합니다.
    ///
    /// 같은 타입이 이미 등록되어 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) -> AppResult<()> {
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());
        log::info!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances
            .write()
            .map_err(|_| AppError::InternalError("Service registry lock poisoned".to_string()))?;
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
        Ok(())
    }

    /// 등록된 인스턴스를 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 해당 타입이 등록되지 않은 경우
    pub fn get<T: 'static + Send + Sync>() -> AppResult<Arc<T>> {
        Self::lookup::<T>()?.ok_or_else(|| {
            AppError::InternalError(format!(
                "Service not registered: {}",
                Self::extract_clean_type_name(std::any::type_name::<T>())
            ))
        })
    }

    /// 인스턴스를 조회하고, 없으면 `init`으로 생성해 캐시합니다.
    ///
    /// `init`은 락을 잡지 않은 상태에서 실행되므로 내부에서 다른 의존성을
    /// `get_or_try_init`으로 요청해도 됩니다. 자기 자신을 다시 요청하는
    /// 순환 의존은 에러로 보고됩니다.
    pub fn get_or_try_init<T, F>(init: F) -> AppResult<Arc<T>>
    where
        T: 'static + Send + Sync,
        F: FnOnce() -> AppResult<T>,
    {
        if let Some(instance) = Self::lookup::<T>()? {
            return Ok(instance);
        }

        let type_id = TypeId::of::<T>();
        let type_name = Self::extract_clean_type_name(std::any::type_name::<T>());

        {
            let mut initializing = LOCATOR.initializing
                .write()
                .map_err(|_| AppError::InternalError("Service registry lock poisoned".to_string()))?;
            if !initializing.insert(type_id) {
                return Err(AppError::InternalError(format!(
                    "Circular dependency detected: {} is already being initialized",
                    type_name
                )));
            }
        }

        let created = init();

        if let Ok(mut initializing) = LOCATOR.initializing.write() {
            initializing.remove(&type_id);
        }

        let created = Arc::new(created?);
        let mut instances = LOCATOR.instances
            .write()
            .map_err(|_| AppError::InternalError("Service registry lock poisoned".to_string()))?;

        // 동시에 생성된 경우 먼저 등록된 인스턴스를 유지
        let entry = instances
            .entry(type_id)
            .or_insert_with(|| created as Arc<dyn Any + Send + Sync>)
            .clone();

        entry
            .downcast::<T>()
            .map_err(|_| AppError::InternalError(format!("Type mismatch for service: {}", type_name)))
    }

    /// 등록된 모든 리포지토리를 생성하고 인덱스를 준비합니다.
    pub async fn initialize_all() -> AppResult<()> {
        print_boxed_title("🔄 INITIALIZING REPOSITORIES");

        let registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let count = registrations.len();

        print_step_start(1, "Preparing collections and indexes");

        for registration in registrations {
            print_sub_task(registration.name, registration.collection);
            (registration.init)().await?;
            print_sub_task(registration.name, "✓ Ready");
        }

        print_step_complete(1, "Repositories ready", count);
        print_final_summary(count, Self::registered_count());

        Ok(())
    }

    fn lookup<T: 'static + Send + Sync>() -> AppResult<Option<Arc<T>>> {
        let instances = LOCATOR.instances
            .read()
            .map_err(|_| AppError::InternalError("Service registry lock poisoned".to_string()))?;

        match instances.get(&TypeId::of::<T>()) {
            Some(instance) => instance
                .clone()
                .downcast::<T>()
                .map(Some)
                .map_err(|_| AppError::InternalError("Type mismatch in ServiceLocator".to_string())),
            None => Ok(None),
        }
    }

    fn registered_count() -> usize {
        LOCATOR.instances.read().map(|i| i.len()).unwrap_or(0)
    }

    /// `my_crate::services::CategoryService` → `CategoryService`
    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }
}
