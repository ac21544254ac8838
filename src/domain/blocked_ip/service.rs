use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::{info, warn};

use super::dto::{normalize_ip, BlockedIpRequest, BlockedIpResponse};
use super::entity::blocked_ip;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::pagination::{PageParams, PageResponse};

pub struct BlockedIpService;

impl BlockedIpService {
    /// 차단 IP 목록 (최근 등록 순)
    pub async fn list(
        state: &AppState,
        params: PageParams,
    ) -> Result<PageResponse<BlockedIpResponse>, AppError> {
        let (page, size) = (params.page(), params.size());

        let paginator = blocked_ip::Entity::find()
            .order_by_desc(blocked_ip::Column::CreatedAt)
            .order_by_desc(blocked_ip::Column::Id)
            .paginate(&state.db, size);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page).await?;

        Ok(PageResponse::new(
            rows.into_iter().map(BlockedIpResponse::from).collect(),
            page,
            size,
            total,
        ))
    }

    pub async fn add(
        state: &AppState,
        req: BlockedIpRequest,
    ) -> Result<BlockedIpResponse, AppError> {
        let ip = req.normalized_ip();

        if Self::find_by_ip(&state.db, &ip).await?.is_some() {
            return Err(AppError::conflict(format!("이미 차단된 IP입니다: {}", ip)));
        }

        let now = Utc::now().naive_utc();
        let created = blocked_ip::ActiveModel {
            ip_address: Set(ip),
            reason: Set(req.reason),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        warn!(ip = %created.ip_address, reason = ?created.reason, "IP blocked");
        Ok(created.into())
    }

    pub async fn update(
        state: &AppState,
        id: i64,
        req: BlockedIpRequest,
    ) -> Result<BlockedIpResponse, AppError> {
        let found = Self::find(state, id).await?;
        let ip = req.normalized_ip();

        if let Some(other) = Self::find_by_ip(&state.db, &ip).await? {
            if other.id != id {
                return Err(AppError::conflict(format!("이미 차단된 IP입니다: {}", ip)));
            }
        }

        let mut active: blocked_ip::ActiveModel = found.into();
        active.ip_address = Set(ip);
        active.reason = Set(req.reason);
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(active.update(&state.db).await?.into())
    }

    /// 차단 해제
    pub async fn delete(state: &AppState, id: i64) -> Result<(), AppError> {
        let found = Self::find(state, id).await?;
        let ip = found.ip_address.clone();
        found.delete(&state.db).await?;

        info!(%ip, "IP unblocked");
        Ok(())
    }

    /// 요청 IP는 저장 형식과 같은 표기로 정규화한 뒤 비교
    pub async fn is_blocked<C: ConnectionTrait>(conn: &C, ip: &str) -> Result<bool, AppError> {
        Ok(Self::find_by_ip(conn, &normalize_ip(ip)).await?.is_some())
    }

    async fn find_by_ip<C: ConnectionTrait>(
        conn: &C,
        ip: &str,
    ) -> Result<Option<blocked_ip::Model>, AppError> {
        Ok(blocked_ip::Entity::find()
            .filter(blocked_ip::Column::IpAddress.eq(ip))
            .one(conn)
            .await?)
    }

    async fn find(state: &AppState, id: i64) -> Result<blocked_ip::Model, AppError> {
        blocked_ip::Entity::find_by_id(id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 차단 IP입니다."))
    }
}
