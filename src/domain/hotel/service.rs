use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::dto::{
    HotelRequest, HotelResponse, RoomRequest, RoomResponse, RoomTypeRequest, RoomTypeResponse,
    MAX_ROOM_PRICE,
};
use super::entity::{hotel, room, room_type};
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;

/// 호텔 소유자 또는 관리자인지 확인하고 호텔을 반환합니다.
pub async fn ensure_hotel_manager<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    hotel_id: i64,
) -> Result<hotel::Model, AppError> {
    let found = hotel::Entity::find_by_id(hotel_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("존재하지 않는 호텔입니다."))?;

    if user.is_admin() || found.owner_id == user.user_id()? {
        Ok(found)
    } else {
        Err(AppError::forbidden("해당 호텔에 대한 권한이 없습니다."))
    }
}

pub struct HotelService;

impl HotelService {
    /// 호텔 등록 (요청자가 소유자가 됨)
    pub async fn create_hotel(
        state: &AppState,
        user: &AuthUser,
        req: HotelRequest,
    ) -> Result<HotelResponse, AppError> {
        let now = Utc::now().naive_utc();

        let created = hotel::ActiveModel {
            owner_id: Set(user.user_id()?),
            name: Set(req.name),
            address: Set(req.address),
            description: Set(req.description),
            bank_name: Set(req.bank_name),
            account_holder: Set(req.account_holder),
            account_number: Set(req.account_number),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(hotel_id = created.id, owner_id = created.owner_id, "Hotel created");

        Ok(HotelResponse::new(created, Vec::new()))
    }

    /// 관리 가능한 호텔 목록 (관리자는 전체)
    ///
    /// 각 호텔에 객실 타입과 객실을 포함합니다.
    pub async fn my_hotels(
        state: &AppState,
        user: &AuthUser,
    ) -> Result<Vec<HotelResponse>, AppError> {
        let mut query = hotel::Entity::find().order_by_asc(hotel::Column::Id);
        if !user.is_admin() {
            query = query.filter(hotel::Column::OwnerId.eq(user.user_id()?));
        }
        let hotels = query.all(&state.db).await?;

        Self::assemble(state, hotels).await
    }

    pub async fn update_hotel(
        state: &AppState,
        user: &AuthUser,
        hotel_id: i64,
        req: HotelRequest,
    ) -> Result<HotelResponse, AppError> {
        let existing = ensure_hotel_manager(&state.db, user, hotel_id).await?;

        let mut active: hotel::ActiveModel = existing.into();
        active.name = Set(req.name);
        active.address = Set(req.address);
        active.description = Set(req.description);
        active.bank_name = Set(req.bank_name);
        active.account_holder = Set(req.account_holder);
        active.account_number = Set(req.account_number);
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active.update(&state.db).await?;

        let mut assembled = Self::assemble(state, vec![updated]).await?;
        assembled
            .pop()
            .ok_or_else(|| AppError::internal_error("updated hotel missing from assembly"))
    }

    pub async fn add_room_type(
        state: &AppState,
        user: &AuthUser,
        hotel_id: i64,
        req: RoomTypeRequest,
    ) -> Result<RoomTypeResponse, AppError> {
        ensure_hotel_manager(&state.db, user, hotel_id).await?;
        let base_price = Self::validated_base_price(&req)?;
        let now = Utc::now().naive_utc();

        let created = room_type::ActiveModel {
            hotel_id: Set(hotel_id),
            name: Set(req.name),
            description: Set(req.description),
            capacity: Set(req.capacity),
            price_krw: Set(req.price_krw),
            price_usd: Set(req.price_usd),
            price_php: Set(req.price_php),
            base_price: Set(base_price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(hotel_id, room_type_id = created.id, "Room type created");

        Ok(RoomTypeResponse::new(created, Vec::new()))
    }

    pub async fn update_room_type(
        state: &AppState,
        user: &AuthUser,
        room_type_id: i64,
        req: RoomTypeRequest,
    ) -> Result<RoomTypeResponse, AppError> {
        let existing = Self::find_room_type(state, room_type_id).await?;
        ensure_hotel_manager(&state.db, user, existing.hotel_id).await?;
        let base_price = Self::validated_base_price(&req)?;

        let mut active: room_type::ActiveModel = existing.into();
        active.name = Set(req.name);
        active.description = Set(req.description);
        active.capacity = Set(req.capacity);
        active.price_krw = Set(req.price_krw);
        active.price_usd = Set(req.price_usd);
        active.price_php = Set(req.price_php);
        active.base_price = Set(base_price);
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active.update(&state.db).await?;

        let rooms = room::Entity::find()
            .filter(room::Column::RoomTypeId.eq(updated.id))
            .order_by_asc(room::Column::RoomNumber)
            .all(&state.db)
            .await?;

        Ok(RoomTypeResponse::new(
            updated,
            rooms.into_iter().map(RoomResponse::from).collect(),
        ))
    }

    pub async fn add_room(
        state: &AppState,
        user: &AuthUser,
        room_type_id: i64,
        req: RoomRequest,
    ) -> Result<RoomResponse, AppError> {
        let parent = Self::find_room_type(state, room_type_id).await?;
        ensure_hotel_manager(&state.db, user, parent.hotel_id).await?;

        let room_number = req.room_number.trim().to_string();
        Self::ensure_room_number_free(state, room_type_id, &room_number, None).await?;

        let created = room::ActiveModel {
            room_type_id: Set(room_type_id),
            room_number: Set(room_number),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(room_type_id, room_id = created.id, room_number = %created.room_number, "Room created");

        Ok(created.into())
    }

    pub async fn update_room(
        state: &AppState,
        user: &AuthUser,
        room_id: i64,
        req: RoomRequest,
    ) -> Result<RoomResponse, AppError> {
        let existing = room::Entity::find_by_id(room_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 객실입니다."))?;
        let parent = Self::find_room_type(state, existing.room_type_id).await?;
        ensure_hotel_manager(&state.db, user, parent.hotel_id).await?;

        let room_number = req.room_number.trim().to_string();
        Self::ensure_room_number_free(state, parent.id, &room_number, Some(room_id)).await?;

        let mut active: room::ActiveModel = existing.into();
        active.room_number = Set(room_number);
        let updated = active.update(&state.db).await?;

        Ok(updated.into())
    }

    fn validated_base_price(req: &RoomTypeRequest) -> Result<rust_decimal::Decimal, AppError> {
        if req.has_out_of_range_price() {
            return Err(AppError::validation_error(format!(
                "가격은 0 이상 {} 이하여야 합니다.",
                MAX_ROOM_PRICE
            )));
        }
        req.resolve_base_price()
            .ok_or_else(|| AppError::validation_error("객실 가격을 하나 이상 입력해야 합니다."))
    }

    async fn find_room_type(
        state: &AppState,
        room_type_id: i64,
    ) -> Result<room_type::Model, AppError> {
        room_type::Entity::find_by_id(room_type_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 객실 타입입니다."))
    }

    /// 같은 객실 타입 안에서 객실 번호 중복 확인
    async fn ensure_room_number_free(
        state: &AppState,
        room_type_id: i64,
        room_number: &str,
        exclude_room_id: Option<i64>,
    ) -> Result<(), AppError> {
        let mut query = room::Entity::find()
            .filter(room::Column::RoomTypeId.eq(room_type_id))
            .filter(room::Column::RoomNumber.eq(room_number));
        if let Some(id) = exclude_room_id {
            query = query.filter(room::Column::Id.ne(id));
        }

        if query.one(&state.db).await?.is_some() {
            return Err(AppError::conflict(format!(
                "{}호는 이미 등록된 객실 번호입니다.",
                room_number
            )));
        }
        Ok(())
    }

    /// 호텔 목록에 객실 타입과 객실을 붙여 응답으로 변환
    async fn assemble(
        state: &AppState,
        hotels: Vec<hotel::Model>,
    ) -> Result<Vec<HotelResponse>, AppError> {
        if hotels.is_empty() {
            return Ok(Vec::new());
        }

        let hotel_ids: Vec<i64> = hotels.iter().map(|h| h.id).collect();
        let room_types = room_type::Entity::find()
            .filter(room_type::Column::HotelId.is_in(hotel_ids))
            .order_by_asc(room_type::Column::Id)
            .all(&state.db)
            .await?;

        let room_type_ids: Vec<i64> = room_types.iter().map(|rt| rt.id).collect();
        let rooms = if room_type_ids.is_empty() {
            Vec::new()
        } else {
            room::Entity::find()
                .filter(room::Column::RoomTypeId.is_in(room_type_ids))
                .order_by_asc(room::Column::RoomNumber)
                .all(&state.db)
                .await?
        };

        let mut rooms_by_type: HashMap<i64, Vec<RoomResponse>> = HashMap::new();
        for r in rooms {
            rooms_by_type
                .entry(r.room_type_id)
                .or_default()
                .push(RoomResponse::from(r));
        }

        let mut types_by_hotel: HashMap<i64, Vec<RoomTypeResponse>> = HashMap::new();
        for rt in room_types {
            let rooms = rooms_by_type.remove(&rt.id).unwrap_or_default();
            types_by_hotel
                .entry(rt.hotel_id)
                .or_default()
                .push(RoomTypeResponse::new(rt, rooms));
        }

        Ok(hotels
            .into_iter()
            .map(|h| {
                let types = types_by_hotel.remove(&h.id).unwrap_or_default();
                HotelResponse::new(h, types)
            })
            .collect())
    }
}
