use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use super::dto::{AirlineRequest, AirlineResponse, FlightTicketRequest, FlightTicketResponse};
use super::entity::{airline, flight_ticket};
use crate::state::AppState;
use crate::utils::error::AppError;

const ACTIVE: &str = "Y";

pub struct FlightService;

impl FlightService {
    pub async fn list_airlines(state: &AppState) -> Result<Vec<AirlineResponse>, AppError> {
        let airlines = airline::Entity::find()
            .order_by_asc(airline::Column::Name)
            .all(&state.db)
            .await?;

        Ok(airlines.into_iter().map(AirlineResponse::from).collect())
    }

    pub async fn create_airline(
        state: &AppState,
        req: AirlineRequest,
    ) -> Result<AirlineResponse, AppError> {
        let created = airline::ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(airline_id = created.id, name = %created.name, "Airline created");
        Ok(created.into())
    }

    pub async fn update_airline(
        state: &AppState,
        airline_id: i64,
        req: AirlineRequest,
    ) -> Result<AirlineResponse, AppError> {
        let mut active: airline::ActiveModel = Self::find_airline(state, airline_id).await?.into();
        active.name = Set(req.name);
        active.code = Set(req.code);

        Ok(active.update(&state.db).await?.into())
    }

    /// 항공사 삭제 (등록된 항공권이 있으면 409)
    pub async fn delete_airline(state: &AppState, airline_id: i64) -> Result<(), AppError> {
        let found = Self::find_airline(state, airline_id).await?;

        let ticket_count = found
            .find_related(flight_ticket::Entity)
            .count(&state.db)
            .await?;
        if ticket_count > 0 {
            return Err(AppError::conflict(format!(
                "항공권 {}건이 등록된 항공사는 삭제할 수 없습니다.",
                ticket_count
            )));
        }

        found.delete(&state.db).await?;
        info!(airline_id, "Airline deleted");
        Ok(())
    }

    /// 사용 중인 항공권 전체 (출발 시각 순)
    pub async fn list_tickets(state: &AppState) -> Result<Vec<FlightTicketResponse>, AppError> {
        let rows = flight_ticket::Entity::find()
            .filter(flight_ticket::Column::UseYn.eq(ACTIVE))
            .find_also_related(airline::Entity)
            .order_by_asc(flight_ticket::Column::DepartureTime)
            .order_by_asc(flight_ticket::Column::Id)
            .all(&state.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(ticket, airline)| FlightTicketResponse::new(ticket, airline.map(|a| a.name)))
            .collect())
    }

    pub async fn list_tickets_by_airline(
        state: &AppState,
        airline_id: i64,
    ) -> Result<Vec<FlightTicketResponse>, AppError> {
        let found = Self::find_airline(state, airline_id).await?;

        let tickets = found
            .find_related(flight_ticket::Entity)
            .filter(flight_ticket::Column::UseYn.eq(ACTIVE))
            .order_by_asc(flight_ticket::Column::DepartureTime)
            .all(&state.db)
            .await?;

        Ok(tickets
            .into_iter()
            .map(|ticket| FlightTicketResponse::new(ticket, Some(found.name.clone())))
            .collect())
    }

    pub async fn create_ticket(
        state: &AppState,
        req: FlightTicketRequest,
    ) -> Result<FlightTicketResponse, AppError> {
        let owner = Self::find_airline(state, req.airline_id).await?;

        let created = flight_ticket::ActiveModel {
            airline_id: Set(owner.id),
            departure_airport: Set(req.departure_airport),
            arrival_airport: Set(req.arrival_airport),
            departure_time: Set(req.departure_time),
            arrival_time: Set(req.arrival_time),
            use_yn: Set(req.use_yn.unwrap_or_else(|| ACTIVE.to_string())),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(ticket_id = created.id, airline_id = owner.id, "Flight ticket created");
        Ok(FlightTicketResponse::new(created, Some(owner.name)))
    }

    pub async fn update_ticket(
        state: &AppState,
        ticket_id: i64,
        req: FlightTicketRequest,
    ) -> Result<FlightTicketResponse, AppError> {
        let ticket = Self::find_ticket(state, ticket_id).await?;
        let owner = Self::find_airline(state, req.airline_id).await?;

        let mut active: flight_ticket::ActiveModel = ticket.into();
        active.airline_id = Set(owner.id);
        active.departure_airport = Set(req.departure_airport);
        active.arrival_airport = Set(req.arrival_airport);
        active.departure_time = Set(req.departure_time);
        active.arrival_time = Set(req.arrival_time);
        if let Some(use_yn) = req.use_yn {
            active.use_yn = Set(use_yn);
        }

        let updated = active.update(&state.db).await?;
        Ok(FlightTicketResponse::new(updated, Some(owner.name)))
    }

    /// 항공권 삭제 (use_yn = N)
    pub async fn delete_ticket(state: &AppState, ticket_id: i64) -> Result<(), AppError> {
        let mut active: flight_ticket::ActiveModel =
            Self::find_ticket(state, ticket_id).await?.into();
        active.use_yn = Set("N".to_string());
        active.update(&state.db).await?;

        info!(ticket_id, "Flight ticket disabled");
        Ok(())
    }

    async fn find_airline(state: &AppState, airline_id: i64) -> Result<airline::Model, AppError> {
        airline::Entity::find_by_id(airline_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 항공사입니다."))
    }

    async fn find_ticket(
        state: &AppState,
        ticket_id: i64,
    ) -> Result<flight_ticket::Model, AppError> {
        flight_ticket::Entity::find_by_id(ticket_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 항공권입니다."))
    }
}
