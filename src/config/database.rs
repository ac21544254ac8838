use crate::domain::{
    access_log::entity::access_log,
    blocked_ip::entity::blocked_ip,
    board::entity::{board, board_like, comment},
    discount::entity::discount_policy,
    flight::entity::{airline, flight_ticket},
    hotel::entity::{hotel, room, room_type},
    reservation::entity::{reservation, reservation_room},
    user::entity::user,
};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Statement};
use std::env;
use tracing::info;

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    info!("Successfully connected to the database.");

    // Check if schema update is enabled
    let should_update_schema = env::var("DB_SCHEMA_UPDATE")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid DB_SCHEMA_UPDATE value, defaulting to false. Use 'true' or 'false'."
            );
            false
        });

    if should_update_schema {
        create_tables(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

/// 엔티티 정의로부터 테이블과 인덱스를 생성합니다. 이미 존재하면 건너뜁니다.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Starting database schema synchronization...");

    // Order matters for foreign keys! (Parent first, then Child)

    // 1. Independent Entities
    create_table_if_not_exists(db, &schema, user::Entity).await?;
    create_table_if_not_exists(db, &schema, airline::Entity).await?;
    create_table_if_not_exists(db, &schema, blocked_ip::Entity).await?;
    create_table_if_not_exists(db, &schema, access_log::Entity).await?;

    // 2. Dependent Entities (Level 1)
    create_table_if_not_exists(db, &schema, hotel::Entity).await?;
    create_table_if_not_exists(db, &schema, board::Entity).await?;
    create_table_if_not_exists(db, &schema, flight_ticket::Entity).await?;

    // 3. Dependent Entities (Level 2)
    create_table_if_not_exists(db, &schema, room_type::Entity).await?;
    create_table_if_not_exists(db, &schema, discount_policy::Entity).await?;
    create_table_if_not_exists(db, &schema, reservation::Entity).await?;
    create_table_if_not_exists(db, &schema, comment::Entity).await?;
    create_table_if_not_exists(db, &schema, board_like::Entity).await?;

    // 4. Dependent Entities (Level 3 & Join Tables)
    create_table_if_not_exists(db, &schema, room::Entity).await?;
    create_table_if_not_exists(db, &schema, reservation_room::Entity).await?;

    create_unique_index_if_not_exists(
        db,
        "uq_board_like_board_user",
        "board_like",
        &["board_id", "user_id"],
    )
    .await?;
    create_unique_index_if_not_exists(
        db,
        "uq_room_type_room_number",
        "room",
        &["room_type_id", "room_number"],
    )
    .await?;
    // 예약 가능 여부 조회 최적화
    create_index_if_not_exists(
        db,
        "idx_reservation_room_room",
        "reservation_room",
        &["room_id"],
    )
    .await?;
    create_index_if_not_exists(
        db,
        "idx_reservation_hotel_checkout",
        "reservation",
        &["hotel_id", "actual_check_out_time"],
    )
    .await?;
    create_index_if_not_exists(db, "idx_access_log_timestamp", "access_log", &["timestamp"])
        .await?;

    info!("Database schema synchronization completed.");
    Ok(())
}

async fn create_index_if_not_exists<C: ConnectionTrait>(
    db: &C,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let sql = format!(
        "CREATE INDEX {} ON {} ({})",
        index_name,
        table_name,
        columns.join(", ")
    );
    execute_ignoring_existing(db, sql, index_name).await
}

async fn create_unique_index_if_not_exists<C: ConnectionTrait>(
    db: &C,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let sql = format!(
        "CREATE UNIQUE INDEX {} ON {} ({})",
        index_name,
        table_name,
        columns.join(", ")
    );
    execute_ignoring_existing(db, sql, index_name).await
}

/// 인덱스 중복 생성 에러는 무시한다
async fn execute_ignoring_existing<C: ConnectionTrait>(
    db: &C,
    sql: String,
    index_name: &str,
) -> Result<(), DbErr> {
    let stmt = Statement::from_string(db.get_database_backend(), sql);
    match db.execute(stmt).await {
        Ok(_) => Ok(()),
        Err(e) => {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("duplicate") || err_str.contains("exists") {
                Ok(())
            } else {
                tracing::error!("Failed to create index {}: {}", index_name, e);
                Err(e)
            }
        }
    }
}

async fn create_table_if_not_exists<C, E>(db: &C, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: sea_orm::EntityTrait,
{
    let backend = db.get_database_backend();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    db.execute(create_stmt).await.map(|_| ()).map_err(|e| {
        tracing::error!("Failed to create table: {}", e);
        e
    })
}
