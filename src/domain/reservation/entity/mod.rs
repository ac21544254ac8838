pub mod reservation;
pub mod reservation_room;
