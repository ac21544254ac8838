pub mod hotel;
pub mod room;
pub mod room_type;
