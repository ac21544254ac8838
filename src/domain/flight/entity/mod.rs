pub mod airline;
pub mod flight_ticket;
