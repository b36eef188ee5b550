pub mod deck;
pub mod games;
pub mod players;
pub mod projection;
