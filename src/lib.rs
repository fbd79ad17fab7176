pub mod catalog;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod leaderboard;
pub mod player;
pub mod scheduler;
pub mod session;
