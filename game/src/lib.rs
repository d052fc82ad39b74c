pub mod board;
pub mod collision;
pub mod controller;
pub mod input;
pub mod leaderboard;
pub mod line_clear;
pub mod name_prompt;
pub mod piece;
pub mod session;
pub mod settings;
pub mod view;
