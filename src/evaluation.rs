pub mod board_scoring;
