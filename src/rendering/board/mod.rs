pub mod board_visuals;
