pub mod game_logic;
pub mod networking;
pub mod race;
pub mod settings;
