mod cli_mode;
mod fill_mode;
mod import_mode;
mod message_mode;
mod open_mode;
mod settings_mode;

pub use cli_mode::CliModeResult;
pub use fill_mode::fill_mode;
pub use import_mode::import_mode;
pub use message_mode::message_mode;
pub use open_mode::open_mode;
pub use settings_mode::settings_mode;
