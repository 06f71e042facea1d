pub mod prompts;
pub mod render;

pub use prompts::{match_options, prompt_menu, prompt_temperature, prompt_yes_no};
pub use render::{display_forecast, display_students};
