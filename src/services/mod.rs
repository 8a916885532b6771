// MiniBrowser services
// Services provide supporting functionality: settings persistence and favicon loading.

pub mod favicon;
pub mod settings_engine;
