pub mod app_state;
pub mod settings;

pub use app_state::{Application, Collaborators};
pub use settings::ShellConfig;
