/// State module
///
/// Derived controller state used for observation and logging.

pub mod controller_state;

// Re-export commonly used types
pub use controller_state::ControllerState;
