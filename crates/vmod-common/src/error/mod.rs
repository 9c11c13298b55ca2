mod console_error;

pub use console_error::{ConsoleError, ConsoleResult, ErrorReport};
