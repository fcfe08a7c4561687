pub mod csv;

pub use self::csv::{load_responses, parse_responses, Dataset, InputError, InputOptions};
