pub mod converter;
pub mod detect;
pub mod error;
pub mod formats;
pub mod session;

#[cfg(test)]
pub(crate) mod test_prelude;

pub use converter::Converter;
pub use detect::Format;
pub use error::{Error, Result};
pub use formats::get_converter;
pub use session::{Outcome, Session, Severity};
