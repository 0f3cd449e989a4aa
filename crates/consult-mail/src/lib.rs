pub mod eml;
pub mod error;
pub mod handler;

pub use eml::{render_eml, write_eml};
pub use error::MailError;
pub use handler::{MailHandler, PrintHandler, SystemMailHandler};
