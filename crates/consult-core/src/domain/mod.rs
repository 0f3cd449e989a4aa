pub mod email;
pub mod field;
pub mod needs;
pub mod request;

pub use email::EmailAddress;
pub use field::Field;
pub use needs::AutomationNeed;
pub use request::{ConsultationForm, ConsultationRequest};
