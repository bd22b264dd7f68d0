pub mod option_loader;
pub mod submission_gateway;

pub use option_loader::{LoadOutcome, LoadRequest, LoadTicket, OptionLoader};
pub use submission_gateway::{SubmissionGateway, SubmitOutcome};
