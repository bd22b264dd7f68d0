pub mod envelope;
pub mod options;
pub mod scope;
pub mod selection;
pub mod submission;

pub use envelope::{
    ClassListResponse, Envelope, HomeworkListResponse, RepositoryListResponse, SubmitResponse,
};
pub use options::{ClassGroup, Homework, OptionKind, OptionPayload, OptionSets, Repository};
pub use scope::ScopeType;
pub use selection::Selections;
pub use submission::ScoringRequest;
