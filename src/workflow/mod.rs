pub mod wizard_controller;
pub mod wizard_state;

pub use wizard_controller::{WizardController, WizardError};
pub use wizard_state::{VisibleSteps, WizardState};
