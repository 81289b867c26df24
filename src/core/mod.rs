pub mod aggregate;
pub mod selection;
pub mod status;
pub mod wizard;

pub use selection::SelectionSet;
pub use status::{ActionKind, Category, StatusDescriptor, StatusRegistry};
pub use wizard::{SubmissionToken, Wizard, WizardAction, WizardError, WizardStep};
