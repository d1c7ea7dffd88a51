pub mod action;
pub mod modal;
pub mod records;
pub mod reducer;
pub mod runtime;
pub mod section;
pub mod settings;
pub mod state;
pub mod toast;

pub use action::{Action, ActionError, RawAction, parse_actions};
pub use modal::{Modal, ModalRegistry};
pub use records::{Assignee, ProfilePatch, Project, RecordId, Task, UserProfile, Workspace, WorkspaceRequest};
pub use reducer::reduce;
pub use runtime::{Store, StoreClosed, StoreHandle, StoreOptions};
pub use section::Section;
pub use settings::{PathError, Settings};
pub use state::AppState;
pub use toast::{Toast, ToastId, ToastKind, ToastQueue};
