pub mod apply;
pub mod component;
pub mod editor;
pub mod element;
pub mod pending;
pub mod scanner;
pub mod selection;
pub mod styles_editor;
pub mod tools;

pub use component::{SavedContent, VisualEditor};
pub use editor::{ApplyOutcome, PageEditor, TextDraft};
pub use element::{EditProperty, ElementDescriptor, SemanticType, Tool, ToolSet};
pub use pending::{ChangeKey, CommitReport, PendingChange, PendingChanges};
pub use tools::{ColorTarget, GradientKind, GradientSpec, ToolAction};
