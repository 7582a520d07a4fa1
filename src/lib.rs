pub mod model;
pub mod store;
pub mod theme;

pub use model::form::{parse_labels, FieldErrors};
pub use model::storage::{Kind, Label};
pub use store::Store;
pub use theme::Theme;
