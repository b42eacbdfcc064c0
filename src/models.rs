mod edge;
mod ids;
mod note;

pub use edge::{Edge, Graph};
pub use ids::ShortId;
pub use note::{NoteRecord, NoteSummary, TAG_SEPARATOR};
