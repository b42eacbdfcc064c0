//! Output in the launcher's workflow formats.
//!
//! Script filters read either an XML `<items>` document or a JSON
//! `{"items": [...]}` document from stdout. Commands that hand results to
//! the launcher build one of these documents and print it unmodified.

pub mod ext;
mod json;
mod xml;

pub use json::{JsonItem, json_items, tag_items, title_items};
pub use xml::{XmlItem, create_item, link_items, open_items, xml_items};
