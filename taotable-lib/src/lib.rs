//! Sortable-table component library
//!
//! A headless port of the `tao-test-component` element: it receives or
//! fetches a JSON array of flat objects and renders it as an HTML table
//! with click-to-sort columns. Rendering is a pure function over the
//! data set, sort state and template set; [`TableComponent`] is the
//! thin stateful controller a host surface drives.
//!
//! # Example
//!
//! ```
//! use taotable_lib::TableComponent;
//! use taotable_lib::template::TemplateSet;
//!
//! let component = TableComponent::new(TemplateSet::builtin());
//! component.embed_json(r#"[{"name":"b"},{"name":"a"}]"#).unwrap();
//! let view = component.click("name").unwrap();
//! assert!(view.html.contains("<table"));
//! ```

pub mod component;
pub mod error;
pub mod model;
pub mod registry;
pub mod render;
pub mod template;

pub use component::ComponentConfig;
pub use component::ErrorMode;
pub use component::TableComponent;
pub use error::Error;
pub use model::DataSet;
pub use model::Row;
pub use model::SortDir;
pub use model::SortState;
pub use registry::TAG_NAME;
pub use registry::factory;
pub use render::View;
