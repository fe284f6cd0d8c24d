pub mod loader;

pub use loader::{TemplateEntry, TemplateLoader, TemplateLoaderError};
