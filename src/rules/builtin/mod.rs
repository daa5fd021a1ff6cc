//! Built-in lint rules.

mod example_value;
mod server_not_example;
mod server_trailing_slash;
mod tag_description;
mod tags_alphabetical;

pub use example_value::ExampleValueOrExternalValue;
pub use server_not_example::ServerNotExample;
pub use server_trailing_slash::ServerTrailingSlash;
pub use tag_description::TagDescription;
pub use tags_alphabetical::TagsAlphabetical;
