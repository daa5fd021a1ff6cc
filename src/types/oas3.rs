//! Compact OpenAPI 3 type schema.
//!
//! Covers the structural core of an OpenAPI 3 description: enough for the
//! built-in rules and for reference discovery across paths, operations,
//! parameters, schemas, and components. Container types (`ParameterList`,
//! `SchemaMap`, …) are first-class so wildcard visitors see them.

use super::{ChildSlot, TypeDef, TypeSchema};

/// Name of the schema's entry-point type.
pub const ROOT: &str = "Root";

/// Build the OpenAPI 3 schema.
pub fn schema() -> TypeSchema {
    let mut s = TypeSchema::new();

    s.define(TypeDef::object(
        "Root",
        [
            ("openapi", ChildSlot::scalar()),
            ("info", ChildSlot::reference("Info")),
            ("servers", ChildSlot::of("ServerList")),
            ("paths", ChildSlot::of("PathMap")),
            ("components", ChildSlot::of("Components")),
            ("tags", ChildSlot::of("TagList")),
        ],
    ));

    s.define(TypeDef::object(
        "Info",
        [
            ("title", ChildSlot::scalar()),
            ("version", ChildSlot::scalar()),
            ("description", ChildSlot::scalar_reference()),
            ("termsOfService", ChildSlot::scalar()),
            ("contact", ChildSlot::reference("Contact")),
            ("license", ChildSlot::reference("License")),
        ],
    ));

    s.define(TypeDef::object(
        "Contact",
        [
            ("name", ChildSlot::scalar()),
            ("url", ChildSlot::scalar()),
            ("email", ChildSlot::scalar()),
        ],
    ));

    s.define(TypeDef::object(
        "License",
        [("name", ChildSlot::scalar()), ("url", ChildSlot::scalar())],
    ));

    s.define(TypeDef::list("ServerList", ChildSlot::of("Server")));
    s.define(TypeDef::object(
        "Server",
        [
            ("url", ChildSlot::scalar()),
            ("description", ChildSlot::scalar()),
        ],
    ));

    s.define(TypeDef::map("PathMap", ChildSlot::reference("PathItem")));

    s.define(TypeDef::object(
        "PathItem",
        [
            ("summary", ChildSlot::scalar()),
            ("description", ChildSlot::scalar_reference()),
            ("parameters", ChildSlot::reference("ParameterList")),
            ("get", ChildSlot::of("Operation")),
            ("put", ChildSlot::of("Operation")),
            ("post", ChildSlot::of("Operation")),
            ("delete", ChildSlot::of("Operation")),
            ("options", ChildSlot::of("Operation")),
            ("head", ChildSlot::of("Operation")),
            ("patch", ChildSlot::of("Operation")),
            ("trace", ChildSlot::of("Operation")),
            ("servers", ChildSlot::of("ServerList")),
        ],
    ));

    s.define(TypeDef::object(
        "Operation",
        [
            ("operationId", ChildSlot::scalar()),
            ("summary", ChildSlot::scalar()),
            ("description", ChildSlot::scalar_reference()),
            ("parameters", ChildSlot::reference("ParameterList")),
            ("requestBody", ChildSlot::reference("RequestBody")),
            ("responses", ChildSlot::of("ResponseMap")),
            ("servers", ChildSlot::of("ServerList")),
        ],
    ));

    s.define(TypeDef::list("ParameterList", ChildSlot::reference("Parameter")));
    s.define(TypeDef::map("ParameterMap", ChildSlot::reference("Parameter")));

    s.define(TypeDef::object(
        "Parameter",
        [
            ("name", ChildSlot::scalar()),
            ("in", ChildSlot::scalar()),
            ("description", ChildSlot::scalar_reference()),
            ("required", ChildSlot::scalar()),
            ("schema", ChildSlot::reference("Schema")),
            ("example", ChildSlot::scalar()),
            ("examples", ChildSlot::of("ExampleMap")),
        ],
    ));

    s.define(TypeDef::object(
        "RequestBody",
        [
            ("description", ChildSlot::scalar_reference()),
            ("required", ChildSlot::scalar()),
            ("content", ChildSlot::of("MediaTypeMap")),
        ],
    ));

    s.define(TypeDef::map("MediaTypeMap", ChildSlot::of("MediaType")));
    s.define(TypeDef::object(
        "MediaType",
        [
            ("schema", ChildSlot::reference("Schema")),
            ("example", ChildSlot::scalar()),
            ("examples", ChildSlot::of("ExampleMap")),
        ],
    ));

    s.define(TypeDef::map("ExampleMap", ChildSlot::reference("Example")));
    s.define(TypeDef::object(
        "Example",
        [
            ("summary", ChildSlot::scalar()),
            ("description", ChildSlot::scalar_reference()),
            ("value", ChildSlot::scalar()),
            ("externalValue", ChildSlot::scalar()),
        ],
    ));

    s.define(TypeDef::map("ResponseMap", ChildSlot::reference("Response")));
    s.define(TypeDef::object(
        "Response",
        [
            ("description", ChildSlot::scalar_reference()),
            ("content", ChildSlot::of("MediaTypeMap")),
        ],
    ));

    s.define(TypeDef::object(
        "Schema",
        [
            ("id", ChildSlot::scalar()),
            ("type", ChildSlot::scalar()),
            ("format", ChildSlot::scalar()),
            ("description", ChildSlot::scalar()),
            ("properties", ChildSlot::of("SchemaMap")),
            ("items", ChildSlot::reference("Schema")),
            ("additionalProperties", ChildSlot::reference("Schema")),
            ("allOf", ChildSlot::of("SchemaList")),
            ("oneOf", ChildSlot::of("SchemaList")),
            ("anyOf", ChildSlot::of("SchemaList")),
            ("not", ChildSlot::reference("Schema")),
        ],
    ));

    s.define(TypeDef::list("SchemaList", ChildSlot::reference("Schema")));
    s.define(TypeDef::map("SchemaMap", ChildSlot::reference("Schema")));

    s.define(TypeDef::object(
        "Components",
        [
            ("schemas", ChildSlot::of("SchemaMap")),
            ("parameters", ChildSlot::of("ParameterMap")),
            ("responses", ChildSlot::of("ResponseMap")),
        ],
    ));

    s.define(TypeDef::list("TagList", ChildSlot::of("Tag")));
    s.define(TypeDef::object(
        "Tag",
        [
            ("name", ChildSlot::scalar()),
            ("description", ChildSlot::scalar_reference()),
        ],
    ));

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeShape;

    #[test]
    fn root_type_is_defined() {
        let schema = schema();
        assert!(schema.contains(ROOT));
        let info = schema.get(ROOT).unwrap().property("info").unwrap();
        assert!(info.referenceable);
        assert_eq!(info.type_name.as_deref(), Some("Info"));
    }

    #[test]
    fn containers_are_first_class_types() {
        let schema = schema();
        assert!(matches!(
            schema.get("ParameterList").unwrap().shape(),
            TypeShape::List { item } if item.referenceable
        ));
        assert!(matches!(
            schema.get("SchemaMap").unwrap().shape(),
            TypeShape::Map { value } if value.referenceable
        ));
    }

    #[test]
    fn description_slots_are_referenceable_scalars() {
        let schema = schema();
        let slot = schema.get("Info").unwrap().property("description").unwrap();
        assert!(slot.referenceable);
        assert!(slot.type_name.is_none());
    }

    #[test]
    fn schemas_hang_off_parameters_and_media_types_only() {
        let schema = schema();
        assert!(schema.get("Operation").unwrap().property("schema").is_none());
        assert!(schema.get("Parameter").unwrap().property("schema").is_some());
        assert!(schema.get("MediaType").unwrap().property("schema").is_some());
    }

    #[test]
    fn examples_are_referenceable_map_entries() {
        let schema = schema();
        let slot = schema
            .get("MediaType")
            .unwrap()
            .property("examples")
            .unwrap();
        assert_eq!(slot.type_name.as_deref(), Some("ExampleMap"));
        assert!(matches!(
            schema.get("ExampleMap").unwrap().shape(),
            TypeShape::Map { value } if value.referenceable
        ));
    }
}
