//! Integration test: the flattened wire format of spec nodes.
//!
//! Nodes are decoded from realistic documents, re-encoded, and compared
//! against the original wire object. Property tests cover the node types
//! whose members are assembled from several sub-groups.

use oapi_spec::{
    CollectionFormat, Document, Items, Method, Response, Responses, Schema, SimpleType,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn petstore() -> Value {
    json!({
        "swagger": "2.0",
        "info": {"title": "Swagger Petstore", "version": "1.0.0"},
        "basePath": "/api",
        "consumes": ["application/json"],
        "produces": ["application/json"],
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "findPets",
                    "parameters": [{
                        "name": "tags",
                        "in": "query",
                        "type": "array",
                        "items": {"type": "string"},
                        "collectionFormat": "csv"
                    }],
                    "responses": {
                        "200": {
                            "description": "pet response",
                            "schema": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}
                        },
                        "default": {"description": "unexpected error"}
                    }
                },
                "x-internal": true
            }
        },
        "definitions": {
            "Pet": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"type": "string", "minLength": 1},
                    "tag": {"type": "string"}
                },
                "x-go-name": "Pet"
            }
        }
    })
}

// ── Document round trip ─────────────────────────────────────────────

#[test]
fn test_petstore_round_trip() {
    let wire = petstore();
    let doc = Document::from_value(wire.clone()).unwrap();
    let encoded = serde_json::to_value(&doc).unwrap();
    assert_eq!(encoded, wire);
}

#[test]
fn test_petstore_accessors() {
    let doc = Document::from_value(petstore()).unwrap();
    let find = doc.operation("findPets").unwrap();
    assert_eq!(doc.consumes_for(find), ["application/json"]);
    let response = find.props.responses.for_status(200).unwrap();
    assert_eq!(response.as_inline().unwrap().props.description, "pet response");
    // Unlisted status falls back to default.
    let fallback = find.props.responses.for_status(404).unwrap();
    assert_eq!(fallback.as_inline().unwrap().props.description, "unexpected error");

    let item = &doc.all_paths()["/pets"];
    assert!(item.operation(Method::Get).is_some());
    assert!(item.operation(Method::Post).is_none());
    assert_eq!(item.extensions["x-internal"], json!(true));
}

#[test]
fn test_mixed_reference_in_document_rejected() {
    let mut wire = petstore();
    wire["definitions"]["Broken"] = json!({"$ref": "#/definitions/Pet", "type": "object"});
    assert!(Document::from_value(wire).is_err());
}

// ── Properties ──────────────────────────────────────────────────────

fn arb_simple_type() -> impl Strategy<Value = SimpleType> {
    prop_oneof![
        Just(SimpleType::String),
        Just(SimpleType::Number),
        Just(SimpleType::Integer),
        Just(SimpleType::Boolean),
    ]
}

fn arb_collection_format() -> impl Strategy<Value = CollectionFormat> {
    prop_oneof![
        Just(CollectionFormat::Csv),
        Just(CollectionFormat::Ssv),
        Just(CollectionFormat::Tsv),
        Just(CollectionFormat::Pipes),
        Just(CollectionFormat::Multi),
    ]
}

proptest! {
    #[test]
    fn items_survive_encoding(
        element_type in arb_simple_type(),
        format in arb_collection_format(),
        max_items in proptest::option::of(0u64..100),
        unique in any::<bool>(),
        extension in "[a-z]{1,8}",
    ) {
        let mut items = Items::new()
            .collection_of(Items::new().typed(element_type, None), format);
        if let Some(max) = max_items {
            items = items.with_max_items(max);
        }
        if unique {
            items = items.unique_values();
        }
        items.extensions.insert(format!("x-{extension}"), json!(extension));

        let wire = serde_json::to_value(&items).unwrap();
        prop_assert_eq!(&wire["type"], &json!("array"));
        prop_assert_eq!(&wire["collectionFormat"], &json!(format.as_str()));
        let decoded: Items = serde_json::from_value(wire).unwrap();
        prop_assert_eq!(decoded, items);
    }

    #[test]
    fn responses_survive_encoding(
        codes in proptest::collection::btree_set(100u16..600, 0..6),
        with_default in any::<bool>(),
    ) {
        let mut responses = Responses::default();
        for code in &codes {
            responses.status_codes.insert(
                *code,
                Response::new(&format!("status {code}"))
                    .with_schema(Schema::new().typed(SimpleType::String, None).into_node())
                    .into_node(),
            );
        }
        if with_default {
            responses.default = Some(Response::new("fallback").into_node());
        }

        let wire = serde_json::to_value(&responses).unwrap();
        let decoded: Responses = serde_json::from_value(wire).unwrap();
        prop_assert_eq!(decoded, responses);
    }
}
