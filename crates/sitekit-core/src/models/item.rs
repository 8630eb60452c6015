use serde::Serialize;
use serde_json::{Map, Value};

/// JSON:API envelope for creating a content record.
///
/// `relationships.item_type.data.id` pins the model the record belongs
/// to; the server cannot resolve the target schema without it. The
/// attributes map is untyped from the client's perspective: its shape is
/// dictated by the model's field definitions on the server.
#[derive(Debug, Clone, Serialize)]
pub struct ItemPayload {
    data: ItemData,
}

#[derive(Debug, Clone, Serialize)]
struct ItemData {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: Map<String, Value>,
    relationships: ItemRelationships,
}

#[derive(Debug, Clone, Serialize)]
struct ItemRelationships {
    item_type: ItemTypeRelation,
}

#[derive(Debug, Clone, Serialize)]
struct ItemTypeRelation {
    data: ItemTypeRef,
}

#[derive(Debug, Clone, Serialize)]
struct ItemTypeRef {
    #[serde(rename = "type")]
    kind: &'static str,
    id: String,
}

impl ItemPayload {
    pub fn new(model_id: impl Into<String>, attributes: Map<String, Value>) -> Self {
        ItemPayload {
            data: ItemData {
                kind: "item",
                attributes,
                relationships: ItemRelationships {
                    item_type: ItemTypeRelation {
                        data: ItemTypeRef {
                            kind: "item_type",
                            id: model_id.into(),
                        },
                    },
                },
            },
        }
    }
}
