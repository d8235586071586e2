//! Domain DTOs for the item service.
//!
//! # Design
//! The wire shape is deliberately asymmetric: request payloads arrive with
//! capitalised keys (`Name`, `Description`) while `Item` goes out with
//! lower-case keys (`id`, `name`, `description`). Existing clients depend on
//! both spellings, so neither side is normalised.
//!
//! Request keys are matched case-insensitively (`Name`, `name` and `NAME` are
//! the same key). When a key appears more than once the last value wins, and
//! a `null` value leaves the field empty.
//!
//! Request payloads never carry an ID. The store is the only place IDs are
//! minted.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A single item record owned by an `ItemStore`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Request payload for creating a new item.
///
/// Missing fields decode as empty strings; rejecting an empty `name` is the
/// router's job, not the decoder's.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RequestFields")]
pub struct CreateItemRequest {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Request payload for replacing the name and description of an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RequestFields")]
pub struct UpdateItemRequest {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Decoded body shared by both request payloads.
#[derive(Default)]
struct RequestFields {
    name: String,
    description: String,
}

enum FieldKey {
    Name,
    Description,
    Other,
}

impl<'de> Deserialize<'de> for FieldKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = FieldKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a field name")
            }

            fn visit_str<E: de::Error>(self, key: &str) -> Result<FieldKey, E> {
                Ok(if key.eq_ignore_ascii_case("name") {
                    FieldKey::Name
                } else if key.eq_ignore_ascii_case("description") {
                    FieldKey::Description
                } else {
                    FieldKey::Other
                })
            }
        }

        deserializer.deserialize_identifier(KeyVisitor)
    }
}

impl<'de> Deserialize<'de> for RequestFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = RequestFields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object with Name and Description")
            }

            fn visit_map<A>(self, mut map: A) -> Result<RequestFields, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = RequestFields::default();
                while let Some(key) = map.next_key::<FieldKey>()? {
                    match key {
                        FieldKey::Name => {
                            if let Some(name) = map.next_value::<Option<String>>()? {
                                fields.name = name;
                            }
                        }
                        FieldKey::Description => {
                            if let Some(description) = map.next_value::<Option<String>>()? {
                                fields.description = description;
                            }
                        }
                        FieldKey::Other => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

impl From<RequestFields> for CreateItemRequest {
    fn from(fields: RequestFields) -> Self {
        Self::new(fields.name, fields.description)
    }
}

impl From<RequestFields> for UpdateItemRequest {
    fn from(fields: RequestFields) -> Self {
        Self::new(fields.name, fields.description)
    }
}

impl CreateItemRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl UpdateItemRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
