//! Serde helpers for optional `_id` fields.
//!
//! Documents carry their id as a native ObjectId in the store but as a plain
//! hex string on the wire. Serialization always emits the hex form (ids are
//! never serialized back into the store — inserts omit `_id` and let the
//! server generate it); deserialization accepts either form.

use bson::oid::ObjectId;
use bson::Bson;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ObjectId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Bson>::deserialize(deserializer)? {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::ObjectId(oid)) => Ok(Some(oid)),
        Some(Bson::String(s)) => ObjectId::parse_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected an object id, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use bson::oid::ObjectId;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Doc {
        #[serde(
            rename = "_id",
            default,
            with = "crate::oid",
            skip_serializing_if = "Option::is_none"
        )]
        id: Option<ObjectId>,
    }

    #[test]
    fn test_json_hex_roundtrip() {
        let oid = ObjectId::new();
        let json = serde_json::to_string(&Doc { id: Some(oid) }).unwrap();
        assert_eq!(json, format!("{{\"_id\":\"{}\"}}", oid.to_hex()));

        let back: Doc = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, Some(oid));
    }

    #[test]
    fn test_missing_id_is_omitted() {
        let json = serde_json::to_string(&Doc { id: None }).unwrap();
        assert_eq!(json, "{}");

        let back: Doc = serde_json::from_str("{}").unwrap();
        assert!(back.id.is_none());
    }

    #[test]
    fn test_bson_native_object_id() {
        let oid = ObjectId::new();
        let doc = bson::doc! { "_id": oid };
        let back: Doc = bson::from_document(doc).unwrap();
        assert_eq!(back.id, Some(oid));
    }

    #[test]
    fn test_garbage_id_rejected() {
        assert!(serde_json::from_str::<Doc>("{\"_id\":\"not-hex\"}").is_err());
    }
}
