//! Conversion between numeric database ids and opaque, type-scoped hash ids.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{Result, TsunagiError};

/// Resource-type scope of an encoded id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    Shift,
    CareLog,
    Task,
}

impl HashType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashType::Shift => "Shift",
            HashType::CareLog => "CareLog",
            HashType::Task => "Task",
        }
    }

    fn from_name(s: &str) -> Option<Self> {
        match s {
            "Shift" => Some(HashType::Shift),
            "CareLog" => Some(HashType::CareLog),
            "Task" => Some(HashType::Task),
            _ => None,
        }
    }
}

/// Id as it arrives on the path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceId {
    Database(u64),
    Hashed(String),
}

impl ResourceId {
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
            && let Ok(id) = raw.parse()
        {
            return ResourceId::Database(id);
        }
        ResourceId::Hashed(raw.to_string())
    }
}

pub trait IdCodec: Send + Sync {
    fn encode(&self, hash_type: HashType, database_id: u64) -> String;

    fn decode(&self, hash: &str) -> Option<(HashType, u64)>;

    /// Id used for lookups: numeric ids are encoded, hashes pass through
    fn lookup_id(&self, hash_type: HashType, raw: &str) -> String {
        match ResourceId::parse(raw) {
            ResourceId::Database(id) => self.encode(hash_type, id),
            ResourceId::Hashed(hash) => hash,
        }
    }

    /// Id used by mutations: must be numeric
    fn mutation_id(&self, hash_type: HashType, raw: &str) -> Result<String> {
        match ResourceId::parse(raw) {
            ResourceId::Database(id) => Ok(self.encode(hash_type, id)),
            ResourceId::Hashed(_) => Err(TsunagiError::unprocessable(format!(
                "{} Id needs to be integer.",
                hash_type.as_str()
            ))),
        }
    }
}

/// Relay-style global ids: base64 of `Type:id`
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalIdCodec;

impl IdCodec for GlobalIdCodec {
    fn encode(&self, hash_type: HashType, database_id: u64) -> String {
        STANDARD.encode(format!("{}:{}", hash_type.as_str(), database_id))
    }

    fn decode(&self, hash: &str) -> Option<(HashType, u64)> {
        let bytes = STANDARD.decode(hash).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        let (type_name, id) = text.split_once(':')?;
        Some((HashType::from_name(type_name)?, id.parse().ok()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource_id() {
        assert_eq!(ResourceId::parse("123"), ResourceId::Database(123));
        assert_eq!(
            ResourceId::parse("U2hpZnQ6MTIz"),
            ResourceId::Hashed("U2hpZnQ6MTIz".to_string())
        );
        assert_eq!(ResourceId::parse(""), ResourceId::Hashed(String::new()));
        assert_eq!(ResourceId::parse("-1"), ResourceId::Hashed("-1".to_string()));
        // Overflows u64
        assert!(matches!(
            ResourceId::parse("99999999999999999999999"),
            ResourceId::Hashed(_)
        ));
    }

    #[test]
    fn test_encode_decode() {
        let codec = GlobalIdCodec;
        let hash = codec.encode(HashType::Shift, 42);
        assert_eq!(hash, "U2hpZnQ6NDI=");
        assert_eq!(codec.decode(&hash), Some((HashType::Shift, 42)));
        assert_eq!(codec.decode("not-base64!"), None);
    }

    #[test]
    fn test_lookup_id() {
        let codec = GlobalIdCodec;
        assert_eq!(
            codec.lookup_id(HashType::Task, "7"),
            codec.encode(HashType::Task, 7)
        );
        assert_eq!(codec.lookup_id(HashType::Task, "VGFzazo3"), "VGFzazo3");
    }

    #[test]
    fn test_mutation_id_requires_number() {
        let codec = GlobalIdCodec;
        assert_eq!(
            codec.mutation_id(HashType::CareLog, "9").unwrap(),
            codec.encode(HashType::CareLog, 9)
        );
        let err = codec.mutation_id(HashType::CareLog, "abc").unwrap_err();
        assert_eq!(err.to_string(), "CareLog Id needs to be integer.");
    }
}
