//! Newtype IDs for type-safe entity references.
//!
//! Identifiers in this system are opaque strings (the storage backends keep
//! them as plain text). Use the `define_id!` macro to create wrappers that
//! prevent accidentally mixing IDs from different entity types.

use chrono::Utc;

/// Macro to define a type-safe ID wrapper over an opaque string.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use vietlong_core::define_id;
/// define_id!(ProductId);
/// define_id!(OrderId);
///
/// let product_id = ProductId::new("P-1");
/// let order_id = OrderId::new("ORD-ABC123");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(OrderId);
define_id!(UserId);

/// Alphabet used for generated order-ID suffixes.
const ORDER_SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random order-ID suffix.
const ORDER_SUFFIX_LEN: usize = 6;

impl OrderId {
    /// Generate a fresh order identifier.
    ///
    /// Format: `ORD-` followed by six random uppercase alphanumerics,
    /// e.g. `ORD-7KQ2ZD`. Human-readable prefix, random suffix.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..ORDER_SUFFIX_LEN)
            .map(|_| {
                let idx = rand::Rng::random_range(&mut rng, 0..ORDER_SUFFIX_ALPHABET.len());
                char::from(ORDER_SUFFIX_ALPHABET[idx])
            })
            .collect();
        Self(format!("ORD-{suffix}"))
    }
}

impl ProductId {
    /// Generate a fresh product identifier (`P-<millisecond epoch>`).
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("P-{}", Utc::now().timestamp_millis()))
    }
}

impl UserId {
    /// Generate a fresh customer identifier (`customer-<millisecond epoch>`).
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("customer-{}", Utc::now().timestamp_millis()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = ProductId::new("P-42");
        assert_eq!(id.as_str(), "P-42");
        assert_eq!(id.to_string(), "P-42");
        assert_eq!(id.clone().into_inner(), "P-42");
    }

    #[test]
    fn test_order_id_generate_format() {
        let id = OrderId::generate();
        let s = id.as_str();
        assert!(s.starts_with("ORD-"), "unexpected prefix: {s}");
        let suffix = s.trim_start_matches("ORD-");
        assert_eq!(suffix.len(), ORDER_SUFFIX_LEN);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_product_id_generate_format() {
        let id = ProductId::generate();
        assert!(id.as_str().starts_with("P-"));
        assert!(
            id.as_str()
                .trim_start_matches("P-")
                .chars()
                .all(|c| c.is_ascii_digit())
        );
    }

    #[test]
    fn test_serde_transparent() {
        let id = OrderId::new("ORD-AAAAAA");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ORD-AAAAAA\"");
        let parsed: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
