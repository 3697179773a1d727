//! Type-safe, cheap-to-clone identifiers.
//!
//! All identifiers use Arc<str> so cloning one into a layer name or a UI row
//! never copies the string.

use std::sync::Arc;

/// Declares a newtype identifier over `Arc<str>`.
///
/// Exported so the rendering crate can declare its own layer and basemap
/// names with the same behaviour.
#[macro_export]
macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub struct $name(::std::sync::Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                ::std::sync::Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<::std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                self.0.cmp(&other.0)
            }
        }

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

impl_identifier!(TripIdentifier);
impl_identifier!(LinkedTripIdentifier);

impl TripIdentifier {
    pub(crate) fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = TripIdentifier::new("trip_123");
        let id2 = TripIdentifier::new("trip_123");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(id1.shares_storage(&id3)); // Clone shares Arc
        assert!(!id1.shares_storage(&id2));
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(LinkedTripIdentifier::new("lt_1"), 42);

        assert_eq!(map.get(&LinkedTripIdentifier::new("lt_1")), Some(&42));
    }

    #[test]
    fn test_identifier_ordering() {
        let mut ids = vec![TripIdentifier::new("b"), TripIdentifier::new("a")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "a");
    }

    #[test]
    fn test_identifier_conversions() {
        let id: TripIdentifier = "trip_1".into();
        let _id2: TripIdentifier = String::from("trip_2").into();
        assert_eq!(format!("{}", id), "trip_1");
    }
}
