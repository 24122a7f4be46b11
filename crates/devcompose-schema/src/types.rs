//! Newtype wrappers for string identifiers used as map keys.
//!
//! Both newtypes serialize as plain strings and borrow as `str`, so maps keyed
//! by them can be queried with `&str`.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

string_newtype!(
    /// Key of a resource inside a [`crate::ResourceSet`], shaped `"{kind}:{name}"`.
    ResourceKey
);

string_newtype!(
    /// Name of a synthesized container, also its key in the services map.
    ContainerName
);

impl ResourceKey {
    pub fn deployment(name: &str) -> Self {
        Self::for_kind("deployment", name)
    }

    pub fn package(name_or_guid: &str) -> Self {
        Self::for_kind("package", name_or_guid)
    }

    pub fn for_kind(kind: &str, name: &str) -> Self {
        Self(format!("{}:{name}", kind.to_ascii_lowercase()))
    }
}

impl ContainerName {
    /// `"{deployment}_{executable}"`, the container name for one executable of a deployment.
    pub fn for_executable(deployment: &str, executable: &str) -> Self {
        Self(format!("{deployment}_{executable}"))
    }
}
