//! HTTP verbs an endpoint configuration can be declared for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The verb an [`EndpointConfig`](crate::EndpointConfig) applies to.
///
/// `Any` marks the default configuration of a type: it is used as the base
/// for every verb that has no configuration of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpVerb {
    #[default]
    Any,
    Get,
    /// Bulk query. Sent as a POST carrying the request body.
    List,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpVerb {
    /// The HTTP method used on the wire.
    ///
    /// `Any` has no method of its own and maps to GET.
    pub fn method_name(&self) -> &'static str {
        match self {
            HttpVerb::Any | HttpVerb::Get => "GET",
            HttpVerb::List | HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
        }
    }

    /// Whether responses for this verb may be served from the cache.
    pub fn is_cacheable(&self) -> bool {
        matches!(self, HttpVerb::Get | HttpVerb::List)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Any => "default",
            HttpVerb::Get => "GET",
            HttpVerb::List => "LIST",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
