//! Endpoint types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A TAMS endpoint the client reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// `GET /flows`
    Flows,
    /// `GET /sources`
    Sources,
    /// `GET /objects`
    Objects,
    /// `GET /service`, a single object
    Service,
}

impl Resource {
    /// List endpoints
    pub const PAGINATED: [Resource; 3] = [Resource::Flows, Resource::Sources, Resource::Objects];

    /// Endpoint path
    pub fn path(self) -> &'static str {
        match self {
            Self::Flows => "/flows",
            Self::Sources => "/sources",
            Self::Objects => "/objects",
            Self::Service => "/service",
        }
    }

    /// Whether the endpoint returns pages of entities
    pub fn is_paginated(self) -> bool {
        !matches!(self, Self::Service)
    }

    fn name(self) -> &'static str {
        self.path().trim_start_matches('/')
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('/').to_ascii_lowercase().as_str() {
            "flows" => Ok(Self::Flows),
            "sources" => Ok(Self::Sources),
            "objects" => Ok(Self::Objects),
            "service" => Ok(Self::Service),
            _ => Err(Error::parse(
                s,
                "expected one of flows, sources, objects, service",
            )),
        }
    }
}
