// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::error::GroupError;
use std::fmt;
use std::sync::Arc;

/// Canonical identifier of a stream.
///
/// The serialized form is the single source of truth for group key
/// derivation: two shards consuming the same stream must observe the same
/// serialized value regardless of operating mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamIdentifier(Arc<str>);

impl StreamIdentifier {
    pub fn new(value: impl Into<Arc<str>>) -> Result<Self, GroupError> {
        let value = value.into();
        if value.is_empty() {
            return Err(GroupError::MissingIdentity);
        }
        Ok(Self(value))
    }

    /// Canonical string form of this identifier.
    pub fn serialize(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a single shard within a group.
///
/// Used as the member-map key, so equality and hashing are structural.
/// In multi-stream mode the shard carries its own stream identifier;
/// in single-stream mode the field is absent and the caller supplies a
/// fallback at group key resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShardInfo {
    shard_id: Arc<str>,
    stream_identifier: Option<StreamIdentifier>,
}

impl ShardInfo {
    pub fn new(
        shard_id: impl Into<Arc<str>>,
        stream_identifier: Option<StreamIdentifier>,
    ) -> Result<Self, GroupError> {
        let shard_id = shard_id.into();
        if shard_id.is_empty() {
            return Err(GroupError::MissingShardId);
        }
        Ok(Self {
            shard_id,
            stream_identifier,
        })
    }

    pub fn shard_id(&self) -> &str {
        &self.shard_id
    }

    /// The embedded stream identifier, present only in multi-stream mode.
    pub fn stream_identifier(&self) -> Option<&StreamIdentifier> {
        self.stream_identifier.as_ref()
    }
}

impl fmt::Display for ShardInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.shard_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_identifier_rejects_empty() {
        assert_eq!(
            StreamIdentifier::new("").unwrap_err(),
            GroupError::MissingIdentity
        );
    }

    #[test]
    fn test_shard_info_rejects_empty_id() {
        assert_eq!(
            ShardInfo::new("", None).unwrap_err(),
            GroupError::MissingShardId
        );
    }

    #[test]
    fn test_shard_info_structural_equality() {
        let stream = StreamIdentifier::new("acc:stream-1").unwrap();
        let a = ShardInfo::new("shard-0001", Some(stream.clone())).unwrap();
        let b = ShardInfo::new("shard-0001", Some(stream)).unwrap();
        assert_eq!(a, b);

        let c = ShardInfo::new("shard-0001", None).unwrap();
        assert_ne!(a, c);
    }
}
