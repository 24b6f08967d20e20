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

//! Coalescing key identifying a shard group.
//!
//! All shards of the same stream resolve to the same key, so the key is
//! typically the stream identifier's canonical string form. The key is
//! immutable and used as a registry map key, so equality and hashing are
//! structural.

use crate::error::GroupError;
use crate::types::{ShardInfo, StreamIdentifier};
use std::fmt;
use std::sync::Arc;

/// Immutable identity of a shard group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(Arc<str>);

impl GroupKey {
    /// Build a key directly from a caller-supplied coalescing identity.
    pub fn of(raw: impl Into<Arc<str>>) -> Result<Self, GroupError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(GroupError::MissingIdentity);
        }
        Ok(Self(raw))
    }

    /// Derive the key for a shard.
    ///
    /// Multi-stream mode: the shard carries its own stream identifier and
    /// that value wins. Single-stream mode: the caller-supplied fallback is
    /// used. Either way all shards of one stream land on the same key.
    pub fn resolve(shard: &ShardInfo, fallback: &StreamIdentifier) -> Self {
        let raw = shard
            .stream_identifier()
            .unwrap_or(fallback)
            .serialize();
        Self(Arc::from(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_rejects_empty() {
        assert_eq!(GroupKey::of("").unwrap_err(), GroupError::MissingIdentity);
    }

    #[test]
    fn test_resolve_prefers_embedded_stream_identifier() {
        let embedded = StreamIdentifier::new("acc:stream-a").unwrap();
        let fallback = StreamIdentifier::new("acc:stream-b").unwrap();
        let shard = ShardInfo::new("shard-0001", Some(embedded)).unwrap();

        let key = GroupKey::resolve(&shard, &fallback);
        assert_eq!(key.as_str(), "acc:stream-a");
    }

    #[test]
    fn test_resolve_falls_back_in_single_stream_mode() {
        let fallback = StreamIdentifier::new("acc:stream-b").unwrap();
        let shard = ShardInfo::new("shard-0001", None).unwrap();

        let key = GroupKey::resolve(&shard, &fallback);
        assert_eq!(key.as_str(), "acc:stream-b");
    }

    #[test]
    fn test_same_stream_shards_share_one_key() {
        let fallback = StreamIdentifier::new("acc:stream-b").unwrap();
        let multi = ShardInfo::new(
            "shard-0001",
            Some(StreamIdentifier::new("acc:stream-b").unwrap()),
        )
        .unwrap();
        let single = ShardInfo::new("shard-0002", None).unwrap();

        assert_eq!(
            GroupKey::resolve(&multi, &fallback),
            GroupKey::resolve(&single, &fallback)
        );
    }

    #[test]
    fn test_structural_equality() {
        let a = GroupKey::of("acc:stream-a").unwrap();
        let b = GroupKey::of("acc:stream-a").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "acc:stream-a");
    }
}
