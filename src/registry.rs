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

//! Process-wide registry mapping group keys to their live group instances.

use crate::group_key::GroupKey;
use crate::quiescent_group::QuiescentShardGroup;
use crate::shard_group::ShardGroup;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of shard groups with create-on-first-use semantics.
///
/// A shut-down group is never resurrected: resolving its key again yields
/// a fresh instance, and [`GroupRegistry::remove_if_shutdown`] reclaims the
/// entry once the group is shut down and empty.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: DashMap<GroupKey, Arc<QuiescentShardGroup>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }

    /// Fetch the group for `key`, creating it on first use.
    ///
    /// If the registered group has already shut down it is replaced with a
    /// fresh instance rather than handed back.
    pub fn get_or_create(&self, key: &GroupKey) -> Arc<QuiescentShardGroup> {
        match self.groups.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                if entry.get().is_shutdown() {
                    info!("Replacing shut down shard group {key} with a fresh instance");
                    let fresh = Arc::new(QuiescentShardGroup::new(key.clone()));
                    entry.insert(Arc::clone(&fresh));
                    fresh
                } else {
                    Arc::clone(entry.get())
                }
            }
            Entry::Vacant(entry) => {
                info!("Creating shard group {key}");
                let group = Arc::new(QuiescentShardGroup::new(key.clone()));
                entry.insert(Arc::clone(&group));
                group
            }
        }
    }

    pub fn get(&self, key: &GroupKey) -> Option<Arc<QuiescentShardGroup>> {
        self.groups.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Remove the group at `key` if it has shut down and is empty.
    ///
    /// Returns whether an entry was removed.
    pub fn remove_if_shutdown(&self, key: &GroupKey) -> bool {
        let removed = self
            .groups
            .remove_if(key, |_, group| {
                group.is_shutdown() && group.shard_count() == 0
            })
            .is_some();
        if removed {
            debug!("Removed shut down shard group {key}");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::MockGroupMember;
    use crate::types::ShardInfo;

    fn key(raw: &str) -> GroupKey {
        GroupKey::of(raw).unwrap()
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_live_groups() {
        let registry = GroupRegistry::new();
        let key = key("acc:stream-a");

        let first = registry.get_or_create(&key);
        let second = registry.get_or_create(&key);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_group_is_never_resurrected() {
        let registry = GroupRegistry::new();
        let key = key("acc:stream-a");

        let original = registry.get_or_create(&key);
        assert!(original.shutdown_if_empty().await);

        let fresh = registry.get_or_create(&key);
        assert!(!Arc::ptr_eq(&original, &fresh));
        assert!(!fresh.is_shutdown());
    }

    #[tokio::test]
    async fn test_remove_if_shutdown_requires_shutdown() {
        let registry = GroupRegistry::new();
        let key = key("acc:stream-a");
        let group = registry.get_or_create(&key);

        let mut member = MockGroupMember::new();
        member.expect_resume_from_update().times(1).return_const(());
        member.expect_pause_for_update().times(1).return_const(());
        group
            .add_shard(
                ShardInfo::new("shard-0001", None).unwrap(),
                Arc::new(member),
            )
            .await;

        assert!(!registry.remove_if_shutdown(&key));
        assert_eq!(registry.len(), 1);

        group
            .remove_shard(&ShardInfo::new("shard-0001", None).unwrap())
            .await;
        assert!(group.shutdown_if_empty().await);

        assert!(registry.remove_if_shutdown(&key));
        assert!(registry.is_empty());
        assert!(registry.get(&key).is_none());
    }
}
