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

//! Abstract contract for a shard membership container.

use crate::member::GroupMember;
use crate::types::ShardInfo;
use async_trait::async_trait;
use imbl::HashMap as ImHashMap;
use std::sync::Arc;

/// Point-in-time snapshot of a group's membership.
///
/// Structural sharing makes the snapshot O(1) to take; mutations applied
/// to the group after the snapshot is taken never appear in it.
pub type MemberMap = ImHashMap<ShardInfo, Arc<dyn GroupMember>>;

/// Membership container for the shards of one coalescing key.
///
/// Structural mutations are async because they await every member's pause
/// acknowledgment; reads are sync and never block on the update lock.
#[async_trait]
pub trait ShardGroup: Send + Sync {
    /// Register `member` under `shard`.
    ///
    /// No-op if the group is already shut down or the shard is already
    /// present (the existing member is retained).
    async fn add_shard(&self, shard: ShardInfo, member: Arc<dyn GroupMember>);

    /// Unregister the member at `shard`. No-op if absent.
    async fn remove_shard(&self, shard: &ShardInfo);

    /// Current member count. Wait-free.
    fn shard_count(&self) -> usize;

    /// Point-in-time snapshot of the membership. Wait-free.
    fn shards_view(&self) -> MemberMap;

    /// Whether the group has been shut down. One-way.
    fn is_shutdown(&self) -> bool;

    /// Shut the group down if, and only if, it is currently empty.
    ///
    /// Returns whether the group is shut down after the call.
    async fn shutdown_if_empty(&self) -> bool;
}

/// Permanently-shutdown, permanently-empty group.
///
/// Stateless sentinel used where no real group exists, e.g. ungrouped
/// single-shard operation. Share [`NOOP_SHARD_GROUP`] instead of
/// constructing new instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopShardGroup;

/// The shared sentinel instance.
pub static NOOP_SHARD_GROUP: NoopShardGroup = NoopShardGroup;

#[async_trait]
impl ShardGroup for NoopShardGroup {
    async fn add_shard(&self, _shard: ShardInfo, _member: Arc<dyn GroupMember>) {}

    async fn remove_shard(&self, _shard: &ShardInfo) {}

    fn shard_count(&self) -> usize {
        0
    }

    fn shards_view(&self) -> MemberMap {
        MemberMap::new()
    }

    fn is_shutdown(&self) -> bool {
        true
    }

    async fn shutdown_if_empty(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::MockGroupMember;

    #[tokio::test]
    async fn test_noop_group_is_permanently_shutdown_and_empty() {
        let group = &NOOP_SHARD_GROUP;
        assert!(group.is_shutdown());
        assert_eq!(group.shard_count(), 0);
        assert!(group.shards_view().is_empty());
        assert!(group.shutdown_if_empty().await);
    }

    #[tokio::test]
    async fn test_noop_group_never_touches_members() {
        let group = &NOOP_SHARD_GROUP;
        let shard = ShardInfo::new("shard-0001", None).unwrap();

        // No pause, resume or lifecycle call may ever reach the member.
        let member = MockGroupMember::new();
        group.add_shard(shard.clone(), Arc::new(member)).await;

        assert_eq!(group.shard_count(), 0);
        group.remove_shard(&shard).await;
        assert_eq!(group.shard_count(), 0);
    }
}
