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

//! Concurrency-safe shard group with a pause/mutate/resume update protocol.
//!
//! Uses ArcSwap + imbl::HashMap for lock-free reads and structural sharing
//! on updates. Readers (`shard_count`, `shards_view`, `is_shutdown`) never
//! block; structural mutations serialize on a per-group exclusive lock and
//! quiesce every member before the map changes. Pausing the whole member
//! set, not just the shard being touched, is what lets future coalesced
//! emission read across members without ever observing a torn membership
//! change; it must not be weakened for the current no-buffering phase.

use crate::group_key::GroupKey;
use crate::member::GroupMember;
use crate::shard_group::{MemberMap, ShardGroup};
use crate::types::ShardInfo;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// Shard group whose membership only changes while every member is paused
/// at a safe point.
pub struct QuiescentShardGroup {
    key: GroupKey,
    members: ArcSwap<MemberMap>,
    /// One-way flag; may only transition to true while the map is empty.
    shutdown: AtomicBool,
    /// Informational only; correctness comes from the lock and the
    /// pause/resume sequence, not from this flag.
    updating: AtomicBool,
    /// Serializes structural mutations. Never taken by readers.
    update_lock: Mutex<()>,
}

impl QuiescentShardGroup {
    pub fn new(key: GroupKey) -> Self {
        Self {
            key,
            members: ArcSwap::from_pointee(MemberMap::new()),
            shutdown: AtomicBool::new(false),
            updating: AtomicBool::new(false),
            update_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Whether a structural mutation is currently in progress.
    pub fn is_updating(&self) -> bool {
        self.updating.load(Ordering::Acquire)
    }

    /// Drive every current member forward one lifecycle tick.
    ///
    /// Iterates a point-in-time snapshot, so a mutation racing with this
    /// call is observed either entirely before or entirely after it;
    /// iteration order is unspecified. Does not take the update lock.
    pub async fn drive_lifecycle(&self) {
        let members = self.members.load_full();
        for (shard, member) in members.iter() {
            trace!("Driving lifecycle for shard {shard} in group {}", self.key);
            member.execute_lifecycle().await;
        }
    }

    /// Request every member in `members` to reach a safe point; returns
    /// once all have acknowledged. A member that never acknowledges stalls
    /// the in-flight mutation, by contract.
    async fn pause_all(&self, members: &MemberMap) {
        for (shard, member) in members.iter() {
            trace!("Pausing shard {shard} in group {}", self.key);
            member.pause_for_update().await;
        }
    }

    async fn resume_all(&self, members: &MemberMap) {
        for (shard, member) in members.iter() {
            trace!("Resuming shard {shard} in group {}", self.key);
            member.resume_from_update().await;
        }
    }
}

impl fmt::Debug for QuiescentShardGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuiescentShardGroup")
            .field("key", &self.key)
            .field("shard_count", &self.shard_count())
            .field("shutdown", &self.is_shutdown())
            .field("updating", &self.is_updating())
            .finish()
    }
}

#[async_trait]
impl ShardGroup for QuiescentShardGroup {
    async fn add_shard(&self, shard: ShardInfo, member: Arc<dyn GroupMember>) {
        let _guard = self.update_lock.lock().await;
        if self.shutdown.load(Ordering::Acquire) {
            debug!(
                "Group {} is shut down, ignoring addition of shard {shard}",
                self.key
            );
            return;
        }

        self.updating.store(true, Ordering::Release);
        let current = self.members.load_full();
        self.pause_all(&current).await;

        let updated = if current.contains_key(&shard) {
            // First writer wins; the existing member is retained.
            debug!(
                "Shard {shard} is already a member of group {}, keeping existing member",
                self.key
            );
            current
        } else {
            debug!("Adding shard {shard} to group {}", self.key);
            Arc::new(current.update(shard, member))
        };
        self.members.store(Arc::clone(&updated));

        self.resume_all(&updated).await;
        self.updating.store(false, Ordering::Release);
    }

    async fn remove_shard(&self, shard: &ShardInfo) {
        let _guard = self.update_lock.lock().await;

        self.updating.store(true, Ordering::Release);
        let current = self.members.load_full();
        self.pause_all(&current).await;

        let updated = if current.contains_key(shard) {
            debug!("Removing shard {shard} from group {}", self.key);
            Arc::new(current.without(shard))
        } else {
            debug!(
                "Shard {shard} is not a member of group {}, nothing to remove",
                self.key
            );
            current
        };
        self.members.store(Arc::clone(&updated));

        // The removed member gets no resume; it left the group paused and
        // is the external scheduler's to dispose of.
        self.resume_all(&updated).await;
        self.updating.store(false, Ordering::Release);
    }

    fn shard_count(&self) -> usize {
        self.members.load().len()
    }

    fn shards_view(&self) -> MemberMap {
        (**self.members.load()).clone()
    }

    fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    async fn shutdown_if_empty(&self) -> bool {
        // Taking the update lock closes the check-then-act race against a
        // concurrent add_shard: the flag can only flip while the map is
        // provably empty.
        let _guard = self.update_lock.lock().await;
        if !self.members.load().is_empty() {
            return false;
        }
        if self
            .shutdown
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            debug!("Group {} shut down", self.key);
        }
        true
    }
}
