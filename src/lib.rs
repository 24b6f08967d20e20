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

//! Shard-group membership and quiescence core for sharded stream consumers.
//!
//! Aggregates the independent per-shard consumption workers of one logical
//! stream (or another coalescing key) under a single addressable group and
//! guarantees that membership changes are never observed mid-flight:
//! every structural mutation pauses all members at a safe point, applies
//! the change, and resumes the survivors. Reads never block. The external
//! scheduler resolves shards to [`GroupKey`]s, fetches groups from the
//! [`GroupRegistry`], and periodically calls
//! [`QuiescentShardGroup::drive_lifecycle`] per group.

mod error;
mod group_key;
mod member;
mod quiescent_group;
mod registry;
mod shard_group;
mod types;

pub use error::GroupError;
pub use group_key::GroupKey;
pub use member::{GroupMember, MemberState, ShutdownReason};
pub use quiescent_group::QuiescentShardGroup;
pub use registry::GroupRegistry;
pub use shard_group::{MemberMap, NOOP_SHARD_GROUP, NoopShardGroup, ShardGroup};
pub use types::{ShardInfo, StreamIdentifier};
