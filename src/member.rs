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

//! Capability set of a group member.
//!
//! The per-shard consumption worker is implemented and owned externally;
//! the group only pauses, resumes and drives it. Pause is a
//! request-and-acknowledge call: the returned future completes once the
//! member has reached a safe suspension point, and the group does not
//! proceed with a structural mutation until every member has acknowledged.

use async_trait::async_trait;
use strum::Display;

/// Internal lifecycle state a member moves through around a group update.
///
/// Member implementations are free to track their safe-point handshake with
/// this machine; `Paused` is the state in which a structural mutation of
/// the owning group may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberState {
    Running,
    Pausing,
    Paused,
    Resuming,
}

/// Why a member has shut down.
///
/// Consumed by the external scheduler to decide whether the member should
/// be replaced; this core only transports the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ShutdownReason {
    /// The lease backing this shard was taken by another worker.
    LeaseLost,
    /// The shard reached its end and was fully consumed.
    ShardEnd,
    /// Shutdown was requested by the owning scheduler.
    Requested,
}

/// Per-shard consumption worker, as seen by its group.
///
/// A member must honor pause and resume without blocking indefinitely and
/// without losing progress. Lifecycle errors are the member's own to
/// surface; the group never wraps or reinterprets them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupMember: Send + Sync {
    /// Request the member to reach a safe point and hold there.
    /// Completes once the safe point is reached.
    async fn pause_for_update(&self);

    /// Release the member from its safe point and let it continue.
    async fn resume_from_update(&self);

    /// Drive the member's own state machine forward one tick.
    async fn execute_lifecycle(&self);

    /// Whether the member has shut itself down.
    fn is_shutdown(&self) -> bool;

    /// The reason for shutdown, once `is_shutdown` is true.
    fn shutdown_reason(&self) -> Option<ShutdownReason>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_state_display() {
        assert_eq!(MemberState::Running.to_string(), "RUNNING");
        assert_eq!(MemberState::Pausing.to_string(), "PAUSING");
        assert_eq!(MemberState::Paused.to_string(), "PAUSED");
        assert_eq!(MemberState::Resuming.to_string(), "RESUMING");
    }

    #[test]
    fn test_shutdown_reason_display() {
        assert_eq!(ShutdownReason::LeaseLost.to_string(), "LEASE_LOST");
        assert_eq!(ShutdownReason::ShardEnd.to_string(), "SHARD_END");
        assert_eq!(ShutdownReason::Requested.to_string(), "REQUESTED");
    }
}
