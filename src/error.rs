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

use thiserror::Error;

/// The error type for the shard-group core.
///
/// The failure surface is deliberately narrow: only argument validation
/// fails, and it fails at construction time, before any lock is taken.
/// Duplicate additions, absent removals and post-shutdown additions are
/// silent no-ops, not errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    /// A stream identifier or group key was constructed from an empty string.
    #[error("Missing identity")]
    MissingIdentity,
    /// A shard was constructed with an empty shard ID.
    #[error("Missing shard ID")]
    MissingShardId,
}
