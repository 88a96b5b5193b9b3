// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Desired partition membership for a full sync.

use anyhow::{Context, Result};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;

/// Partition name to member GUIDs, in caller order.
///
/// Order matters: a full sync issues one `add` per partition in exactly
/// this order and stops at the first rejected one. A YAML mapping keeps
/// its document order when loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionMembership {
    partitions: Vec<(String, Vec<String>)>,
}

impl PartitionMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a partition. A repeated name is kept as a separate entry.
    pub fn push(&mut self, vf_name: impl Into<String>, guids: Vec<String>) {
        self.partitions.push((vf_name.into(), guids));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.partitions
            .iter()
            .map(|(name, guids)| (name.as_str(), guids.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document means an empty request.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Failed to parse partition membership YAML")
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read membership file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid membership file {}", path.display()))
    }
}

impl<K, V, G> FromIterator<(K, V)> for PartitionMembership
where
    K: Into<String>,
    V: IntoIterator<Item = G>,
    G: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            partitions: iter
                .into_iter()
                .map(|(name, guids)| (name.into(), guids.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for PartitionMembership {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MembershipVisitor;

        impl<'de> Visitor<'de> for MembershipVisitor {
            type Value = PartitionMembership;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of partition name to a list of GUIDs")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PartitionMembership::default())
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut membership = PartitionMembership::default();
                while let Some((name, guids)) = map.next_entry::<String, Option<Vec<String>>>()? {
                    membership.push(name, guids.unwrap_or_default());
                }
                Ok(membership)
            }
        }

        deserializer.deserialize_any(MembershipVisitor)
    }
}
