//! BIP9 soft-fork deployment schedule.
//!
//! Only the schedule data lives here. Counting version-bit votes and walking
//! the DEFINED/STARTED/LOCKED_IN/ACTIVE/FAILED states is the validator's job.

use crate::error::ChainError;
use serde::ser::SerializeMap;
use serde::Serialize;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Highest bit a deployment may signal on; the bits above are reserved.
pub const MAX_DEPLOYMENT_BIT: u8 = 28;

/// Version prefix a block uses to signal that its low bits are BIP9 votes.
pub const VERSIONBITS_TOP_BITS: u32 = 0x2000_0000;
pub const VERSIONBITS_TOP_MASK: u32 = 0xE000_0000;

/// Timeout value meaning "no practical expiry".
pub const NO_TIMEOUT: i64 = 999_999_999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentPos {
    TestDummy,
    Csv,
    Segwit,
}

impl DeploymentPos {
    pub const ALL: [DeploymentPos; 3] = [
        DeploymentPos::TestDummy,
        DeploymentPos::Csv,
        DeploymentPos::Segwit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DeploymentPos::TestDummy => "testdummy",
            DeploymentPos::Csv => "csv",
            DeploymentPos::Segwit => "segwit",
        }
    }

    fn index(&self) -> usize {
        match self {
            DeploymentPos::TestDummy => 0,
            DeploymentPos::Csv => 1,
            DeploymentPos::Segwit => 2,
        }
    }
}

impl fmt::Display for DeploymentPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeploymentPos {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        DeploymentPos::ALL
            .into_iter()
            .find(|pos| pos.name() == lowered)
            .ok_or_else(|| ChainError::UnknownDeployment(s.to_string()))
    }
}

/// One deployment: votes on `bit` count only while `start_time <= t < timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bip9Deployment {
    pub bit: u8,
    pub start_time: i64,
    pub timeout: i64,
}

impl Bip9Deployment {
    pub const fn new(bit: u8, start_time: i64, timeout: i64) -> Self {
        Bip9Deployment {
            bit,
            start_time,
            timeout,
        }
    }

    /// The version bit this deployment sets when signalling. `None` when the
    /// bit does not fit in a block version.
    pub fn mask(&self) -> Option<u32> {
        1u32.checked_shl(self.bit.into())
    }

    /// Block version a miner uses to vote for this deployment alone.
    pub fn signal_version(&self) -> Option<i32> {
        if self.bit > MAX_DEPLOYMENT_BIT {
            return None;
        }
        let mask = self.mask()?;
        Some((VERSIONBITS_TOP_BITS | mask) as i32)
    }

    /// True when `version` uses the version-bits scheme and sets this bit.
    pub fn is_signalled_by(&self, version: i32) -> bool {
        let version = version as u32;
        match self.mask() {
            Some(mask) => {
                version & VERSIONBITS_TOP_MASK == VERSIONBITS_TOP_BITS && version & mask != 0
            }
            None => false,
        }
    }

    pub fn is_live_at(&self, time: i64) -> bool {
        self.start_time <= time && time < self.timeout
    }

    /// True when both windows are non-empty and share at least one instant.
    pub fn overlaps(&self, other: &Bip9Deployment) -> bool {
        self.start_time < self.timeout
            && other.start_time < other.timeout
            && self.start_time < other.timeout
            && other.start_time < self.timeout
    }
}

/// The full schedule of one network, indexed by [`DeploymentPos`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployments([Bip9Deployment; 3]);

impl Deployments {
    pub fn new(test_dummy: Bip9Deployment, csv: Bip9Deployment, segwit: Bip9Deployment) -> Self {
        Deployments([test_dummy, csv, segwit])
    }

    pub fn get(&self, pos: DeploymentPos) -> &Bip9Deployment {
        &self.0[pos.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeploymentPos, &Bip9Deployment)> {
        DeploymentPos::ALL.into_iter().map(move |pos| (pos, self.get(pos)))
    }

    pub(crate) fn set_window(&mut self, pos: DeploymentPos, start_time: i64, timeout: i64) {
        let entry = &mut self.0[pos.index()];
        entry.start_time = start_time;
        entry.timeout = timeout;
    }

    /// Checks the bit range and that no two deployments whose windows overlap
    /// signal on the same bit.
    pub fn validate(&self) -> Result<(), ChainError> {
        for (pos, deployment) in self.iter() {
            if deployment.bit > MAX_DEPLOYMENT_BIT {
                return Err(ChainError::InvalidDeployment(format!(
                    "{} uses bit {}, above the maximum of {}",
                    pos, deployment.bit, MAX_DEPLOYMENT_BIT
                )));
            }
        }

        for (i, (pos_a, a)) in self.iter().enumerate() {
            for (pos_b, b) in self.iter().skip(i + 1) {
                if a.bit == b.bit && a.overlaps(b) {
                    return Err(ChainError::InvalidDeployment(format!(
                        "{} and {} both signal on bit {} during overlapping windows",
                        pos_a, pos_b, a.bit
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Index<DeploymentPos> for Deployments {
    type Output = Bip9Deployment;

    fn index(&self, pos: DeploymentPos) -> &Self::Output {
        self.get(pos)
    }
}

impl Serialize for Deployments {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (pos, deployment) in self.iter() {
            map.serialize_entry(pos.name(), deployment)?;
        }
        map.end()
    }
}
