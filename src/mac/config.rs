// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac
// File: config.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

use serde::{Deserialize, Serialize};

use super::key::KeyDirection;
use super::registry::{DigestAlgorithm, MacError, MacErrorKind};

/// Control channel authentication settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlAuthConfig {
	pub digest: DigestAlgorithm,
	#[serde(default)]
	pub key_direction: KeyDirection,
}

impl Default for ControlAuthConfig {
	fn default() -> Self {
		Self {
			digest: DigestAlgorithm::Sha1,
			key_direction: KeyDirection::Bidirectional,
		}
	}
}

impl ControlAuthConfig {
	pub fn from_json(text: &str) -> Result<Self, MacError> {
		serde_json::from_str(text).map_err(|err| {
			MacError::new(
				MacErrorKind::InvalidConfig,
				format!("invalid control auth config: {}", err),
			)
		})
	}

	pub fn to_json(&self) -> Result<String, MacError> {
		serde_json::to_string(self).map_err(|err| {
			MacError::new(
				MacErrorKind::InvalidConfig,
				format!("failed to encode control auth config: {}", err),
			)
		})
	}
}
