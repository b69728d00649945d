// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac
// File: registry.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025

//! Registry of digest algorithms usable for control-channel HMAC, including
//! size metadata and the data-channel legality check.

use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Upper bound on the output size of every registered digest.
pub const MAX_HMAC_SIZE: usize = 64;

#[derive(
	Clone,
	Copy,
	Debug,
	PartialEq,
	Eq,
	Hash,
	AsRefStr,
	Display,
	EnumIter,
	EnumString,
	Serialize,
	Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(try_from = "String", into = "String")]
pub enum DigestAlgorithm {
	None,
	Md4,
	Md5,
	Sha1,
	Sha224,
	Sha256,
	Sha384,
	Sha512,
}

impl TryFrom<String> for DigestAlgorithm {
	type Error = MacError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		find_algorithm(&value)
	}
}

impl From<DigestAlgorithm> for String {
	fn from(value: DigestAlgorithm) -> Self {
		value.as_ref().to_string()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigestMetadata {
	pub algorithm: DigestAlgorithm,
	pub display_name: &'static str,
	pub output_size: usize,
	pub min_key_size: usize,
	pub digest: bool,
	pub data_channel: bool,
	pub legacy: bool,
}

impl DigestMetadata {
	const fn digest(
		algorithm: DigestAlgorithm,
		display_name: &'static str,
		output_size: usize,
		data_channel: bool,
		legacy: bool,
	) -> Self {
		Self {
			algorithm,
			display_name,
			output_size,
			min_key_size: output_size,
			digest: true,
			data_channel,
			legacy,
		}
	}

	pub fn is_legacy(&self) -> bool {
		self.legacy
	}

	/// True when the algorithm may key control and data channel HMACs.
	pub fn is_legal_dc_digest(&self) -> bool {
		self.digest && self.data_channel
	}
}

const CATALOG: &[DigestMetadata] = &[
	DigestMetadata {
		algorithm: DigestAlgorithm::None,
		display_name: "none",
		output_size: 0,
		min_key_size: 0,
		digest: false,
		data_channel: false,
		legacy: false,
	},
	DigestMetadata::digest(DigestAlgorithm::Md4, "MD4", 16, false, true),
	DigestMetadata::digest(DigestAlgorithm::Md5, "MD5", 16, true, true),
	DigestMetadata::digest(DigestAlgorithm::Sha1, "SHA1", 20, true, true),
	DigestMetadata::digest(
		DigestAlgorithm::Sha224,
		"SHA224",
		28,
		true,
		false,
	),
	DigestMetadata::digest(
		DigestAlgorithm::Sha256,
		"SHA256",
		32,
		true,
		false,
	),
	DigestMetadata::digest(
		DigestAlgorithm::Sha384,
		"SHA384",
		48,
		true,
		false,
	),
	DigestMetadata::digest(
		DigestAlgorithm::Sha512,
		"SHA512",
		64,
		true,
		false,
	),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacErrorKind {
	UnsupportedAlgorithm,
	IllegalAlgorithm,
	KeyTooShort,
	InvalidKey,
	InvalidConfig,
	Crypto,
}

#[derive(Debug)]
pub struct MacError {
	kind: MacErrorKind,
	message: Cow<'static, str>,
}

impl MacError {
	pub fn new(
		kind: MacErrorKind,
		message: impl Into<Cow<'static, str>>,
	) -> Self {
		Self {
			kind,
			message: message.into(),
		}
	}

	pub fn kind(&self) -> MacErrorKind {
		self.kind
	}

	pub fn message(&self) -> &str {
		self.message.as_ref()
	}
}

impl std::fmt::Display for MacError {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{}", self.message)
	}
}

impl std::error::Error for MacError {}

pub fn algorithms() -> impl Iterator<Item = &'static DigestMetadata> {
	CATALOG.iter()
}

/// Algorithms accepted by [`legal_dc_digest`].
pub fn legal_algorithms() -> impl Iterator<Item = DigestAlgorithm> {
	DigestAlgorithm::iter().filter(|alg| lookup(*alg).is_legal_dc_digest())
}

pub fn lookup(algorithm: DigestAlgorithm) -> &'static DigestMetadata {
	// CATALOG is ordered like the enum declaration
	&CATALOG[algorithm as usize]
}

pub fn find_algorithm(identifier: &str) -> Result<DigestAlgorithm, MacError> {
	DigestAlgorithm::from_str(identifier.trim()).map_err(|_| {
		MacError::new(
			MacErrorKind::UnsupportedAlgorithm,
			format!("unsupported digest algorithm `{}`", identifier),
		)
	})
}

/// Returns `algorithm` unchanged if it may be used for data and control
/// channel authentication.
pub fn legal_dc_digest(
	algorithm: DigestAlgorithm,
) -> Result<DigestAlgorithm, MacError> {
	let metadata = lookup(algorithm);
	if metadata.is_legal_dc_digest() {
		Ok(algorithm)
	} else {
		Err(MacError::new(
			MacErrorKind::IllegalAlgorithm,
			format!(
				"{} is not a legal data channel digest",
				metadata.display_name
			),
		))
	}
}
