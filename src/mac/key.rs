// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac
// File: key.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Static key material: parsing, direction slicing, and loading from files
//! or inline text.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::registry::{MacError, MacErrorKind};

pub const STATIC_KEY_SIZE: usize = 256;
pub const KEY_SET_SIZE: usize = 128;
pub const HMAC_KEY_SIZE: usize = 64;

const BEGIN_MARKER: &str = "-----BEGIN OpenVPN Static key V1-----";
const END_MARKER: &str = "-----END OpenVPN Static key V1-----";

/// Opaque key bytes, wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticKey {
	bytes: Zeroizing<Vec<u8>>,
}

impl StaticKey {
	pub fn from_bytes(bytes: &[u8]) -> Self {
		Self {
			bytes: Zeroizing::new(bytes.to_vec()),
		}
	}

	pub fn size(&self) -> usize {
		self.bytes.len()
	}

	pub fn data(&self) -> &[u8] {
		self.bytes.as_slice()
	}

	/// Parses the `OpenVPN Static key V1` text format. Comment lines
	/// starting with `#` and blank lines are ignored.
	pub fn parse(text: &str) -> Result<Self, MacError> {
		let mut hex_body = Zeroizing::new(String::new());
		let mut state = ParseState::Preamble;
		for line in text.lines().map(str::trim) {
			if line.is_empty() || line.starts_with('#') {
				continue;
			}
			state = match (state, line) {
				(ParseState::Preamble, BEGIN_MARKER) => ParseState::Body,
				(ParseState::Body, END_MARKER) => ParseState::Done,
				(ParseState::Body, hex_line) => {
					hex_body.push_str(hex_line);
					ParseState::Body
				}
				(_, other) => {
					return Err(invalid_key(format!(
						"unexpected line in static key: `{}`",
						truncate(other)
					)))
				}
			};
		}
		if state != ParseState::Done {
			return Err(invalid_key("static key is missing BEGIN/END markers"));
		}
		let bytes = Zeroizing::new(hex::decode(hex_body.as_bytes()).map_err(
			|err| invalid_key(format!("static key is not valid hex: {}", err)),
		)?);
		if bytes.len() != STATIC_KEY_SIZE {
			return Err(invalid_key(format!(
				"static key must be {} bytes but decoded {}",
				STATIC_KEY_SIZE,
				bytes.len()
			)));
		}
		Ok(Self { bytes })
	}

	/// Renders the key in the text format accepted by [`StaticKey::parse`].
	pub fn render(&self) -> Zeroizing<String> {
		let lines = self.bytes.len().div_ceil(16);
		let mut out = Zeroizing::new(String::with_capacity(
			BEGIN_MARKER.len() + END_MARKER.len() + 2
				+ self.bytes.len() * 2
				+ lines,
		));
		out.push_str(BEGIN_MARKER);
		out.push('\n');
		// Hex text never lands in an unzeroized temporary.
		let mut line = Zeroizing::new([0u8; 32]);
		for chunk in self.bytes.chunks(16) {
			let hex = &mut line[..chunk.len() * 2];
			if hex::encode_to_slice(chunk, hex).is_ok() {
				out.extend(hex.iter().map(|&c| char::from(c)));
			}
			out.push('\n');
		}
		out.push_str(END_MARKER);
		out.push('\n');
		out
	}

	/// HMAC key slice used by `role` under `direction`.
	pub fn hmac_key(
		&self,
		direction: KeyDirection,
		role: Role,
	) -> Result<StaticKey, MacError> {
		if self.size() != STATIC_KEY_SIZE {
			return Err(invalid_key(format!(
				"key direction slicing needs a {}-byte key (got {})",
				STATIC_KEY_SIZE,
				self.size()
			)));
		}
		let offset = direction.key_set(role) * KEY_SET_SIZE
			+ (KEY_SET_SIZE - HMAC_KEY_SIZE);
		Ok(StaticKey::from_bytes(
			&self.bytes[offset..offset + HMAC_KEY_SIZE],
		))
	}
}

impl fmt::Debug for StaticKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StaticKey")
			.field("size", &self.size())
			.finish_non_exhaustive()
	}
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ParseState {
	Preamble,
	Body,
	Done,
}

fn truncate(line: &str) -> &str {
	line.get(..32).unwrap_or(line)
}

fn invalid_key(message: impl Into<std::borrow::Cow<'static, str>>) -> MacError {
	MacError::new(MacErrorKind::InvalidKey, message)
}

/// Which half of a static key each peer sends with.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum KeyDirection {
	/// Both peers use key set 0 in both directions.
	#[default]
	Bidirectional,
	/// Send with set 0, receive with set 1.
	Normal,
	/// Send with set 1, receive with set 0.
	Inverse,
}

impl KeyDirection {
	fn key_set(self, role: Role) -> usize {
		match (self, role) {
			(KeyDirection::Bidirectional, _) => 0,
			(KeyDirection::Normal, Role::Send) => 0,
			(KeyDirection::Normal, Role::Receive) => 1,
			(KeyDirection::Inverse, Role::Send) => 1,
			(KeyDirection::Inverse, Role::Receive) => 0,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
	Send,
	Receive,
}

#[derive(Debug)]
pub enum KeySource {
	File(PathBuf),
	Inline(Zeroizing<String>),
}

impl KeySource {
	pub fn description(&self) -> &'static str {
		match self {
			KeySource::File(_) => "file",
			KeySource::Inline(_) => "inline",
		}
	}
}

pub fn load_static_key(source: &KeySource) -> Result<StaticKey, MacError> {
	match source {
		KeySource::File(path) => {
			let text = Zeroizing::new(fs::read_to_string(path).map_err(
				|err| {
					invalid_key(format!(
						"failed to read key file `{}`: {}",
						path.display(),
						err
					))
				},
			)?);
			StaticKey::parse(&text)
		}
		KeySource::Inline(text) => {
			if text.trim().is_empty() {
				Err(invalid_key("inline key must not be empty"))
			} else {
				StaticKey::parse(text)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sequential_key() -> StaticKey {
		let bytes: Vec<u8> = (0..STATIC_KEY_SIZE).map(|i| i as u8).collect();
		StaticKey::from_bytes(&bytes)
	}

	#[test]
	fn render_pads_nothing_on_short_last_line() {
		let key = StaticKey::from_bytes(&[0xab; 20]);
		let text = key.render();
		let expected = format!(
			"{BEGIN_MARKER}\n{}\n{}\n{END_MARKER}\n",
			"ab".repeat(16),
			"ab".repeat(4)
		);
		assert_eq!(*text, expected);
		assert!(text.capacity() >= text.len());
	}

	#[test]
	fn render_then_parse_preserves_bytes() {
		let key = sequential_key();
		let text = key.render();
		assert!(text.starts_with(BEGIN_MARKER));
		assert_eq!(text.lines().count(), 18);
		assert_eq!(StaticKey::parse(&text).unwrap(), key);
	}

	#[test]
	fn parse_skips_comments_and_blank_lines() {
		let key = sequential_key();
		let text = format!("#\n# 2048 bit static key\n#\n\n{}", *key.render());
		assert_eq!(StaticKey::parse(&text).unwrap().size(), STATIC_KEY_SIZE);
	}

	#[test]
	fn parse_rejects_short_and_unterminated_keys() {
		let short = format!("{BEGIN_MARKER}\n00ff\n{END_MARKER}\n");
		let err = StaticKey::parse(&short).unwrap_err();
		assert_eq!(err.kind(), MacErrorKind::InvalidKey);

		let unterminated = format!("{BEGIN_MARKER}\n00ff\n");
		assert!(StaticKey::parse(&unterminated).is_err());

		let garbage = format!("{BEGIN_MARKER}\nzz\n{END_MARKER}\n");
		assert!(StaticKey::parse(&garbage).is_err());
	}

	#[test]
	fn direction_slices_select_hmac_halves() {
		let key = sequential_key();
		let set0 = key.hmac_key(KeyDirection::Normal, Role::Send).unwrap();
		let set1 = key.hmac_key(KeyDirection::Normal, Role::Receive).unwrap();
		assert_eq!(set0.size(), HMAC_KEY_SIZE);
		assert_eq!(set0.data()[0], 64);
		assert_eq!(set1.data()[0], 192);

		let inverse_send =
			key.hmac_key(KeyDirection::Inverse, Role::Send).unwrap();
		assert_eq!(inverse_send, set1);
		let bidi_recv =
			key.hmac_key(KeyDirection::Bidirectional, Role::Receive).unwrap();
		assert_eq!(bidi_recv, set0);
	}

	#[test]
	fn debug_output_hides_key_bytes() {
		let rendered = format!("{:?}", sequential_key());
		assert!(rendered.contains("size: 256"));
		assert!(!rendered.contains("255"));
	}
}
