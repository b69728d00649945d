// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac
// File: layout.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Region sizes of an authenticated control packet.
//!
//! ```text
//! <-- L1 -->    <L2>    <-- L3 -->
//! [OP] [PSID]  [HMAC]  [PID] [TIME]  [...]   wire order
//!
//! [PID] [TIME] [OP] [PSID] [...]             HMAC input order
//! ```

pub const OPCODE_SIZE: usize = 1;
pub const SESSION_ID_SIZE: usize = 8;
pub const PACKET_ID_SIZE: usize = 4;
pub const PACKET_TIME_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PacketLayout {
	/// Authenticated bytes in front of the tag.
	pub l1: usize,
	/// The tag itself.
	pub l2: usize,
	/// Authenticated bytes right after the tag.
	pub l3: usize,
}

impl PacketLayout {
	pub const fn new(l1: usize, l2: usize, l3: usize) -> Self {
		Self { l1, l2, l3 }
	}

	/// Layout of a tls-auth control packet for a tag of `hmac_size` bytes.
	pub const fn tls_auth(hmac_size: usize) -> Self {
		Self::new(
			OPCODE_SIZE + SESSION_ID_SIZE,
			hmac_size,
			PACKET_ID_SIZE + PACKET_TIME_SIZE,
		)
	}

	/// `l1 + l2 + l3`, or `None` on overflow.
	pub fn total(&self) -> Option<usize> {
		self.l1.checked_add(self.l2)?.checked_add(self.l3)
	}

	pub fn fits(&self, len: usize) -> bool {
		matches!(self.total(), Some(total) if total <= len)
	}

	/// Offset of the tag within the packet.
	pub fn tag_offset(&self) -> usize {
		self.l1
	}
}
