// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac
// File: engine.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! HMAC engine for control channel packets.
//!
//! The tag sits inside the packet it authenticates, between the `L1` and
//! `L3` regions of a [`PacketLayout`]. The engine streams the authenticated
//! regions straight out of the packet buffer in HMAC order
//! (`L3`, then `L1`, then the trailing payload), so neither generation nor
//! verification copies the packet.
//!
//! Layout violations are ordinary adversarial input and are reported as
//! `false`, never as an error.

use super::backend::{CryptoApi, HmacBackend};
use super::consttime;
use super::key::StaticKey;
use super::layout::PacketLayout;
use super::registry::{
	self, DigestAlgorithm, MacError, MacErrorKind, MAX_HMAC_SIZE,
};

pub struct MacEngine<C: CryptoApi> {
	ctx: C::HmacContext,
}

impl<C: CryptoApi> Default for MacEngine<C> {
	fn default() -> Self {
		Self {
			ctx: C::HmacContext::default(),
		}
	}
}

impl<C: CryptoApi> MacEngine<C> {
	/// Unkeyed engine; [`MacEngine::defined`] is `false` until
	/// [`MacEngine::init`] succeeds.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_key(
		algorithm: DigestAlgorithm,
		key: &StaticKey,
	) -> Result<Self, MacError> {
		let mut engine = Self::new();
		engine.init(algorithm, key)?;
		Ok(engine)
	}

	pub fn defined(&self) -> bool {
		self.ctx.is_initialized()
	}

	/// Tag length, i.e. the `L2` a packet must reserve.
	pub fn output_size(&self) -> usize {
		self.ctx.size()
	}

	/// Binds the engine to `algorithm` keyed with the first
	/// `min_key_size` bytes of `key`.
	pub fn init(
		&mut self,
		algorithm: DigestAlgorithm,
		key: &StaticKey,
	) -> Result<(), MacError> {
		let metadata = registry::lookup(algorithm);
		if key.size() < metadata.min_key_size {
			return Err(MacError::new(
				MacErrorKind::KeyTooShort,
				format!(
					"{} needs a key of at least {} bytes (got {})",
					metadata.display_name,
					metadata.min_key_size,
					key.size()
				),
			));
		}
		self.ctx
			.init(algorithm, &key.data()[..metadata.min_key_size])
	}

	/// HMAC of a contiguous `input` written to the front of `out`.
	pub fn hmac(&mut self, out: &mut [u8], input: &[u8]) -> bool {
		if !self.defined() || out.len() < self.output_size() {
			return false;
		}
		self.ctx.reset();
		self.ctx.update(input);
		self.ctx.finalize_into(out);
		true
	}

	/// Computes the tag over `buf` and writes it into the `L2` region.
	/// Returns `false` without touching `buf` if the layout does not fit.
	pub fn generate(
		&mut self,
		buf: &mut [u8],
		l1: usize,
		l2: usize,
		l3: usize,
	) -> bool {
		self.generate_layout(buf, PacketLayout::new(l1, l2, l3))
	}

	/// Checks the tag in the `L2` region of `buf`.
	pub fn verify(
		&mut self,
		buf: &[u8],
		l1: usize,
		l2: usize,
		l3: usize,
	) -> bool {
		self.verify_layout(buf, PacketLayout::new(l1, l2, l3))
	}

	pub fn generate_layout(
		&mut self,
		buf: &mut [u8],
		layout: PacketLayout,
	) -> bool {
		if !self.feed(buf, layout) {
			return false;
		}
		let tag = &mut buf[layout.l1..layout.l1 + layout.l2];
		self.ctx.finalize_into(tag);
		true
	}

	pub fn verify_layout(
		&mut self,
		buf: &[u8],
		layout: PacketLayout,
	) -> bool {
		if !self.feed(buf, layout) {
			return false;
		}
		// l2 == output_size() <= MAX_HMAC_SIZE once feed succeeded
		let mut local = [0u8; MAX_HMAC_SIZE];
		let local = &mut local[..layout.l2];
		self.ctx.finalize_into(local);
		consttime::ct_eq(&buf[layout.l1..layout.l1 + layout.l2], local)
	}

	// Resets the backend and feeds L3, L1, then the trailing payload.
	fn feed(&mut self, buf: &[u8], layout: PacketLayout) -> bool {
		let lsum = match layout.total() {
			Some(lsum) if lsum <= buf.len() => lsum,
			_ => return false,
		};
		if !self.defined() || layout.l2 != self.ctx.size() {
			return false;
		}
		let l3_start = layout.l1 + layout.l2;
		self.ctx.reset();
		self.ctx.update(&buf[l3_start..lsum]);
		self.ctx.update(&buf[..layout.l1]);
		self.ctx.update(&buf[lsum..]);
		true
	}
}
