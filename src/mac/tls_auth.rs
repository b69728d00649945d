// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac
// File: tls_auth.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Send/receive HMAC pair for tls-auth control packets.

use tracing::debug;

use super::config::ControlAuthConfig;
use super::key::{Role, StaticKey};
use super::layout::PacketLayout;
use super::registry::MacError;
use super::selection::{MacContextPtr, MacFactory, MacInstancePtr};

pub struct TlsAuth {
	context: MacContextPtr,
	send: MacInstancePtr,
	recv: MacInstancePtr,
	layout: PacketLayout,
}

impl TlsAuth {
	/// Keys the send and receive instances from the direction slices of a
	/// full static key.
	pub fn new(
		factory: &dyn MacFactory,
		config: &ControlAuthConfig,
		key: &StaticKey,
	) -> Result<Self, MacError> {
		let send_key = key.hmac_key(config.key_direction, Role::Send)?;
		let recv_key = key.hmac_key(config.key_direction, Role::Receive)?;
		Self::with_keys(factory, config, &send_key, &recv_key)
	}

	pub fn with_keys(
		factory: &dyn MacFactory,
		config: &ControlAuthConfig,
		send_key: &StaticKey,
		recv_key: &StaticKey,
	) -> Result<Self, MacError> {
		let context = factory.new_context(config.digest)?;
		let send = context.new_instance();
		send.borrow_mut().init(send_key)?;
		let recv = context.new_instance();
		recv.borrow_mut().init(recv_key)?;
		let layout = PacketLayout::tls_auth(context.size());
		debug!(
			provider = factory.provider(),
			digest = %config.digest,
			direction = ?config.key_direction,
			"tls-auth keyed"
		);
		Ok(Self {
			context,
			send,
			recv,
			layout,
		})
	}

	pub fn layout(&self) -> PacketLayout {
		self.layout
	}

	pub fn hmac_size(&self) -> usize {
		self.context.size()
	}

	pub fn context(&self) -> &MacContextPtr {
		&self.context
	}

	/// Writes the tag of an outgoing packet framed per [`TlsAuth::layout`].
	pub fn protect(&self, packet: &mut [u8]) -> bool {
		self.send.borrow_mut().generate_layout(packet, self.layout)
	}

	pub fn authenticate(&self, packet: &[u8]) -> bool {
		self.recv.borrow_mut().verify_layout(packet, self.layout)
	}
}
