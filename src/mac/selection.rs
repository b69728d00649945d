// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac
// File: selection.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Runtime digest selection behind object-safe capabilities.
//!
//! A [`MacFactory`] exists once per crypto provider and validates the
//! negotiated digest. The [`MacContext`] it returns remembers that digest and
//! hands out unkeyed [`MacInstance`]s, one per key. Callers only ever hold the
//! `*Ptr` aliases, so protocol code does not name the provider type.
//!
//! Handles are `Rc` based: an instance belongs to one session and is driven
//! from one thread.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use tracing::{debug, warn};

use super::backend::CryptoApi;
use super::engine::MacEngine;
use super::key::StaticKey;
use super::layout::PacketLayout;
use super::registry::{self, DigestAlgorithm, MacError};

pub type MacInstancePtr = Rc<RefCell<dyn MacInstance>>;
pub type MacContextPtr = Rc<dyn MacContext>;
pub type MacFactoryPtr = Rc<dyn MacFactory>;

pub trait MacInstance {
	fn init(&mut self, key: &StaticKey) -> Result<(), MacError>;

	fn defined(&self) -> bool;

	fn output_size(&self) -> usize;

	fn generate(
		&mut self,
		buf: &mut [u8],
		l1: usize,
		l2: usize,
		l3: usize,
	) -> bool;

	fn verify(&mut self, buf: &[u8], l1: usize, l2: usize, l3: usize)
		-> bool;

	fn generate_layout(
		&mut self,
		buf: &mut [u8],
		layout: PacketLayout,
	) -> bool {
		self.generate(buf, layout.l1, layout.l2, layout.l3)
	}

	fn verify_layout(&mut self, buf: &[u8], layout: PacketLayout) -> bool {
		self.verify(buf, layout.l1, layout.l2, layout.l3)
	}
}

pub trait MacContext {
	fn algorithm(&self) -> DigestAlgorithm;

	/// Tag size of every instance this context creates.
	fn size(&self) -> usize;

	fn new_instance(&self) -> MacInstancePtr;
}

pub trait MacFactory {
	fn provider(&self) -> &'static str;

	/// Fails with `IllegalAlgorithm` for digests not allowed on the
	/// control and data channels.
	fn new_context(
		&self,
		algorithm: DigestAlgorithm,
	) -> Result<MacContextPtr, MacError>;
}

pub struct CryptoMacInstance<C: CryptoApi> {
	algorithm: DigestAlgorithm,
	engine: MacEngine<C>,
}

impl<C: CryptoApi> CryptoMacInstance<C> {
	pub fn new(algorithm: DigestAlgorithm) -> Self {
		Self {
			algorithm,
			engine: MacEngine::new(),
		}
	}
}

impl<C: CryptoApi> MacInstance for CryptoMacInstance<C> {
	fn init(&mut self, key: &StaticKey) -> Result<(), MacError> {
		self.engine.init(self.algorithm, key).map_err(|err| {
			warn!(
				provider = C::NAME,
				digest = %self.algorithm,
				error = %err,
				"rejected control channel HMAC key"
			);
			err
		})
	}

	fn defined(&self) -> bool {
		self.engine.defined()
	}

	fn output_size(&self) -> usize {
		self.engine.output_size()
	}

	fn generate(
		&mut self,
		buf: &mut [u8],
		l1: usize,
		l2: usize,
		l3: usize,
	) -> bool {
		self.engine.generate(buf, l1, l2, l3)
	}

	fn verify(
		&mut self,
		buf: &[u8],
		l1: usize,
		l2: usize,
		l3: usize,
	) -> bool {
		self.engine.verify(buf, l1, l2, l3)
	}
}

pub struct CryptoMacContext<C: CryptoApi> {
	algorithm: DigestAlgorithm,
	_provider: PhantomData<C>,
}

impl<C: CryptoApi> CryptoMacContext<C> {
	pub fn new(algorithm: DigestAlgorithm) -> Result<Self, MacError> {
		let algorithm = registry::legal_dc_digest(algorithm)?;
		Ok(Self {
			algorithm,
			_provider: PhantomData,
		})
	}
}

impl<C: CryptoApi> MacContext for CryptoMacContext<C> {
	fn algorithm(&self) -> DigestAlgorithm {
		self.algorithm
	}

	fn size(&self) -> usize {
		registry::lookup(self.algorithm).output_size
	}

	fn new_instance(&self) -> MacInstancePtr {
		debug!(
			provider = C::NAME,
			digest = %self.algorithm,
			"new HMAC instance"
		);
		Rc::new(RefCell::new(CryptoMacInstance::<C>::new(
			self.algorithm,
		)))
	}
}

pub struct CryptoMacFactory<C: CryptoApi> {
	_provider: PhantomData<C>,
}

impl<C: CryptoApi> CryptoMacFactory<C> {
	pub fn new() -> Self {
		Self {
			_provider: PhantomData,
		}
	}

	pub fn shared() -> MacFactoryPtr {
		Rc::new(Self::new())
	}
}

impl<C: CryptoApi> Default for CryptoMacFactory<C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C: CryptoApi> MacFactory for CryptoMacFactory<C> {
	fn provider(&self) -> &'static str {
		C::NAME
	}

	fn new_context(
		&self,
		algorithm: DigestAlgorithm,
	) -> Result<MacContextPtr, MacError> {
		let context =
			CryptoMacContext::<C>::new(algorithm).map_err(|err| {
				warn!(
					provider = C::NAME,
					digest = %algorithm,
					error = %err,
					"rejected HMAC digest"
				);
				err
			})?;
		let metadata = registry::lookup(algorithm);
		if metadata.is_legacy() {
			warn!(
				provider = C::NAME,
				digest = %algorithm,
				"{} is a legacy digest for control channel authentication",
				metadata.display_name
			);
		}
		debug!(
			provider = C::NAME,
			digest = %algorithm,
			size = metadata.output_size,
			"created HMAC context"
		);
		Ok(Rc::new(context))
	}
}
