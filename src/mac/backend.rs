// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac
// File: backend.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Interfaces a crypto provider implements to back the MAC engine.

use super::registry::{DigestAlgorithm, MacError};

/// Stateful keyed HMAC primitive.
///
/// An implementation is bound to one digest and one key by [`init`]. Every
/// other call mutates the running state, so a backend must never be shared
/// between concurrent computations.
///
/// [`init`]: HmacBackend::init
pub trait HmacBackend {
	/// Keys the backend. `key` is used exactly as given.
	fn init(
		&mut self,
		algorithm: DigestAlgorithm,
		key: &[u8],
	) -> Result<(), MacError>;

	fn is_initialized(&self) -> bool;

	/// Digest length in bytes, `0` before [`HmacBackend::init`].
	fn size(&self) -> usize;

	/// Restores the freshly keyed state.
	fn reset(&mut self);

	fn update(&mut self, data: &[u8]);

	/// Writes `size()` bytes into the front of `out` and resets the state.
	/// If `out` is shorter than `size()` only its length is written.
	fn finalize_into(&mut self, out: &mut [u8]);
}

/// A pluggable crypto provider.
pub trait CryptoApi: 'static {
	const NAME: &'static str;

	type HmacContext: HmacBackend + Default;
}
