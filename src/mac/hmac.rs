// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac
// File: hmac.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! RustCrypto provider: HMAC over MD4, MD5, SHA-1 and SHA-2 variants.

use super::backend::{CryptoApi, HmacBackend};
use super::registry::{DigestAlgorithm, MacError, MacErrorKind};
use hmac::{Hmac, Mac};
use md4::Md4;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

type HmacMd4 = Hmac<Md4>;
type HmacMd5 = Hmac<Md5>;
type HmacSha1 = Hmac<Sha1>;
type HmacSha224 = Hmac<Sha224>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Provider backed by the `hmac` crate and the RustCrypto hash crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoApi;

impl CryptoApi for RustCryptoApi {
	const NAME: &'static str = "rustcrypto";

	type HmacContext = RustCryptoHmac;
}

#[derive(Clone)]
enum HmacVariant {
	Md4(HmacMd4),
	Md5(HmacMd5),
	Sha1(HmacSha1),
	Sha224(HmacSha224),
	Sha256(HmacSha256),
	Sha384(HmacSha384),
	Sha512(HmacSha512),
}

impl HmacVariant {
	fn new(
		algorithm: DigestAlgorithm,
		key: &[u8],
	) -> Result<Self, MacError> {
		let variant = match algorithm {
			DigestAlgorithm::Md4 => HmacVariant::Md4(
				HmacMd4::new_from_slice(key).map_err(key_error)?,
			),
			DigestAlgorithm::Md5 => HmacVariant::Md5(
				HmacMd5::new_from_slice(key).map_err(key_error)?,
			),
			DigestAlgorithm::Sha1 => HmacVariant::Sha1(
				HmacSha1::new_from_slice(key).map_err(key_error)?,
			),
			DigestAlgorithm::Sha224 => HmacVariant::Sha224(
				HmacSha224::new_from_slice(key).map_err(key_error)?,
			),
			DigestAlgorithm::Sha256 => HmacVariant::Sha256(
				HmacSha256::new_from_slice(key).map_err(key_error)?,
			),
			DigestAlgorithm::Sha384 => HmacVariant::Sha384(
				HmacSha384::new_from_slice(key).map_err(key_error)?,
			),
			DigestAlgorithm::Sha512 => HmacVariant::Sha512(
				HmacSha512::new_from_slice(key).map_err(key_error)?,
			),
			DigestAlgorithm::None => {
				return Err(MacError::new(
					MacErrorKind::UnsupportedAlgorithm,
					format!(
						"{} provider has no HMAC for {}",
						RustCryptoApi::NAME,
						algorithm
					),
				))
			}
		};
		Ok(variant)
	}

	fn update(&mut self, data: &[u8]) {
		match self {
			HmacVariant::Md4(mac) => mac.update(data),
			HmacVariant::Md5(mac) => mac.update(data),
			HmacVariant::Sha1(mac) => mac.update(data),
			HmacVariant::Sha224(mac) => mac.update(data),
			HmacVariant::Sha256(mac) => mac.update(data),
			HmacVariant::Sha384(mac) => mac.update(data),
			HmacVariant::Sha512(mac) => mac.update(data),
		}
	}

	fn finalize_into(self, out: &mut [u8]) {
		match self {
			HmacVariant::Md4(mac) => {
				copy_tag(&mac.finalize().into_bytes(), out)
			}
			HmacVariant::Md5(mac) => {
				copy_tag(&mac.finalize().into_bytes(), out)
			}
			HmacVariant::Sha1(mac) => {
				copy_tag(&mac.finalize().into_bytes(), out)
			}
			HmacVariant::Sha224(mac) => {
				copy_tag(&mac.finalize().into_bytes(), out)
			}
			HmacVariant::Sha256(mac) => {
				copy_tag(&mac.finalize().into_bytes(), out)
			}
			HmacVariant::Sha384(mac) => {
				copy_tag(&mac.finalize().into_bytes(), out)
			}
			HmacVariant::Sha512(mac) => {
				copy_tag(&mac.finalize().into_bytes(), out)
			}
		}
	}
}

// A short `out` receives a truncated tag.
fn copy_tag(tag: &[u8], out: &mut [u8]) {
	let len = tag.len().min(out.len());
	out[..len].copy_from_slice(&tag[..len]);
}

fn key_error(_: hmac::digest::InvalidLength) -> MacError {
	MacError::new(MacErrorKind::Crypto, "HMAC rejected the supplied key")
}

struct Keyed {
	size: usize,
	prototype: HmacVariant,
	running: HmacVariant,
}

/// [`HmacBackend`] over RustCrypto. Keeps the keyed state as a prototype
/// so a reset is a clone instead of re-deriving the padded key.
#[derive(Default)]
pub struct RustCryptoHmac {
	state: Option<Keyed>,
}

impl HmacBackend for RustCryptoHmac {
	fn init(
		&mut self,
		algorithm: DigestAlgorithm,
		key: &[u8],
	) -> Result<(), MacError> {
		let prototype = HmacVariant::new(algorithm, key)?;
		self.state = Some(Keyed {
			size: super::registry::lookup(algorithm).output_size,
			running: prototype.clone(),
			prototype,
		});
		Ok(())
	}

	fn is_initialized(&self) -> bool {
		self.state.is_some()
	}

	fn size(&self) -> usize {
		self.state.as_ref().map_or(0, |keyed| keyed.size)
	}

	fn reset(&mut self) {
		if let Some(keyed) = self.state.as_mut() {
			keyed.running = keyed.prototype.clone();
		}
	}

	fn update(&mut self, data: &[u8]) {
		if let Some(keyed) = self.state.as_mut() {
			keyed.running.update(data);
		}
	}

	fn finalize_into(&mut self, out: &mut [u8]) {
		if let Some(keyed) = self.state.as_mut() {
			let running = std::mem::replace(
				&mut keyed.running,
				keyed.prototype.clone(),
			);
			running.finalize_into(out);
		}
	}
}
