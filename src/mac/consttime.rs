// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac
// File: consttime.rs
// Author: Volker Schwaberow <volker@schwaberow.de>

//! Constant-time comparison of authentication tags.
//!
//! `==` on slices stops at the first differing byte, which tells an observer
//! how much of a forged tag was correct. These helpers delegate to
//! `subtle`, whose slice comparison folds every byte pair into one
//! accumulator and only branches on the final result. Lengths are not
//! treated as secret: slices of different length compare unequal at once.

use subtle::ConstantTimeEq;

/// Returns `true` when `a` and `b` hold the same bytes.
#[inline]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
	a.ct_eq(b).into()
}

/// Returns `true` when `a` and `b` differ.
#[inline]
pub fn memneq(a: &[u8], b: &[u8]) -> bool {
	!ct_eq(a, b)
}
