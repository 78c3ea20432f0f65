// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Tree hashing of curried programs.
//!
//! A program is a binary tree of atoms and pairs, and its hash is computed
//! bottom-up: atoms hash their bytes behind a `0x01` tag, pairs hash their
//! two children's hashes behind a `0x02` tag. Currying arguments into a
//! program can therefore be modeled with 32-byte hashes only, without ever
//! building the program itself.

use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

use crate::Bytes32;

const ATOM_TAG: u8 = 0x01;
const PAIR_TAG: u8 = 0x02;

/// Hash of the quote operator `q`.
pub static QUOTE_HASH: Lazy<Bytes32> = Lazy::new(|| atom_hash(&[0x01]));

/// Hash of the apply operator `a`.
pub static APPLY_HASH: Lazy<Bytes32> = Lazy::new(|| atom_hash(&[0x02]));

/// Hash of the cons operator `c`.
pub static CONS_HASH: Lazy<Bytes32> = Lazy::new(|| atom_hash(&[0x04]));

/// Hash of the atom `1`, the environment of a curried program.
///
/// It is numerically equal to [`QUOTE_HASH`], since both operator and
/// number are the single byte `0x01`.
pub static ONE_HASH: Lazy<Bytes32> = Lazy::new(|| atom_hash(&[0x01]));

/// Hash of the empty atom `()`.
pub static NIL_HASH: Lazy<Bytes32> = Lazy::new(|| atom_hash(&[]));

/// Tree hash of an atom.
#[must_use]
pub fn atom_hash(bytes: &[u8]) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update([ATOM_TAG]);
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Tree hash of a pair, given the hashes of its two children.
#[must_use]
pub fn pair_hash(left: &Bytes32, right: &Bytes32) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update([PAIR_TAG]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Tree hash of the argument list built by currying `args` in order.
///
/// Every argument is quoted and consed in front of the rest, and the list
/// ends with the environment `1`:
/// `(c (q . a0) (c (q . a1) ... 1))`.
#[must_use]
pub fn curried_args_hash(args: &[Bytes32]) -> Bytes32 {
    args.iter().rev().fold(*ONE_HASH, |rest, arg| {
        let quoted = pair_hash(&QUOTE_HASH, arg);
        let tail = pair_hash(&rest, &NIL_HASH);
        pair_hash(&CONS_HASH, &pair_hash(&quoted, &tail))
    })
}

/// Tree hash of `(a quoted_mod curried_args)`, the program obtained by
/// currying `args` into the module whose quoted hash is `quoted_mod_hash`.
///
/// The order of `args` is significant.
#[must_use]
pub fn curry_tree_hash(quoted_mod_hash: &Bytes32, args: &[Bytes32]) -> Bytes32 {
    let args_hash = curried_args_hash(args);
    let tail = pair_hash(&args_hash, &NIL_HASH);
    pair_hash(&APPLY_HASH, &pair_hash(quoted_mod_hash, &tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(s: &str) -> Bytes32 {
        crate::bytes32_from_hex(s).unwrap()
    }

    #[test]
    fn operator_hashes() {
        assert_eq!(
            *QUOTE_HASH,
            h("9dcf97a184f32623d11a73124ceb99a5709b083721e878a16d78f596718ba7b2")
        );
        assert_eq!(
            *APPLY_HASH,
            h("a12871fee210fb8619291eaea194581cbd2531e4b23759d225f6806923f63222")
        );
        assert_eq!(
            *CONS_HASH,
            h("a8d5dd63fba471ebcb1f3e8f7c1e1879b7152a6e7298a91ce119a63400ade7c5")
        );
        assert_eq!(
            *NIL_HASH,
            h("4bf5122f344554c53bde2ebb8cd2b7e3d1600ad631c385a5d7cce23c7785459a")
        );
        assert_eq!(*ONE_HASH, *QUOTE_HASH);
    }

    #[test]
    fn empty_args_is_one() {
        assert_eq!(curried_args_hash(&[]), *ONE_HASH);
    }

    #[test]
    fn single_arg_matches_definition() {
        let arg = atom_hash(b"arg");
        let expected = pair_hash(
            &CONS_HASH,
            &pair_hash(
                &pair_hash(&QUOTE_HASH, &arg),
                &pair_hash(&ONE_HASH, &NIL_HASH),
            ),
        );
        assert_eq!(curried_args_hash(&[arg]), expected);
    }

    #[test]
    fn fold_matches_recursive_definition() {
        fn recursive(args: &[Bytes32]) -> Bytes32 {
            match args.split_first() {
                None => *ONE_HASH,
                Some((head, rest)) => pair_hash(
                    &CONS_HASH,
                    &pair_hash(
                        &pair_hash(&QUOTE_HASH, head),
                        &pair_hash(&recursive(rest), &NIL_HASH),
                    ),
                ),
            }
        }

        let args: Vec<Bytes32> =
            (0u8..5).map(|i| atom_hash(&[i])).collect();
        for n in 0..=args.len() {
            assert_eq!(curried_args_hash(&args[..n]), recursive(&args[..n]));
        }
    }

    #[test]
    fn argument_order_matters() {
        let a = atom_hash(b"a");
        let b = atom_hash(b"b");
        let module = pair_hash(&QUOTE_HASH, &atom_hash(b"mod"));

        assert_ne!(curried_args_hash(&[a, b]), curried_args_hash(&[b, a]));
        assert_ne!(
            curry_tree_hash(&module, &[a, b]),
            curry_tree_hash(&module, &[b, a])
        );
        assert_eq!(
            curry_tree_hash(&module, &[a, b]),
            curry_tree_hash(&module, &[a, b])
        );
    }
}
