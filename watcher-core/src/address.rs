// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Decoding of bech32m wallet addresses.
//!
//! Addresses are `<hrp>1<data>` where the last six data characters are the
//! checksum. Only the bech32m variant is accepted; a string that verifies
//! under the original bech32 constant is rejected.

use bech32::Bech32m;
use bech32::primitives::decode::CheckedHrpstring;

use crate::{Bytes32, Error};

/// Decode an address into the 32-byte inner identity it carries.
///
/// # Errors
/// Returns [`Error::InvalidEncoding`] if the string is not a well-formed
/// bech32m address carrying 32 bytes.
pub fn decode(address: &str) -> Result<Bytes32, Error> {
    decode_with_prefix(address).map(|(_, identity)| identity)
}

/// Decode an address, returning its human-readable prefix alongside the
/// inner identity.
///
/// # Errors
/// Returns [`Error::InvalidEncoding`] if the string is not a well-formed
/// bech32m address carrying 32 bytes.
pub fn decode_with_prefix(address: &str) -> Result<(String, Bytes32), Error> {
    let checked = CheckedHrpstring::new::<Bech32m>(address)
        .map_err(|_| Error::InvalidEncoding)?;

    // leftover bits of the 5 to 8 bit regrouping must be zero padding
    checked
        .validate_segwit_padding()
        .map_err(|_| Error::InvalidEncoding)?;

    let bytes: Vec<u8> = checked.byte_iter().collect();
    let identity: Bytes32 =
        bytes.try_into().map_err(|_| Error::InvalidEncoding)?;

    Ok((checked.hrp().to_lowercase(), identity))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str =
        "xch1mwfnmxkf5tup5myd8na7w3xuv6d9kg3r4827uf376arj34nrsa4qw8xv5x";

    #[test]
    fn prefix_is_returned() {
        let (hrp, _) = decode_with_prefix(ADDRESS).unwrap();
        assert_eq!(hrp, "xch");

        let (hrp, _) =
            decode_with_prefix(&ADDRESS.to_ascii_uppercase()).unwrap();
        assert_eq!(hrp, "xch");
    }

    #[test]
    fn uppercase_address() {
        assert_eq!(
            decode(&ADDRESS.to_ascii_uppercase()).unwrap(),
            decode(ADDRESS).unwrap()
        );
    }

    #[test]
    fn mixed_case_rejected() {
        let mixed = ADDRESS.replacen("xch", "XCH", 1);
        assert_eq!(decode(&mixed), Err(Error::InvalidEncoding));
    }

    #[test]
    fn malformed_shapes() {
        // no separator
        assert_eq!(decode("qpzry9x8gf2tvdw0"), Err(Error::InvalidEncoding));
        // empty human-readable part
        assert_eq!(decode("1qpzry9x8gf2"), Err(Error::InvalidEncoding));
        // data shorter than the checksum
        assert_eq!(decode("xch1qpzry"), Err(Error::InvalidEncoding));
        // 'b' is not part of the charset
        assert_eq!(
            decode(&ADDRESS.replacen('m', "b", 1)),
            Err(Error::InvalidEncoding)
        );
        assert_eq!(decode(""), Err(Error::InvalidEncoding));
    }
}
