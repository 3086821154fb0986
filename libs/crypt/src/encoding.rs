//! The crypt(3) base64 variant.
//!
//! Digest bytes are taken three at a time in a scheme specific order and
//! written out as four characters, least significant six bits first. The
//! bytes left over at the end form a shorter tail group.

use crate::{CryptError, Scheme};

pub const ALPHABET: &[u8; 64] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Byte order used when turning a digest into text.
#[derive(Debug)]
pub struct Layout {
    /// Full groups, most significant byte first.
    groups: &'static [[usize; 3]],
    /// One or two trailing bytes, most significant first.
    tail: &'static [usize],
}

pub(crate) static MD5_LAYOUT: Layout = Layout {
    groups: &[[0, 6, 12], [1, 7, 13], [2, 8, 14], [3, 9, 15], [4, 10, 5]],
    tail: &[11],
};

pub(crate) static SHA256_LAYOUT: Layout = Layout {
    groups: &[
        [0, 10, 20],
        [21, 1, 11],
        [12, 22, 2],
        [3, 13, 23],
        [24, 4, 14],
        [15, 25, 5],
        [6, 16, 26],
        [27, 7, 17],
        [18, 28, 8],
        [9, 19, 29],
    ],
    tail: &[31, 30],
};

pub(crate) static SHA512_LAYOUT: Layout = Layout {
    groups: &[
        [0, 21, 42],
        [22, 43, 1],
        [44, 2, 23],
        [3, 24, 45],
        [25, 46, 4],
        [47, 5, 26],
        [6, 27, 48],
        [28, 49, 7],
        [50, 8, 29],
        [9, 30, 51],
        [31, 52, 10],
        [53, 11, 32],
        [12, 33, 54],
        [34, 55, 13],
        [56, 14, 35],
        [15, 36, 57],
        [37, 58, 16],
        [59, 17, 38],
        [18, 39, 60],
        [40, 61, 19],
        [62, 20, 41],
    ],
    tail: &[63],
};

impl Layout {
    fn encoded_len(&self) -> usize {
        self.groups.len() * 4 + self.tail.len() + 1
    }
}

#[inline]
fn char_value(c: u8) -> Option<u32> {
    let value = match c {
        b'.' => 0,
        b'/' => 1,
        b'0'..=b'9' => c - b'0' + 2,
        b'A'..=b'Z' => c - b'A' + 12,
        b'a'..=b'z' => c - b'a' + 38,
        _ => return None,
    };
    Some(value as u32)
}

/// Returns `true` if `c` belongs to the crypt alphabet.
#[inline]
pub fn is_crypt_char(c: char) -> bool {
    c.is_ascii() && char_value(c as u8).is_some()
}

fn write_word(out: &mut String, mut word: u32, chars: usize) {
    for _ in 0..chars {
        out.push(ALPHABET[(word & 0x3f) as usize] as char);
        word >>= 6;
    }
}

fn read_word(chars: &[u8]) -> Result<u32, CryptError> {
    let mut word = 0;
    for (i, c) in chars.iter().enumerate() {
        let value = char_value(*c).ok_or(CryptError::MalformedHash("invalid digest character"))?;
        word |= value << (6 * i);
    }
    Ok(word)
}

/// Renders a raw digest of `scheme` as text.
///
/// # Panics
///
/// Panics if the length of `digest` differs from the scheme's digest length.
pub fn encode(scheme: Scheme, digest: &[u8]) -> String {
    let params = scheme.params();
    assert_eq!(
        digest.len(),
        params.digest_len,
        "{} digests are {} bytes long",
        scheme,
        params.digest_len
    );
    let layout = params.layout;
    let mut out = String::with_capacity(layout.encoded_len());

    for &[a, b, c] in layout.groups {
        let word = (digest[a] as u32) << 16 | (digest[b] as u32) << 8 | digest[c] as u32;
        write_word(&mut out, word, 4);
    }

    let tail = layout
        .tail
        .iter()
        .fold(0u32, |word, &i| word << 8 | digest[i] as u32);
    write_word(&mut out, tail, layout.tail.len() + 1);
    out
}

/// Recovers the raw digest from its textual form.
///
/// Only the canonical encoding is accepted, so that `decode` is the exact
/// inverse of [`encode`].
pub fn decode(scheme: Scheme, text: &str) -> Result<Vec<u8>, CryptError> {
    let params = scheme.params();
    let layout = params.layout;
    let text = text.as_bytes();
    ensure!(
        text.len() == layout.encoded_len(),
        CryptError::MalformedHash("wrong digest length")
    );

    let mut digest = vec![0u8; params.digest_len];
    let (groups, tail) = text.split_at(layout.groups.len() * 4);

    for (&[a, b, c], chars) in layout.groups.iter().zip(groups.chunks(4)) {
        let word = read_word(chars)?;
        digest[a] = (word >> 16) as u8;
        digest[b] = (word >> 8) as u8;
        digest[c] = word as u8;
    }

    let word = read_word(tail)?;
    ensure!(
        word >> (8 * layout.tail.len()) == 0,
        CryptError::MalformedHash("non-zero padding bits")
    );
    for (k, &i) in layout.tail.iter().rev().enumerate() {
        digest[i] = (word >> (8 * k)) as u8;
    }

    Ok(digest)
}
