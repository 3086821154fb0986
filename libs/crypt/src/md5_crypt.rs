use md5::{Digest, Md5};
use zeroize::Zeroize;

use crate::scheme::MD5_ROUNDS;
use crate::wipe::take_wiped;

const MAGIC: &[u8] = b"$1$";

/// Computes the raw MD5-crypt digest.
///
/// The salt is used as given, callers are responsible for validating it.
/// Intermediate digests are wiped before returning.
pub(crate) fn md5_crypt(password: &[u8], salt: &[u8]) -> Vec<u8> {
    let mut alt = {
        let mut ctx = Md5::new();
        ctx.update(password);
        ctx.update(salt);
        ctx.update(password);
        ctx.finalize()
    };

    let mut ctx = Md5::new();
    ctx.update(password);
    ctx.update(MAGIC);
    ctx.update(salt);
    for chunk in password.chunks(alt.len()) {
        ctx.update(&alt[..chunk.len()]);
    }

    // A set bit contributes a zero byte, a cleared one the first password byte.
    let mut n = password.len();
    while n > 0 {
        if n & 1 != 0 {
            ctx.update([0u8]);
        } else {
            ctx.update(&password[..1]);
        }
        n >>= 1;
    }
    let mut result = ctx.finalize();
    alt.as_mut_slice().zeroize();

    for i in 0..MD5_ROUNDS {
        let mut ctx = Md5::new();
        if i & 1 != 0 {
            ctx.update(password);
        } else {
            ctx.update(&result);
        }
        if i % 3 != 0 {
            ctx.update(salt);
        }
        if i % 7 != 0 {
            ctx.update(password);
        }
        if i & 1 != 0 {
            ctx.update(&result);
        } else {
            ctx.update(password);
        }
        result = ctx.finalize();
    }

    take_wiped(result.as_mut_slice())
}
