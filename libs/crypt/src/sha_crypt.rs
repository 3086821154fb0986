use digest::Digest;
use zeroize::Zeroize;

use crate::wipe::{cycle_wiped, take_wiped};

/// Computes the raw SHA-crypt digest with the hash function `D`.
///
/// `rounds` must already be clamped and the salt validated. Every
/// intermediate digest is wiped before returning.
pub(crate) fn sha_crypt<D: Digest>(password: &[u8], salt: &[u8], rounds: u32) -> Vec<u8> {
    let mut alt = {
        let mut ctx = D::new();
        ctx.update(password);
        ctx.update(salt);
        ctx.update(password);
        ctx.finalize()
    };

    let mut ctx = D::new();
    ctx.update(password);
    ctx.update(salt);
    for chunk in password.chunks(alt.len()) {
        ctx.update(&alt[..chunk.len()]);
    }

    let mut n = password.len();
    while n > 0 {
        if n & 1 != 0 {
            ctx.update(&alt);
        } else {
            ctx.update(password);
        }
        n >>= 1;
    }
    let mut result = ctx.finalize();
    alt.as_mut_slice().zeroize();

    let p_bytes = {
        let mut ctx = D::new();
        for _ in 0..password.len() {
            ctx.update(password);
        }
        let mut dp = ctx.finalize();
        cycle_wiped(dp.as_mut_slice(), password.len())
    };

    let s_bytes = {
        let mut ctx = D::new();
        for _ in 0..16 + result[0] as usize {
            ctx.update(salt);
        }
        let mut ds = ctx.finalize();
        cycle_wiped(ds.as_mut_slice(), salt.len())
    };

    for i in 0..rounds {
        let mut ctx = D::new();
        if i & 1 != 0 {
            ctx.update(&*p_bytes);
        } else {
            ctx.update(&result);
        }
        if i % 3 != 0 {
            ctx.update(&*s_bytes);
        }
        if i % 7 != 0 {
            ctx.update(&*p_bytes);
        }
        if i & 1 != 0 {
            ctx.update(&result);
        } else {
            ctx.update(&*p_bytes);
        }
        result = ctx.finalize();
    }

    take_wiped(result.as_mut_slice())
}
