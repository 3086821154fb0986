use zeroize::{Zeroize, Zeroizing};

/// Repeats `digest` until exactly `len` bytes are produced, then wipes `digest`.
pub(crate) fn cycle_wiped(digest: &mut [u8], len: usize) -> Zeroizing<Vec<u8>> {
    let out = Zeroizing::new(digest.iter().copied().cycle().take(len).collect());
    digest.zeroize();
    out
}

/// Copies `digest` out and wipes the original.
pub(crate) fn take_wiped(digest: &mut [u8]) -> Vec<u8> {
    let out = digest.to_vec();
    digest.zeroize();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wiped() {
        let mut digest = [1, 2, 3];
        assert_eq!(*cycle_wiped(&mut digest, 7), vec![1, 2, 3, 1, 2, 3, 1]);
        assert_eq!(digest, [0, 0, 0]);

        let mut digest = [1, 2, 3];
        assert_eq!(*cycle_wiped(&mut digest, 2), vec![1, 2]);
        assert_eq!(digest, [0, 0, 0]);

        let mut digest = [1, 2, 3];
        assert!(cycle_wiped(&mut digest, 0).is_empty());
        assert_eq!(digest, [0, 0, 0]);
    }

    #[test]
    fn test_take_wiped() {
        let mut digest = [0xde, 0xad, 0xbe, 0xef];
        assert_eq!(take_wiped(&mut digest), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(digest, [0; 4]);
    }
}
