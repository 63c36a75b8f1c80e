//! In-place exchange of a block of operands with the block of options
//! that follows it.

/// Greatest common divisor. Both arguments must be non-zero.
pub(crate) fn gcd(mut a: usize, mut b: usize) -> usize {
    let mut c = a % b;
    while c != 0 {
        a = b;
        b = c;
        c = a % b;
    }
    b
}

/// Exchange `argv[start..mid]` with `argv[mid..end]`, keeping the order of
/// the elements inside each block.
///
/// The rotation is split into `gcd(mid - start, end - mid)` independent
/// cycles; each cycle is walked once, swapping every visited slot with the
/// cycle's first slot, so `end - start` swaps are done in total and no
/// scratch storage is needed.
///
/// # Panics
///
/// Panics if `start <= mid <= end <= argv.len()` does not hold.
pub fn permute<T>(argv: &mut [T], start: usize, mid: usize, end: usize) {
    assert!(
        start <= mid && mid <= end && end <= argv.len(),
        "bad permutation bounds {start}..{mid}..{end} for {} arguments",
        argv.len()
    );

    let (ncycle, cyclelen) = walk_cycles(start, mid, end, |a, b| argv.swap(a, b));
    tracing::trace!(start, mid, end, ncycle, cyclelen, "permuted argument block");
}

/// Drive the cycle decomposition of the block exchange, calling `swap` for
/// every exchange of two slots. Returns the number of cycles and their
/// length; both are 0 when either block is empty.
fn walk_cycles<F: FnMut(usize, usize)>(
    start: usize,
    mid: usize,
    end: usize,
    mut swap: F,
) -> (usize, usize) {
    let nnonopts = mid - start;
    let nopts = end - mid;
    if nnonopts == 0 || nopts == 0 {
        return (0, 0);
    }

    let ncycle = gcd(nnonopts, nopts);
    let cyclelen = (end - start) / ncycle;

    for i in 0..ncycle {
        let cstart = mid + i;
        let mut pos = cstart;
        for _ in 0..cyclelen {
            if pos >= mid {
                pos -= nnonopts;
            } else {
                pos += nopts;
            }
            swap(pos, cstart);
        }
    }
    (ncycle, cyclelen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_basic() {
        assert_eq!(gcd(1, 1), 1);
        assert_eq!(gcd(4, 6), 2);
        assert_eq!(gcd(6, 4), 2);
        assert_eq!(gcd(9, 3), 3);
        assert_eq!(gcd(7, 5), 1);
    }

    #[test]
    fn single_swap() {
        let mut v = vec!["x", "-a"];
        permute(&mut v, 0, 1, 2);
        assert_eq!(v, ["-a", "x"]);
    }

    #[test]
    fn two_operands_one_option() {
        let mut v = vec!["prog", "x", "y", "-a"];
        permute(&mut v, 1, 3, 4);
        assert_eq!(v, ["prog", "-a", "x", "y"]);
    }

    #[test]
    fn several_cycles() {
        // gcd(2, 4) == 2: two cycles of length 3
        let mut v = vec!["x", "y", "-a", "-b", "B", "-c"];
        permute(&mut v, 0, 2, 6);
        assert_eq!(v, ["-a", "-b", "B", "-c", "x", "y"]);
    }

    #[test]
    fn empty_blocks_are_untouched() {
        let mut v = vec![1, 2, 3];
        permute(&mut v, 0, 0, 3);
        assert_eq!(v, [1, 2, 3]);
        permute(&mut v, 0, 3, 3);
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    fn matches_rotate_for_all_splits() {
        for len in 1..=12usize {
            for m in 0..=len {
                let original: Vec<usize> = (0..len + 2).collect();
                let mut expected = original.clone();
                expected[1..len + 1].rotate_left(m);

                let mut v = original.clone();
                permute(&mut v, 1, 1 + m, 1 + len);
                assert_eq!(v, expected, "len {len}, split {m}");
            }
        }
    }

    #[test]
    fn one_swap_per_element() {
        for len in 1..=12usize {
            for m in 1..len {
                let mut swaps = 0;
                walk_cycles(1, 1 + m, 1 + len, |_, _| swaps += 1);
                assert_eq!(swaps, len, "len {len}, split {m}");
            }
        }
    }

    #[test]
    fn swapping_roles_restores_order() {
        for m in 1..=7usize {
            for n in 1..=7usize {
                let original: Vec<usize> = (0..m + n).collect();
                let mut v = original.clone();
                permute(&mut v, 0, m, m + n);
                permute(&mut v, 0, n, m + n);
                assert_eq!(v, original, "m {m}, n {n}");
            }
        }
    }

    #[test]
    #[should_panic(expected = "bad permutation bounds")]
    fn rejects_inverted_bounds() {
        let mut v = vec![1, 2, 3];
        permute(&mut v, 2, 1, 3);
    }
}
