use crate::models::SortDirection;

/// Stable bottom-up merge sort of `items` by a numeric key
///
/// Keys are extracted once up front, then an index permutation is merged in
/// runs of width 1, 2, 4, ... so there is no recursion and `T` need not be
/// `Clone`. Records with equal keys keep their input order in either direction.
pub fn sort_by_key<T, F>(items: Vec<T>, key: F, direction: SortDirection) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    let keys: Vec<f64> = items.iter().map(&key).collect();
    let order = sorted_order(&keys, direction);
    apply_order(items, &order)
}

/// Indices of `keys` in stable sorted order
pub fn sorted_order(keys: &[f64], direction: SortDirection) -> Vec<usize> {
    let n = keys.len();
    let mut src: Vec<usize> = (0..n).collect();
    if n <= 1 {
        return src;
    }

    let mut dst = vec![0usize; n];
    let mut width = 1;

    while width < n {
        let mut start = 0;
        while start < n {
            let mid = (start + width).min(n);
            let end = (start + 2 * width).min(n);
            merge_runs(keys, &src[start..mid], &src[mid..end], &mut dst[start..end], direction);
            start = end;
        }
        std::mem::swap(&mut src, &mut dst);
        width *= 2;
    }

    src
}

/// Merge two sorted runs of indices into `out`
///
/// On equal keys the left run wins, which is what makes the sort stable.
#[inline]
fn merge_runs(keys: &[f64], left: &[usize], right: &[usize], out: &mut [usize], direction: SortDirection) {
    let (mut l, mut r, mut o) = (0, 0, 0);

    while l < left.len() && r < right.len() {
        let left_key = keys[left[l]];
        let right_key = keys[right[r]];

        let take_left = match direction {
            SortDirection::Descending => left_key >= right_key,
            SortDirection::Ascending => left_key <= right_key,
        };

        if take_left {
            out[o] = left[l];
            l += 1;
        } else {
            out[o] = right[r];
            r += 1;
        }
        o += 1;
    }

    let rest_left = &left[l..];
    out[o..o + rest_left.len()].copy_from_slice(rest_left);
    o += rest_left.len();

    let rest_right = &right[r..];
    out[o..o + rest_right.len()].copy_from_slice(rest_right);
}

/// Move `items` into the order given by a permutation of their indices
fn apply_order<T>(items: Vec<T>, order: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order.iter().filter_map(|&i| slots[i].take()).collect()
}
