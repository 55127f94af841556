/// Tail dropped when two series are cut to their common prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    pub left_len: usize,
    pub right_len: usize,
}

impl LengthMismatch {
    pub fn common_len(&self) -> usize {
        self.left_len.min(self.right_len)
    }

    pub fn dropped(&self) -> usize {
        self.left_len.max(self.right_len) - self.common_len()
    }
}

/// 截成共同前綴長度，不做內插或重新取樣
pub fn align<'a, T>(a: &'a [T], b: &'a [T]) -> (&'a [T], &'a [T]) {
    let n = a.len().min(b.len());
    (&a[..n], &b[..n])
}

pub fn length_mismatch<T>(a: &[T], b: &[T]) -> Option<LengthMismatch> {
    if a.len() == b.len() {
        return None;
    }
    Some(LengthMismatch {
        left_len: a.len(),
        right_len: b.len(),
    })
}
