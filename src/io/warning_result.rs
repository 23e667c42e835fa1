/// An enum acting like a `Result`, but producing warnings instead of errors.
///
/// There is always a value, possibly associated with one or more warnings.
pub enum WarningResult<T, W> {
    Ok(T),
    Warned(T, Vec<W>),
}

impl<T, W> WarningResult<T, W> {
    /// Returns the value, passing the warnings (if any) to the provided callback.
    pub fn consume_warnings<F>(self, f: F) -> T
    where
        F: FnOnce(Vec<W>),
    {
        match self {
            WarningResult::Ok(t) => t,
            WarningResult::Warned(t, w) => {
                f(w);
                t
            }
        }
    }

    /// Applies a function to the value, keeping the warnings.
    pub fn map<U, F>(self, f: F) -> WarningResult<U, W>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            WarningResult::Ok(t) => WarningResult::Ok(f(t)),
            WarningResult::Warned(t, w) => WarningResult::Warned(f(t), w),
        }
    }

    /// Merges two results into a result for the couple of their values.
    ///
    /// The warnings are concatenated; the result is `Ok` iff there is none.
    pub fn zip<U>(self, other: WarningResult<U, W>) -> WarningResult<(T, U), W> {
        let (t, mut warnings) = self.split();
        let (u, other_warnings) = other.split();
        warnings.extend(other_warnings);
        if warnings.is_empty() {
            WarningResult::Ok((t, u))
        } else {
            WarningResult::Warned((t, u), warnings)
        }
    }

    fn split(self) -> (T, Vec<W>) {
        match self {
            WarningResult::Ok(t) => (t, vec![]),
            WarningResult::Warned(t, w) => (t, w),
        }
    }
}
