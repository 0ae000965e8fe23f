//! Element mapping over slices.

/// Returns a new vector with `mapper` applied to every element, in index order.
///
/// The input is never modified and the output has the same length.
pub fn map<T, U, F>(input: &[T], mut mapper: F) -> Vec<U>
where
    F: FnMut(&T) -> U,
{
    let mut out = Vec::with_capacity(input.len());
    for item in input {
        out.push(mapper(item));
    }
    out
}

/// Overwrites every element with `mapper(element)`, in index order.
pub fn map_in_place<T, F>(items: &mut [T], mut mapper: F)
where
    F: FnMut(&T) -> T,
{
    for slot in items.iter_mut() {
        *slot = mapper(slot);
    }
}

/// Fallible [`map`]. Stops at the first error; no output is returned in that case.
pub fn try_map<T, U, E, F>(input: &[T], mut mapper: F) -> Result<Vec<U>, E>
where
    F: FnMut(&T) -> Result<U, E>,
{
    let mut out = Vec::with_capacity(input.len());
    for item in input {
        out.push(mapper(item)?);
    }
    Ok(out)
}

/// Fallible [`map_in_place`].
///
/// # Errors
///
/// Stops at the first error. Slots before the failing index already hold mapped values.
pub fn try_map_in_place<T, E, F>(items: &mut [T], mut mapper: F) -> Result<(), E>
where
    F: FnMut(&T) -> Result<T, E>,
{
    for slot in items.iter_mut() {
        *slot = mapper(slot)?;
    }
    Ok(())
}
