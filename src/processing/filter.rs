//! Predicate filtering over slices and vectors.
//!
//! Copy mode scans once to find the kept indices and then copies into an exactly sized output.
//! In-place mode compacts the kept elements to the front with a write cursor and truncates.
//! Both preserve the relative order of kept elements.

/// Returns a new vector with the elements for which `predicate` returns `true`.
pub fn filter<T, F>(input: &[T], mut predicate: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    let which: Vec<usize> = input
        .iter()
        .enumerate()
        .filter_map(|(i, item)| predicate(item).then_some(i))
        .collect();
    copy_indices(input, &which)
}

/// Keeps only the elements for which `predicate` returns `true`, in a single pass.
pub fn filter_in_place<T, F>(items: &mut Vec<T>, mut predicate: F)
where
    F: FnMut(&T) -> bool,
{
    let mut write = 0;
    for read in 0..items.len() {
        if predicate(&items[read]) {
            // write <= read, so this never moves an unvisited element behind the cursor.
            items.swap(write, read);
            write += 1;
        }
    }
    items.truncate(write);
}

/// Fallible [`filter`]. Stops at the first error.
pub fn try_filter<T, E, F>(input: &[T], mut predicate: F) -> Result<Vec<T>, E>
where
    T: Clone,
    F: FnMut(&T) -> Result<bool, E>,
{
    let which = scan(input, &mut predicate)?;
    Ok(copy_indices(input, &which))
}

/// Fallible [`filter_in_place`].
///
/// The predicate runs over every element before anything moves, so on error `items` is
/// unchanged.
pub fn try_filter_in_place<T, E, F>(items: &mut Vec<T>, mut predicate: F) -> Result<(), E>
where
    F: FnMut(&T) -> Result<bool, E>,
{
    let which = scan(items, &mut predicate)?;
    for (write, &read) in which.iter().enumerate() {
        items.swap(write, read);
    }
    items.truncate(which.len());
    Ok(())
}

fn scan<T, E, F>(input: &[T], predicate: &mut F) -> Result<Vec<usize>, E>
where
    F: FnMut(&T) -> Result<bool, E>,
{
    let mut which = Vec::new();
    for (i, item) in input.iter().enumerate() {
        if predicate(item)? {
            which.push(i);
        }
    }
    Ok(which)
}

fn copy_indices<T: Clone>(input: &[T], which: &[usize]) -> Vec<T> {
    let mut out = Vec::with_capacity(which.len());
    out.extend(which.iter().map(|&i| input[i].clone()));
    out
}

#[cfg(test)]
mod tests {
    use super::{filter, filter_in_place, try_filter, try_filter_in_place};

    #[test]
    fn filter_keeps_even_numbers_in_order() {
        let input = vec![1, 2, 3, 4];
        assert_eq!(filter(&input, |x| x % 2 == 0), vec![2, 4]);
        assert_eq!(input, vec![1, 2, 3, 4]);
    }

    #[test]
    fn filter_output_is_exactly_sized() {
        let out = filter(&[5, 6, 7, 8, 9, 10], |x| *x > 8);
        assert_eq!(out.capacity(), 2);
    }

    #[test]
    fn filter_can_return_empty() {
        assert!(filter(&[1, 3, 5], |x| x % 2 == 0).is_empty());
        assert!(filter(&[] as &[i32], |_| true).is_empty());
    }

    #[test]
    fn filter_in_place_compacts_and_truncates() {
        let mut v = vec!["CHN Beijing", "USA New York", "UK London", "CHN Shanghai"];
        filter_in_place(&mut v, |s| s.starts_with("CHN"));
        assert_eq!(v, vec!["CHN Beijing", "CHN Shanghai"]);
    }

    #[test]
    fn filter_in_place_on_empty_vec() {
        let mut v: Vec<i32> = Vec::new();
        filter_in_place(&mut v, |_| true);
        assert!(v.is_empty());
    }

    #[test]
    fn filter_in_place_keep_all_and_drop_all() {
        let mut v = vec![1, 2, 3];
        filter_in_place(&mut v, |_| true);
        assert_eq!(v, vec![1, 2, 3]);
        filter_in_place(&mut v, |_| false);
        assert!(v.is_empty());
    }

    #[test]
    fn try_filter_in_place_leaves_input_untouched_on_error() {
        let mut v = vec![1, 2, 3, 4];
        let res: Result<(), &str> = try_filter_in_place(&mut v, |x| {
            if *x == 4 { Err("four") } else { Ok(x % 2 == 1) }
        });
        assert_eq!(res, Err("four"));
        assert_eq!(v, vec![1, 2, 3, 4]);
    }

    #[test]
    fn try_filter_variants_agree_with_infallible_ones() {
        let input = vec![3, 8, 1, 9, 4, 6];
        let copied: Result<Vec<i32>, ()> = try_filter(&input, |x| Ok(*x > 3));
        assert_eq!(copied.unwrap(), filter(&input, |x| *x > 3));

        let mut in_place = input.clone();
        try_filter_in_place::<_, (), _>(&mut in_place, |x| Ok(*x > 3)).unwrap();
        assert_eq!(in_place, vec![8, 9, 4, 6]);
    }
}
