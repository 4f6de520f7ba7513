use crate::error::{invalid, Result};

/// Returns page `page` (1-based) of `records`, `page_size` items per page.
///
/// Pages past the end are empty rather than an error; whether that means
/// "not found" is up to the caller.
pub fn paginate<T>(records: &[T], page: i64, page_size: i64) -> Result<&[T]> {
    check_page(page, page_size)?;

    let start = (page - 1).saturating_mul(page_size);
    let start = usize::try_from(start).unwrap_or(usize::MAX).min(records.len());
    let size = usize::try_from(page_size).unwrap_or(usize::MAX);
    let end = start.saturating_add(size).min(records.len());

    Ok(&records[start..end])
}

/// Rejects a page or page size below 1 without looking at any records.
pub fn check_page(page: i64, page_size: i64) -> Result<()> {
    if page < 1 {
        return Err(invalid(format!("page must be at least 1, got {page}")));
    }
    if page_size < 1 {
        return Err(invalid(format!(
            "page size must be at least 1, got {page_size}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TriviaError;

    fn numbers(n: i64) -> Vec<i64> {
        (1..=n).collect()
    }

    #[test]
    fn first_page_holds_the_first_ten() {
        let records = numbers(25);
        assert_eq!(paginate(&records, 1, 10).unwrap(), &records[0..10]);
    }

    #[test]
    fn last_page_is_clipped() {
        let records = numbers(25);
        assert_eq!(paginate(&records, 3, 10).unwrap(), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let records = numbers(25);
        assert!(paginate(&records, 4, 10).unwrap().is_empty());
        assert!(paginate(&records, 1000, 10).unwrap().is_empty());
        assert!(paginate(&records, i64::MAX, 10).unwrap().is_empty());
    }

    #[test]
    fn pages_concatenate_back_to_the_input() {
        for len in [0, 1, 9, 10, 11, 30, 47] {
            let records = numbers(len);
            let pages = len / 10 + 2;
            let mut rebuilt = Vec::new();
            for page in 1..=pages {
                let chunk = paginate(&records, page, 10).unwrap();
                assert!(chunk.len() <= 10);
                rebuilt.extend_from_slice(chunk);
            }
            assert_eq!(rebuilt, records, "length {len}");
        }
    }

    #[test]
    fn zero_or_negative_page_is_rejected() {
        let records = numbers(5);
        for page in [0, -1, i64::MIN] {
            let err = paginate(&records, page, 10).unwrap_err();
            assert!(matches!(err, TriviaError::Validation(_)), "page {page}");
        }
    }

    #[test]
    fn page_check_needs_no_records() {
        assert!(check_page(1, 10).is_ok());
        assert!(matches!(check_page(0, 10), Err(TriviaError::Validation(_))));
        assert!(matches!(check_page(1, -3), Err(TriviaError::Validation(_))));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let records = numbers(5);
        let err = paginate(&records, 1, 0).unwrap_err();
        assert!(matches!(err, TriviaError::Validation(_)));
    }
}
