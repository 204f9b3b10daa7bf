use once_cell::sync::Lazy;
use regex::Regex;

use super::{AddBook, ValidationError};

/// 出版年の下限
pub const MIN_PUBLICATION_YEAR: i32 = 1500;

/// 現在年から許容する未来方向の幅（年）
pub const MAX_YEARS_AHEAD: i32 = 2;

/// 10〜17文字、数字とハイフンのみ
static ISBN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9-]{10,17}$").expect("ISBN pattern is a valid regex"));

/// 純粋関数：追加しようとしている書籍を検証する
///
/// ビジネスルール：
/// - ISBNは10〜17文字の数字とハイフンのみ
/// - 出版年は1500年以上、現在年 + 2 以下
///
/// ISBNの検証を先に行うため、両方が不正な場合はISBNのエラーが返る。
/// 副作用なし。現在年は呼び出し側が時計から取得して渡す。
pub fn validate_new_book(cmd: &AddBook, current_year: i32) -> Result<(), ValidationError> {
    validate_isbn_format(cmd.isbn.as_str())?;
    validate_year_range(cmd.year, current_year)
}

pub fn validate_isbn_format(isbn: &str) -> Result<(), ValidationError> {
    if !ISBN_PATTERN.is_match(isbn) {
        return Err(ValidationError::InvalidIsbnFormat);
    }
    Ok(())
}

pub fn validate_year_range(year: i32, current_year: i32) -> Result<(), ValidationError> {
    if year > current_year + MAX_YEARS_AHEAD {
        return Err(ValidationError::YearTooFarInFuture);
    }
    if year < MIN_PUBLICATION_YEAR {
        return Err(ValidationError::YearBeforeMinimum);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Isbn;

    const CURRENT_YEAR: i32 = 2024;

    fn add_book(isbn: &str, year: i32) -> AddBook {
        AddBook {
            isbn: Isbn::new(isbn),
            title: "Test Book".to_string(),
            year,
            price: 49.99,
            genre: "Fiction".to_string(),
            authors: vec![],
        }
    }

    #[test]
    fn test_validate_new_book_accepts_valid_input() {
        assert!(validate_new_book(&add_book("123-4567890123", 2023), CURRENT_YEAR).is_ok());
    }

    #[test]
    fn test_validate_new_book_rejects_invalid_isbn() {
        let result = validate_new_book(&add_book("invalid-isbn", 2023), CURRENT_YEAR);
        let err = result.unwrap_err();
        assert_eq!(err, ValidationError::InvalidIsbnFormat);
        assert_eq!(
            err.to_string(),
            "Invalid ISBN format. Must be 10-17 digits with optional hyphens"
        );
    }

    #[test]
    fn test_validate_new_book_rejects_year_before_1500() {
        let result = validate_new_book(&add_book("1234567890", 1499), CURRENT_YEAR);
        let err = result.unwrap_err();
        assert_eq!(err, ValidationError::YearBeforeMinimum);
        assert_eq!(err.to_string(), "Publication year cannot be before 1500");
    }

    #[test]
    fn test_validate_new_book_checks_isbn_before_year() {
        let result = validate_new_book(&add_book("abc", 1000), CURRENT_YEAR);
        assert_eq!(result.unwrap_err(), ValidationError::InvalidIsbnFormat);
    }

    // ISBN: 長さの境界
    #[test]
    fn test_isbn_length_boundaries() {
        assert!(validate_isbn_format("123456789").is_err());
        assert!(validate_isbn_format("1234567890").is_ok());
        assert!(validate_isbn_format("12345678901234567").is_ok());
        assert!(validate_isbn_format("123456789012345678").is_err());
    }

    #[test]
    fn test_isbn_allows_only_digits_and_hyphens() {
        assert!(validate_isbn_format("----------").is_ok());
        assert!(validate_isbn_format("978-3-16-148410-0").is_ok());
        assert!(validate_isbn_format("123456789X").is_err());
        assert!(validate_isbn_format("123 456 789").is_err());
        assert!(validate_isbn_format("").is_err());
        assert!(validate_isbn_format("１２３４５６７８９０").is_err());
    }

    #[test]
    fn test_isbn_rejects_trailing_newline() {
        assert!(validate_isbn_format("1234567890\n").is_err());
    }

    // 出版年: 範囲の境界
    #[test]
    fn test_year_range_boundaries() {
        assert_eq!(
            validate_year_range(1499, CURRENT_YEAR),
            Err(ValidationError::YearBeforeMinimum)
        );
        assert!(validate_year_range(1500, CURRENT_YEAR).is_ok());
        assert!(validate_year_range(CURRENT_YEAR + 2, CURRENT_YEAR).is_ok());
        assert_eq!(
            validate_year_range(CURRENT_YEAR + 3, CURRENT_YEAR),
            Err(ValidationError::YearTooFarInFuture)
        );
    }

    #[test]
    fn test_year_range_follows_current_year() {
        assert!(validate_year_range(2030, 2028).is_ok());
        assert!(validate_year_range(2030, 2027).is_err());
    }
}
