/*!
 * Tests for language code utilities
 */

use transqa::language_utils::{
    LanguageCodeType, get_language_name, language_codes_match, normalize_to_part1, normalize_to_part2t,
    validate_language_code,
};

#[test]
fn test_validateLanguageCode_withValidCodes_shouldReturnType() {
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("fra").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B);
    assert_eq!(validate_language_code(" ES ").unwrap(), LanguageCodeType::Part1);
}

#[test]
fn test_validateLanguageCode_withInvalidCodes_shouldFail() {
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("english").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_normalizeToPart2t_shouldConvertAllForms() {
    assert_eq!(normalize_to_part2t("de").unwrap(), "deu");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");
    assert_eq!(normalize_to_part2t("deu").unwrap(), "deu");
}

#[test]
fn test_normalizeToPart1_shouldPreferTwoLetterCodes() {
    assert_eq!(normalize_to_part1("spa").unwrap(), "es");
    assert_eq!(normalize_to_part1("fre").unwrap(), "fr");
    assert!(normalize_to_part1("nope").is_err());
}

#[test]
fn test_languageCodesMatch_shouldCompareAcrossForms() {
    assert!(language_codes_match("fr", "fra"));
    assert!(language_codes_match("fre", "FR"));
    assert!(!language_codes_match("fr", "de"));
    assert!(!language_codes_match("fr", "zz"));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("deu").unwrap(), "German");
    assert!(get_language_name("qq").is_err());
}
