//! Built-in conversion tables per locale
//!
//! The generic `iso9` table covers Russian, Ukrainian, Belarusian, Bulgarian,
//! Macedonian/Serbian and pre-reform letters. Locale tables are variants of it
//! tuned for one orthography.

use lazy_static::lazy_static;

use super::conversion_table::ConversionTable;

/// Generic fallback locale key
pub const ISO9: &str = "iso9";
/// Bulgarian
pub const BG_BG: &str = "bg_BG";
/// Ukrainian
pub const UK: &str = "uk";
/// Georgian
pub const KA_GE: &str = "ka_GE";

/// Locale keys with a curated table, fallback first
pub const SUPPORTED_LOCALES: [&str; 4] = [ISO9, BG_BG, UK, KA_GE];

#[rustfmt::skip]
const ISO9_PAIRS: &[(&str, &str)] = &[
    ("А", "A"), ("Б", "B"), ("В", "V"), ("Г", "G"), ("Ѓ", "G"), ("Ґ", "G"),
    ("Д", "D"), ("Е", "E"), ("Ё", "Yo"), ("Є", "Ye"), ("Ж", "Zh"), ("З", "Z"),
    ("Ѕ", "Z"), ("И", "I"), ("Й", "J"), ("Ј", "J"), ("І", "I"), ("Ї", "Yi"),
    ("К", "K"), ("Ќ", "K"), ("Л", "L"), ("Љ", "L"), ("М", "M"), ("Н", "N"),
    ("Њ", "N"), ("О", "O"), ("П", "P"), ("Р", "R"), ("С", "S"), ("Т", "T"),
    ("У", "U"), ("Ў", "U"), ("Ф", "F"), ("Х", "H"), ("Ц", "Cz"), ("Ч", "Ch"),
    ("Џ", "Dh"), ("Ш", "Sh"), ("Щ", "Shh"), ("Ъ", ""), ("Ы", "Y"), ("Ь", ""),
    ("Э", "E"), ("Ю", "Yu"), ("Я", "Ya"), ("Ѣ", "Ye"), ("Ѳ", "Fh"), ("Ѵ", "Yh"),
    ("а", "a"), ("б", "b"), ("в", "v"), ("г", "g"), ("ѓ", "g"), ("ґ", "g"),
    ("д", "d"), ("е", "e"), ("ё", "yo"), ("є", "ye"), ("ж", "zh"), ("з", "z"),
    ("ѕ", "z"), ("и", "i"), ("й", "j"), ("ј", "j"), ("і", "i"), ("ї", "yi"),
    ("к", "k"), ("ќ", "k"), ("л", "l"), ("љ", "l"), ("м", "m"), ("н", "n"),
    ("њ", "n"), ("о", "o"), ("п", "p"), ("р", "r"), ("с", "s"), ("т", "t"),
    ("у", "u"), ("ў", "u"), ("ф", "f"), ("х", "h"), ("ц", "cz"), ("ч", "ch"),
    ("џ", "dh"), ("ш", "sh"), ("щ", "shh"), ("ъ", ""), ("ы", "y"), ("ь", ""),
    ("э", "e"), ("ю", "yu"), ("я", "ya"), ("ѣ", "ye"), ("ѳ", "fh"), ("ѵ", "yh"),
    // decomposed forms (base letter + combining mark)
    ("И\u{0306}", "J"), ("и\u{0306}", "j"), ("Е\u{0308}", "Yo"), ("е\u{0308}", "yo"),
    ("І\u{0308}", "Yi"), ("і\u{0308}", "yi"), ("У\u{0306}", "U"), ("у\u{0306}", "u"),
    ("№", "#"), ("—", "-"), ("«", ""), ("»", ""), ("…", ""),
];

#[rustfmt::skip]
const BG_BG_PAIRS: &[(&str, &str)] = &[
    ("Щ", "Sht"), ("щ", "sht"), ("Ъ", "A"), ("ъ", "a"), ("Ц", "Ts"), ("ц", "ts"),
    ("Й", "Y"), ("й", "y"), ("Ь", "Y"), ("ь", "y"), ("Х", "H"), ("х", "h"),
    ("И\u{0306}", "Y"), ("и\u{0306}", "y"),
];

#[rustfmt::skip]
const UK_PAIRS: &[(&str, &str)] = &[
    ("Г", "H"), ("г", "h"), ("Ґ", "G"), ("ґ", "g"), ("И", "Y"), ("и", "y"),
    ("Й", "Y"), ("й", "y"), ("Х", "Kh"), ("х", "kh"), ("Ц", "Ts"), ("ц", "ts"),
    ("Щ", "Shch"), ("щ", "shch"), ("И\u{0306}", "Y"), ("и\u{0306}", "y"),
    // apostrophe variants all become ASCII '
    ("’", "'"), ("ʼ", "'"), ("‘", "'"), ("`", "'"),
];

/// Russian-only letters absent from Ukrainian orthography
const UK_REMOVED: &[&str] = &["Ё", "ё", "Ы", "ы", "Э", "э", "Ъ", "ъ", "Е\u{0308}", "е\u{0308}"];

#[rustfmt::skip]
const KA_GE_PAIRS: &[(&str, &str)] = &[
    ("ა", "a"), ("ბ", "b"), ("გ", "g"), ("დ", "d"), ("ე", "e"), ("ვ", "v"),
    ("ზ", "z"), ("თ", "th"), ("ი", "i"), ("კ", "k"), ("ლ", "l"), ("მ", "m"),
    ("ნ", "n"), ("ო", "o"), ("პ", "p"), ("ჟ", "zh"), ("რ", "r"), ("ს", "s"),
    ("ტ", "t"), ("უ", "u"), ("ფ", "ph"), ("ქ", "q"), ("ღ", "gh"), ("ყ", "qh"),
    ("შ", "sh"), ("ჩ", "ch"), ("ც", "ts"), ("ძ", "dz"), ("წ", "ts"), ("ჭ", "tch"),
    ("ხ", "kh"), ("ჯ", "j"), ("ჰ", "h"),
];

lazy_static! {
    static ref ISO9_TABLE: ConversionTable = ConversionTable::from_pairs(ISO9_PAIRS.iter().copied());
    static ref BG_BG_TABLE: ConversionTable = variant_of_iso9(BG_BG_PAIRS, &[]);
    static ref UK_TABLE: ConversionTable = variant_of_iso9(UK_PAIRS, UK_REMOVED);
    static ref KA_GE_TABLE: ConversionTable = variant_of_iso9(KA_GE_PAIRS, &[]);
}

fn variant_of_iso9(overrides: &[(&str, &str)], removed: &[&str]) -> ConversionTable {
    let mut table = ISO9_TABLE.clone();
    for key in removed {
        table.remove(key);
    }
    table.extend(overrides.iter().copied());
    table
}

/// Built-in table for `locale`; unknown locales get the `iso9` table
pub fn get_table(locale: &str) -> ConversionTable {
    builtin(locale).clone()
}

/// Borrowing form of [`get_table`]
pub fn builtin(locale: &str) -> &'static ConversionTable {
    match locale {
        BG_BG => &*BG_BG_TABLE,
        UK => &*UK_TABLE,
        KA_GE => &*KA_GE_TABLE,
        _ => &*ISO9_TABLE,
    }
}

/// Whether `locale` has a curated table of its own (`iso9` included)
pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_locale_falls_back() {
        assert_eq!(get_table("ru_RU"), get_table(ISO9));
        assert_eq!(get_table(""), get_table(ISO9));
        assert!(!is_supported("ru_RU"));
    }

    #[test]
    fn test_iso9_basics() {
        let table = get_table(ISO9);
        assert_eq!(table.apply("Привет"), "Privet");
        assert_eq!(table.apply("Щука"), "Shhuka");
        assert_eq!(table.apply("объект"), "obekt");
    }

    #[test]
    fn test_decomposed_short_i() {
        let table = get_table(ISO9);
        assert_eq!(table.apply("и\u{0306}од"), "jod");
    }

    #[test]
    fn test_bulgarian_variant() {
        let table = get_table(BG_BG);
        assert_eq!(table.apply("Щастие"), "Shtastie");
        assert_eq!(table.apply("ъгъл"), "agal");
        // untouched letters come from iso9
        assert_eq!(table.get("Б"), Some("B"));
    }

    #[test]
    fn test_ukrainian_variant() {
        let table = get_table(UK);
        assert_eq!(table.apply("Київ"), "Kyyiv");
        assert_eq!(table.apply("Гребінка"), "Hrebinka");
        assert_eq!(table.apply("м’ята"), "m'yata");
        assert!(!table.contains("Ы"));
        assert!(!table.contains("ё"));
    }

    #[test]
    fn test_georgian_variant() {
        let table = get_table(KA_GE);
        assert_eq!(table.apply("თბილისი"), "thbilisi");
        // Cyrillic still covered
        assert_eq!(table.apply("Мир"), "Mir");
    }

    #[test]
    fn test_values_are_ascii() {
        for locale in SUPPORTED_LOCALES {
            for (_, value) in builtin(locale).iter() {
                assert!(value.is_ascii(), "{locale}: {value}");
            }
        }
    }
}
