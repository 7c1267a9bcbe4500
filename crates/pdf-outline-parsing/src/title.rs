/// Title derived from a file name when no title text is found on page 1.
///
/// `"annual_report_2023.pdf"` becomes `"Annual Report 2023"`.
pub fn fallback_title(file_name: &str) -> String {
    title_case(&file_name.replace('_', " ").replace(".pdf", ""))
}

/// Title-case where every cased letter following a non-cased character is
/// mapped to titlecase and every other cased letter is lowercased. Digits are
/// not cased, so `"1st"` becomes `"1St"`.
///
/// Titlecase differs from uppercase for ligatures and digraphs: `"ß"` becomes
/// `"Ss"`, `"ﬁ"` becomes `"Fi"` and `"ǆ"` becomes `"ǅ"`. A capital sigma
/// lowercased at the end of a word becomes `"ς"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        let cased = is_cased(c);
        if cased && !prev_cased {
            push_titlecase(&mut out, c);
        } else if c == 'Σ' && prev_cased && !chars.peek().is_some_and(|&n| is_cased(n)) {
            out.push('ς');
        } else if cased {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}

/// Lowercase, uppercase, or titlecase letter.
fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || is_titlecase_letter(c)
}

fn is_titlecase_letter(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

fn push_titlecase(out: &mut String, c: char) {
    let mapped: &str = match c {
        'ß' => "Ss",
        'ﬀ' => "Ff",
        'ﬁ' => "Fi",
        'ﬂ' => "Fl",
        'ﬃ' => "Ffi",
        'ﬄ' => "Ffl",
        'ﬅ' | 'ﬆ' => "St",
        'և' => "\u{0535}\u{0582}",
        'ﬓ' => "\u{0544}\u{0576}",
        'ﬔ' => "\u{0544}\u{0565}",
        'ﬕ' => "\u{0544}\u{056B}",
        'ﬖ' => "\u{054E}\u{0576}",
        'ﬗ' => "\u{0544}\u{056D}",
        'ᾲ' => "\u{1FBA}\u{0345}",
        'ᾴ' => "\u{0386}\u{0345}",
        'ᾷ' => "\u{0391}\u{0342}\u{0345}",
        'ῂ' => "\u{1FCA}\u{0345}",
        'ῄ' => "\u{0389}\u{0345}",
        'ῇ' => "\u{0397}\u{0342}\u{0345}",
        'ῲ' => "\u{1FFA}\u{0345}",
        'ῴ' => "\u{038F}\u{0345}",
        'ῷ' => "\u{03A9}\u{0342}\u{0345}",
        _ => {
            out.push_str(&single_titlecase(c));
            return;
        }
    };
    out.push_str(mapped);
}

fn single_titlecase(c: char) -> String {
    let titled = match c {
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}',
        // Greek with ypogegrammeni keeps the iota subscript in titlecase
        '\u{1F80}'..='\u{1FAF}' => {
            let cp = c as u32;
            char::from_u32((cp & !0xF) | 0x8 | (cp & 0x7)).unwrap_or(c)
        }
        '\u{1FB3}' | '\u{1FBC}' => '\u{1FBC}',
        '\u{1FC3}' | '\u{1FCC}' => '\u{1FCC}',
        '\u{1FF3}' | '\u{1FFC}' => '\u{1FFC}',
        // Georgian Mkhedruli letters are their own titlecase
        '\u{10D0}'..='\u{10FA}' | '\u{10FD}'..='\u{10FF}' => c,
        _ => return c.to_uppercase().collect(),
    };
    titled.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscores_and_extension() {
        assert_eq!(fallback_title("annual_report_2023.pdf"), "Annual Report 2023");
        assert_eq!(fallback_title("file02.pdf"), "File02");
    }

    #[test]
    fn mixed_case_is_normalized() {
        assert_eq!(fallback_title("RFP_request.pdf"), "Rfp Request");
        assert_eq!(title_case("o'neil's DATA"), "O'Neil'S Data");
    }

    #[test]
    fn digits_break_words() {
        assert_eq!(title_case("1st place"), "1St Place");
    }

    #[test]
    fn every_pdf_occurrence_removed() {
        assert_eq!(fallback_title("a.pdf_b.pdf"), "A B");
    }

    #[test]
    fn word_initial_letters_use_titlecase_mapping() {
        assert_eq!(fallback_title("straße_ßig.pdf"), "Straße Ssig");
        assert_eq!(title_case("ﬁne ﬂow"), "Fine Flow");
        assert_eq!(title_case("ǆemal ǉubav"), "ǅemal ǈubav");
        assert_eq!(title_case("ᾳδω"), "ᾼδω");
    }

    #[test]
    fn titlecase_letters_are_cased() {
        // The letter after a titlecase digraph continues the word
        assert_eq!(title_case("ǅx"), "ǅx");
        assert_eq!(title_case("xǅy"), "Xǆy");
    }

    #[test]
    fn capital_sigma_at_word_end_becomes_final() {
        assert_eq!(title_case("ΟΔΟΣ ΣΑ"), "Οδος Σα");
        assert_eq!(title_case("ΣΟΦΙΑ"), "Σοφια");
    }
}
