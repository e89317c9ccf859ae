/// UTF-8 accented letters that went through a Latin-1 decode somewhere upstream
const MISDECODED: [(&str, &str); 21] = [
    ("Ã©", "é"),
    ("Ã¨", "è"),
    ("Ãª", "ê"),
    ("Ã«", "ë"),
    ("Ã¢", "â"),
    ("Ã\u{a0}", "à"),
    ("Ã ", "à"),
    ("Ã´", "ô"),
    ("Ã¶", "ö"),
    ("Ã§", "ç"),
    ("Ã¹", "ù"),
    ("Ã»", "û"),
    ("Ã¼", "ü"),
    ("Ã®", "î"),
    ("Ã¯", "ï"),
    ("Ã‰", "É"),
    ("Ãˆ", "È"),
    ("ÃŠ", "Ê"),
    ("Ã€", "À"),
    ("Ã‡", "Ç"),
    ("Ã”", "Ô"),
];

/// Base letter followed by a combining mark
const DECOMPOSED: [(&str, &str); 20] = [
    ("e\u{301}", "é"),
    ("e\u{300}", "è"),
    ("e\u{302}", "ê"),
    ("e\u{308}", "ë"),
    ("a\u{300}", "à"),
    ("a\u{302}", "â"),
    ("c\u{327}", "ç"),
    ("u\u{300}", "ù"),
    ("u\u{302}", "û"),
    ("i\u{302}", "î"),
    ("i\u{308}", "ï"),
    ("o\u{302}", "ô"),
    ("o\u{308}", "ö"),
    ("u\u{308}", "ü"),
    ("E\u{301}", "É"),
    ("E\u{300}", "È"),
    ("E\u{302}", "Ê"),
    ("A\u{300}", "À"),
    ("C\u{327}", "Ç"),
    ("O\u{302}", "Ô"),
];

fn is_combining_mark(c: char) -> bool {
    ('\u{300}'..='\u{36f}').contains(&c)
}

/// Repair known malformed accented sequences; correct text comes back unchanged
pub fn repair_mojibake(text: &str) -> String {
    let needs_repair = text.contains('Ã') || text.chars().any(is_combining_mark);
    if !needs_repair {
        return text.to_string();
    }

    let mut fixed = text.to_string();
    for (malformed, correct) in MISDECODED.iter().chain(DECOMPOSED.iter()) {
        if fixed.contains(malformed) {
            fixed = fixed.replace(malformed, correct);
        }
    }
    fixed
}
