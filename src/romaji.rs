//! Romaji to hiragana transliteration.
//!
//! One-directional, total over arbitrary input: anything the table does not
//! recognize passes through unchanged. Longest match wins, so prefixes of
//! valid trigraphs (`sh` inside `sha`) stay unresolved until the following
//! keystroke disambiguates them.

/// Syllable table lookup, 1-3 latin characters to a kana cluster.
fn kana(seq: &str) -> Option<&'static str> {
    let kana = match seq {
        // vowels
        "a" => "あ",
        "i" => "い",
        "u" => "う",
        "e" => "え",
        "o" => "お",
        // k
        "ka" => "か",
        "ki" => "き",
        "ku" => "く",
        "ke" => "け",
        "ko" => "こ",
        "kya" => "きゃ",
        "kyu" => "きゅ",
        "kyo" => "きょ",
        // s
        "sa" => "さ",
        "shi" => "し",
        "si" => "し",
        "su" => "す",
        "se" => "せ",
        "so" => "そ",
        "sha" => "しゃ",
        "shu" => "しゅ",
        "sho" => "しょ",
        // t
        "ta" => "た",
        "chi" => "ち",
        "ti" => "ち",
        "tsu" => "つ",
        "tu" => "つ",
        "te" => "て",
        "to" => "と",
        "cha" => "ちゃ",
        "chu" => "ちゅ",
        "cho" => "ちょ",
        // n
        "na" => "な",
        "ni" => "に",
        "nu" => "ぬ",
        "ne" => "ね",
        "no" => "の",
        "nya" => "にゃ",
        "nyu" => "にゅ",
        "nyo" => "にょ",
        "nn" => "ん",
        // h
        "ha" => "は",
        "hi" => "ひ",
        "fu" => "ふ",
        "hu" => "ふ",
        "he" => "へ",
        "ho" => "ほ",
        "hya" => "ひゃ",
        "hyu" => "ひゅ",
        "hyo" => "ひょ",
        // m
        "ma" => "ま",
        "mi" => "み",
        "mu" => "む",
        "me" => "め",
        "mo" => "も",
        "mya" => "みゃ",
        "myu" => "みゅ",
        "myo" => "みょ",
        // y
        "ya" => "や",
        "yu" => "ゆ",
        "yo" => "よ",
        // r
        "ra" => "ら",
        "ri" => "り",
        "ru" => "る",
        "re" => "れ",
        "ro" => "ろ",
        "rya" => "りゃ",
        "ryu" => "りゅ",
        "ryo" => "りょ",
        // w
        "wa" => "わ",
        "wo" => "を",
        // voiced g
        "ga" => "が",
        "gi" => "ぎ",
        "gu" => "ぐ",
        "ge" => "げ",
        "go" => "ご",
        "gya" => "ぎゃ",
        "gyu" => "ぎゅ",
        "gyo" => "ぎょ",
        // voiced z
        "za" => "ざ",
        "ji" => "じ",
        "zi" => "じ",
        "zu" => "ず",
        "ze" => "ぜ",
        "zo" => "ぞ",
        "ja" => "じゃ",
        "ju" => "じゅ",
        "jo" => "じょ",
        "jya" => "じゃ",
        "jyu" => "じゅ",
        "jyo" => "じょ",
        // voiced d
        "da" => "だ",
        "de" => "で",
        "do" => "ど",
        "dzu" => "づ",
        "dzi" => "づ",
        // voiced b
        "ba" => "ば",
        "bi" => "び",
        "bu" => "ぶ",
        "be" => "べ",
        "bo" => "ぼ",
        "bya" => "びゃ",
        "byu" => "びゅ",
        "byo" => "びょ",
        // semi-voiced p
        "pa" => "ぱ",
        "pi" => "ぴ",
        "pu" => "ぷ",
        "pe" => "ぺ",
        "po" => "ぽ",
        "pya" => "ぴゃ",
        "pyu" => "ぴゅ",
        "pyo" => "ぴょ",
        _ => return None,
    };
    Some(kana)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// Convert a raw latin buffer to hiragana.
///
/// Match order per position: 3-character syllable, 2-character syllable
/// (including `nn`), doubled consonant (sokuon っ), the eager `n` rule (an
/// `n` not followed by a vowel, `y`, or another `n` resolves to ん, including
/// at end of buffer), single character, otherwise pass the character through.
pub fn to_hiragana(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let chars: Vec<char> = lowered.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if i + 3 <= chars.len() {
            let three: String = chars[i..i + 3].iter().collect();
            if let Some(k) = kana(&three) {
                out.push_str(k);
                i += 3;
                continue;
            }
        }

        if i + 2 <= chars.len() {
            let two: String = chars[i..i + 2].iter().collect();
            if let Some(k) = kana(&two) {
                out.push_str(k);
                i += 2;
                continue;
            }
        }

        // sokuon: doubled consonant becomes the small tsu marker
        if i + 1 < chars.len()
            && c == chars[i + 1]
            && c.is_ascii_alphabetic()
            && !is_vowel(c)
            && c != 'n'
        {
            out.push('っ');
            i += 1;
            continue;
        }

        // hatsuon: n resolves eagerly unless a vowel, y, or n can still extend it
        if c == 'n' {
            let next = chars.get(i + 1);
            if !matches!(next, Some(&n) if is_vowel(n) || n == 'y' || n == 'n') {
                out.push('ん');
                i += 1;
                continue;
            }
        }

        let one: String = c.to_string();
        if let Some(k) = kana(&one) {
            out.push_str(k);
            i += 1;
            continue;
        }

        out.push(c);
        i += 1;
    }

    out
}
