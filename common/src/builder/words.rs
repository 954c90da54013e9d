//! Amount-in-words conversion on the Indian numbering scale. Western
//! grouping splits on thousand/million/billion; here the first group is the
//! last three digits and every group above it is two digits, named Thousand,
//! Lakh and Crore.

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const SCALES: [&str; 4] = ["", "Thousand", "Lakh", "Crore"];

fn spell_group(n: u64) -> String {
    let mut parts: Vec<String> = Vec::new();
    let hundreds = n / 100;
    let rest = n % 100;
    if hundreds > 0 {
        parts.push(format!("{} Hundred", ONES[hundreds as usize]));
    }
    if rest >= 20 {
        let ten = TENS[(rest / 10) as usize];
        let one = ONES[(rest % 10) as usize];
        if one.is_empty() {
            parts.push(ten.to_string());
        } else {
            parts.push(format!("{ten} {one}"));
        }
    } else if rest > 0 {
        parts.push(ONES[rest as usize].to_string());
    }
    parts.join(" ")
}

/// Spell a rupee amount in words with the fixed "Rupees Only" suffix.
/// Zero yields an empty string.
pub fn number_to_words(mut num: u64) -> String {
    if num == 0 {
        return String::new();
    }
    let mut groups: Vec<String> = Vec::new();
    let mut scale = 0usize;
    while num > 0 {
        // The lowest group is three digits; every group above it is two.
        let group = if scale == 0 {
            let g = num % 1000;
            num /= 1000;
            g
        } else {
            let g = num % 100;
            num /= 100;
            g
        };
        if group > 0 {
            let mut words = spell_group(group);
            let name = SCALES[scale.min(SCALES.len() - 1)];
            if !name.is_empty() {
                words.push(' ');
                words.push_str(name);
            }
            groups.push(words);
        }
        scale += 1;
    }
    groups.reverse();
    format!("{} Rupees Only", groups.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_empty() {
        assert_eq!(number_to_words(0), "");
    }

    #[test]
    fn hundreds() {
        assert_eq!(number_to_words(100), "One Hundred Rupees Only");
        assert_eq!(number_to_words(999), "Nine Hundred Ninety Nine Rupees Only");
    }

    #[test]
    fn teens_and_tens() {
        assert_eq!(number_to_words(14), "Fourteen Rupees Only");
        assert_eq!(number_to_words(40), "Forty Rupees Only");
        assert_eq!(number_to_words(21), "Twenty One Rupees Only");
    }

    #[test]
    fn indian_scale_breakpoints() {
        assert_eq!(
            number_to_words(52345),
            "Fifty Two Thousand Three Hundred Forty Five Rupees Only"
        );
        assert_eq!(
            number_to_words(150000),
            "One Lakh Fifty Thousand Rupees Only"
        );
        assert_eq!(number_to_words(10000000), "One Crore Rupees Only");
        assert_eq!(
            number_to_words(12345678),
            "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight Rupees Only"
        );
    }
}
