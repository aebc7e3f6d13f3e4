//! Spells out monetary amounts for payslips, e.g.
//! `1234.56` becomes "One Thousand Two Hundred Thirty Four Dollars and
//! Fifty Six Cents Only".

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const SCALES: [&str; 4] = ["", "Thousand", "Million", "Billion"];

fn three_digits(n: u64, words: &mut Vec<&'static str>) {
    let hundreds = n / 100;
    let rem = n % 100;
    if hundreds > 0 {
        words.push(ONES[hundreds as usize]);
        words.push("Hundred");
    }
    match rem {
        0 => {}
        1..=9 => words.push(ONES[rem as usize]),
        10..=19 => words.push(TEENS[(rem - 10) as usize]),
        _ => {
            words.push(TENS[(rem / 10) as usize]);
            if rem % 10 > 0 {
                words.push(ONES[(rem % 10) as usize]);
            }
        }
    }
}

/// Whole number in words. Groups of three digits, scale words between.
fn integer_to_words(n: u64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }

    let mut words: Vec<&'static str> = Vec::new();
    for (idx, group) in groups.iter().enumerate().rev() {
        if *group == 0 {
            continue;
        }
        three_digits(*group, &mut words);
        if idx > 0 {
            if let Some(scale) = SCALES.get(idx) {
                words.push(scale);
            }
        }
    }
    words.join(" ")
}

/// Amount in words at cent precision. The sign is dropped; the caller
/// decides how to present negative balances.
pub fn amount_to_words(amount: f64) -> String {
    let total_cents = (amount.abs() * 100.0).round() as u64;
    let dollars = total_cents / 100;
    let cents = total_cents % 100;

    let mut out = format!(
        "{} {}",
        integer_to_words(dollars),
        if dollars == 1 { "Dollar" } else { "Dollars" }
    );
    if cents > 0 {
        out.push_str(&format!(
            " and {} {}",
            integer_to_words(cents),
            if cents == 1 { "Cent" } else { "Cents" }
        ));
    }
    out.push_str(" Only");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_spells_out() {
        assert_eq!(amount_to_words(0.0), "Zero Dollars Only");
    }

    #[test]
    fn singular_dollar() {
        assert_eq!(amount_to_words(1.0), "One Dollar Only");
    }

    #[test]
    fn dollars_and_cents() {
        assert_eq!(
            amount_to_words(1234.56),
            "One Thousand Two Hundred Thirty Four Dollars and Fifty Six Cents Only"
        );
    }

    #[test]
    fn round_million() {
        assert_eq!(amount_to_words(1_000_000.0), "One Million Dollars Only");
    }

    #[test]
    fn singular_cent() {
        assert_eq!(amount_to_words(0.01), "Zero Dollars and One Cent Only");
    }

    #[test]
    fn teens_and_hundreds() {
        assert_eq!(
            amount_to_words(115.10),
            "One Hundred Fifteen Dollars and Ten Cents Only"
        );
    }

    #[test]
    fn skips_empty_groups() {
        assert_eq!(
            amount_to_words(2_000_019.0),
            "Two Million Nineteen Dollars Only"
        );
    }

    #[test]
    fn negative_amounts_use_the_absolute_value() {
        assert_eq!(amount_to_words(-42.0), "Forty Two Dollars Only");
    }

    #[test]
    fn sub_cent_noise_rounds_away() {
        assert_eq!(amount_to_words(99.999), "One Hundred Dollars Only");
    }
}
