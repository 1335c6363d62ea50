//! Daily inspirational quotes.
//!
//! A fixed bilingual catalog covers every day deterministically (day of
//! year modulo catalog size), so the ticker always has something to show
//! without a network call. [`QuoteGenerator`] produces fresh quotes
//! through the completion provider on demand.

use chrono::{Datelike, Local, NaiveDate};
use laichat_types::quote::Quote;

pub mod generator;

pub use generator::QuoteGenerator;

// ---------------------------------------------------------------------------
// Static catalog
// ---------------------------------------------------------------------------

/// English text, Lai Hakha translation, author.
const CATALOG: &[(&str, &str, &str)] = &[
    (
        "The only way to do great work is to love what you do.",
        "Rian ṭha ṭuan khawh nak lam khat chauh a um, mah na ṭuan mi rian kha dawt a si.",
        "Steve Jobs",
    ),
    (
        "Believe you can and you're halfway there.",
        "Ka tuah khawh lai tiah na zumh ahcun, a cheu na phan cang.",
        "Theodore Roosevelt",
    ),
    (
        "It does not matter how slowly you go as long as you do not stop.",
        "Na din lo paoh ahcun, zeizat in dah na kal muan ti a biapi lo.",
        "Confucius",
    ),
    (
        "Your time is limited, don't waste it living someone else's life.",
        "Na caan a tlawm, midang nun in nung hlah.",
        "Steve Jobs",
    ),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "Hmailei cu an manh a dawhnak a zum mi hna ta a si.",
        "Eleanor Roosevelt",
    ),
    (
        "Don't watch the clock; do what it does. Keep going.",
        "Nazi zoh hlah; amah nih a tuah mi kha tuah ve. Kal peng.",
        "Sam Levenson",
    ),
    (
        "Success is not final, failure is not fatal: It is the courage to continue that counts.",
        "Awn nak hi a donghnak a si lo, sungh nak hi thih nak a si lo: Pehzulh ngam nak lungthin hi a biapi bik mi cu a si.",
        "Winston Churchill",
    ),
    (
        "You are never too old to set another goal or to dream a new dream.",
        "Hmuitinh thar chiah ding le manh thar man ding in na upa tuk bal lo.",
        "C.S. Lewis",
    ),
    (
        "Start where you are. Use what you have. Do what you can.",
        "Na um nak hmun in thawk. Na ngeih mi hmang. Na tuah khawh mi tuah.",
        "Arthur Ashe",
    ),
    (
        "Life is 10% what happens to us and 90% how we react to it.",
        "Nunnak hi kan cung i a tlung mi 10% a si i, kan lehrulh ning hi 90% a si.",
        "Charles R. Swindoll",
    ),
    (
        "With the new day comes new strength and new thoughts.",
        "Ni thar he thazaang thar le ruahnak thar an ra.",
        "Eleanor Roosevelt",
    ),
    (
        "Failure will never overtake me if my determination to succeed is strong enough.",
        "Hlawhtlin duhnak lungthin ka ngeih mi a ṭhawn ahcun, sunghnak nih a ka tei bal lai lo.",
        "Og Mandino",
    ),
    (
        "Quality is not an act, it is a habit.",
        "A ṭhatnak cu tuahnak men a si lo, ziaza tu a si.",
        "Aristotle",
    ),
    (
        "It always seems impossible until it's done.",
        "Tuah dih hlan paoh cu a si kho lo mi a lo lengmang.",
        "Nelson Mandela",
    ),
    (
        "Good, better, best. Never let it rest. 'Til your good is better and your better is best.",
        "A ṭha, a ṭha deuh, a ṭha bik. Na ṭha kha ṭha deuh, na ṭha deuh kha ṭha bik a si hlan lo din hlah.",
        "St. Jerome",
    ),
    (
        "Optimism is the faith that leads to achievement. Nothing can be done without hope and confidence.",
        "A ṭha lei in hmuh nak hi hlawhtlinnak lei hruaitu zumhnak a si. Ruahchannak le i zumhngamnak lo cun zeihmanh tuah khawh a si lo.",
        "Helen Keller",
    ),
    (
        "Keep your face always toward the sunshine—and shadows will fall behind you.",
        "Ni ceu lei ah na hmai chit zungzal—cun thlaimun cu na hnu lei ah a um lai.",
        "Walt Whitman",
    ),
    (
        "The secret of getting ahead is getting started.",
        "Hmailei panh khawhnak a biathli cu i/thawk hi a si.",
        "Mark Twain",
    ),
    (
        "Setting goals is the first step in turning the invisible into the visible.",
        "Hmuitinh chiah cu hmuh khawh lo mi kha hmuh khawh mi ah chuahter nak a step hmasa bik a si.",
        "Tony Robbins",
    ),
    (
        "You don't have to be great to start, but you have to start to be great.",
        "I thawk ding in na ṭhat a hau lo, asinain ṭha ding in i thawk na hau.",
        "Zig Ziglar",
    ),
];

// ---------------------------------------------------------------------------
// Daily selection
// ---------------------------------------------------------------------------

/// The catalog quote for a specific calendar date.
///
/// Pure and deterministic: day of year (1-based) modulo catalog size.
pub fn daily_quote_on(date: NaiveDate) -> Quote {
    let index = date.ordinal() as usize % CATALOG.len();
    let (text, translation, author) = CATALOG[index];
    Quote {
        id: index as i64 + 1,
        text: text.to_string(),
        translation: translation.to_string(),
        author: author.to_string(),
    }
}

/// Today's catalog quote, by the local calendar.
pub fn daily_quote() -> Quote {
    daily_quote_on(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_quote_is_deterministic_for_a_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let a = daily_quote_on(date);
        let b = daily_quote_on(date);
        assert_eq!(a.id, b.id);
        assert_eq!(a.text, b.text);
    }

    #[test]
    fn test_consecutive_days_rotate() {
        let day = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let next = day.succ_opt().unwrap();
        assert_ne!(daily_quote_on(day).id, daily_quote_on(next).id);
    }

    #[test]
    fn test_selection_wraps_around_catalog() {
        // Ordinal 365 on a non-leap year lands on index 5.
        let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let quote = daily_quote_on(date);
        assert_eq!(quote.id, 6);
        assert_eq!(quote.author, "Sam Levenson");
    }

    #[test]
    fn test_every_catalog_entry_is_reachable() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut seen = std::collections::HashSet::new();
        for offset in 0..CATALOG.len() as u64 {
            let date = start + chrono::Days::new(offset);
            seen.insert(daily_quote_on(date).id);
        }
        assert_eq!(seen.len(), CATALOG.len());
    }
}
