use rand::Rng;

use super::catalog::{LOREM_WORDS, pick, strengths_for};

const IMPROVEMENTS: &[&str] = &[
    "needs to improve time management",
    "should enhance communication skills",
];

const OVERALL: &[&str] = &[
    "consistently meets expectations",
    "exceeds performance goals",
];

/// `Strengths: .. Improvements: .. Overall: ..` followed by one to three
/// `Additional feedback:` sentences.
pub fn generate_review<R: Rng + ?Sized>(rng: &mut R, department: &str) -> String {
    let mut review = format!(
        "Strengths: {}. Improvements: {}. Overall: {}.",
        pick(rng, strengths_for(department)),
        pick(rng, IMPROVEMENTS),
        pick(rng, OVERALL),
    );
    for _ in 0..rng.gen_range(1..=3) {
        review.push_str(" Additional feedback: ");
        review.push_str(&lorem_sentence(rng));
    }
    review
}

pub fn lorem_sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let words = (0..rng.gen_range(4..=10))
        .map(|_| pick(rng, LOREM_WORDS))
        .collect::<Vec<_>>()
        .join(" ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn review_has_fixed_sections_and_feedback() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let review = generate_review(&mut rng, "Finance");
            assert!(review.starts_with("Strengths: "));
            assert!(review.contains(". Improvements: "));
            assert!(review.contains(". Overall: "));
            let extra = review.matches("Additional feedback: ").count();
            assert!((1..=3).contains(&extra));
            assert!(review.ends_with('.'));
        }
    }

    #[test]
    fn unknown_department_uses_default_strength() {
        let mut rng = StdRng::seed_from_u64(9);
        let review = generate_review(&mut rng, "Legal");
        assert!(review.starts_with("Strengths: dedicated team member."));
    }

    #[test]
    fn lorem_sentence_is_capitalized() {
        let mut rng = StdRng::seed_from_u64(11);
        let sentence = lorem_sentence(&mut rng);
        assert!(sentence.chars().next().unwrap().is_uppercase());
        assert!(sentence.ends_with('.'));
    }
}
