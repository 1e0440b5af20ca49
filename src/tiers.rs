//! # Result Tiers
//!
//! Five fixed result records, each owning a contiguous inclusive score band.
//! The bands cover `0..=100` without gaps or overlaps, so every [`Score`]
//! resolves to exactly one tier and no fallback entry is needed.

use serde::Serialize;

use crate::scoring::{Score, MAX_SCORE};

/// URL prefix under which tier images are served
pub const TIER_IMAGE_URL_PREFIX: &str = "/static/img/";

/// One display record bound to an inclusive score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultTier {
    /// 1-based position in the table, used as a metrics label
    pub level: u8,
    pub min_score: u8,
    pub max_score: u8,
    pub grade: &'static str,
    pub image: &'static str,
    pub quote: &'static str,
    pub comment: &'static str,
}

impl ResultTier {
    pub fn contains(&self, score: Score) -> bool {
        (self.min_score..=self.max_score).contains(&score.value())
    }

    /// Public URL of the tier image
    pub fn image_url(&self) -> String {
        format!("{}{}", TIER_IMAGE_URL_PREFIX, self.image)
    }
}

pub static RESULT_TIERS: [ResultTier; 5] = [
    ResultTier {
        level: 1,
        min_score: 0,
        max_score: 20,
        grade: "[1단계]\n🌳 모(毛)의 왕국 🌳",
        image: "rank1.png",
        quote: "걱정은 저 멀리 던져버리세요.",
        comment: "당신의 두피는 평화로운 숲과 같습니다.\n지금처럼만 유지해주세요!",
    },
    ResultTier {
        level: 2,
        min_score: 21,
        max_score: 40,
        grade: "[2단계]\n🌱 평화로운 잔디밭 🌱",
        image: "rank2.png",
        quote: "아직 늦지 않았습니다. 희망을 가지세요.",
        comment: "조금 비어 보이는 곳이 있지만,충분히 관리 가능합니다.\n긍정적인 마음이 중요해요!",
    },
    ResultTier {
        level: 3,
        min_score: 41,
        max_score: 60,
        grade: "[3단계]\n🚨 고속도로 착공 시작 🚨",
        image: "rank3.png",
        quote: "AI는... 거짓말을 하지 않습니다.",
        comment: "이제는 관리가 필요한 시점입니다.\n현실을 직시하고 대책을 세워보는 건 어떨까요?",
    },
    ResultTier {
        level: 4,
        min_score: 61,
        max_score: 80,
        grade: "[4단계]\n🌬️ 바람의 언덕 🌬️",
        image: "rank4.png",
        quote: "괜찮아요...\n머리카락이 인생의 전부는 아니잖아요?",
        comment: "두피가 휑한 바람을 느끼고 있습니다.\n당신의 매력은 머리숱에만 있는 것이 아닙니다!",
    },
    ResultTier {
        level: 5,
        min_score: 81,
        max_score: 100,
        grade: "[5단계]\n💡 무념무상(無念無想)의 경지 💡",
        image: "rank5.png",
        quote: "해탈의 경지에 오르셨군요.",
        comment: "모든 것을 내려놓은 당신,\n그 어떤 것에도 흔들리지 않는 평온함을 얻었습니다.",
    },
];

/// Look up the tier for a score.
///
/// The match arms are exhaustive over `u8`; `Score` never exceeds 100, so the
/// last arm only ever sees `81..=100`.
///
/// # Examples
///
/// ```
/// use scalp_meter::scoring::Score;
/// use scalp_meter::tiers::tier_for_score;
///
/// assert_eq!(tier_for_score(Score::clamped(0)).image, "rank1.png");
/// assert_eq!(tier_for_score(Score::clamped(100)).image, "rank5.png");
/// ```
pub fn tier_for_score(score: Score) -> &'static ResultTier {
    let index = match score.value() {
        0..=20 => 0,
        21..=40 => 1,
        41..=60 => 2,
        61..=80 => 3,
        81..=u8::MAX => 4,
    };
    &RESULT_TIERS[index]
}

/// Check that the table bands start at 0, end at 100, are contiguous, and
/// agree with [`tier_for_score`] for every score.
pub fn validate_tier_table() -> Result<(), String> {
    let first = &RESULT_TIERS[0];
    if first.min_score != 0 {
        return Err(format!("first tier starts at {} instead of 0", first.min_score));
    }

    for pair in RESULT_TIERS.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if lower.min_score > lower.max_score {
            return Err(format!("tier {} has an inverted band", lower.image));
        }
        if upper.min_score != lower.max_score.saturating_add(1) {
            return Err(format!(
                "gap or overlap between {} ({}..={}) and {} ({}..={})",
                lower.image, lower.min_score, lower.max_score, upper.image, upper.min_score, upper.max_score
            ));
        }
    }

    let last = &RESULT_TIERS[RESULT_TIERS.len() - 1];
    if last.max_score != MAX_SCORE {
        return Err(format!("last tier ends at {} instead of {}", last.max_score, MAX_SCORE));
    }

    for raw in 0..=MAX_SCORE {
        let score = Score::clamped(raw as u64);
        if !tier_for_score(score).contains(score) {
            return Err(format!("score {} resolves to a tier that excludes it", raw));
        }
    }

    Ok(())
}

/// Response record returned to clients after a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub score: Score,
    pub grade: String,
    pub image_url: String,
    pub quote: String,
    pub comment: String,
}

impl ResultRecord {
    pub fn from_score(score: Score) -> Self {
        let tier = tier_for_score(score);
        Self {
            score,
            grade: tier.grade.to_string(),
            image_url: tier.image_url(),
            quote: tier.quote.to_string(),
            comment: tier.comment.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_table_is_exhaustive() {
        assert_eq!(validate_tier_table(), Ok(()));
    }

    #[test]
    fn test_every_score_hits_exactly_one_band() {
        for raw in 0..=100u64 {
            let score = Score::clamped(raw);
            let matching = RESULT_TIERS.iter().filter(|t| t.contains(score)).count();
            assert_eq!(matching, 1, "score {} matched {} tiers", raw, matching);
            assert!(tier_for_score(score).contains(score));
        }
    }

    #[test]
    fn test_band_boundaries() {
        let cases = [
            (0, "rank1.png"),
            (20, "rank1.png"),
            (21, "rank2.png"),
            (40, "rank2.png"),
            (41, "rank3.png"),
            (60, "rank3.png"),
            (61, "rank4.png"),
            (80, "rank4.png"),
            (81, "rank5.png"),
            (100, "rank5.png"),
        ];
        for (raw, image) in cases {
            assert_eq!(tier_for_score(Score::clamped(raw)).image, image, "score {}", raw);
        }
    }

    #[test]
    fn test_result_record_from_score() {
        let record = ResultRecord::from_score(Score::clamped(100));
        assert!(record.grade.starts_with("[5단계]"));
        assert_eq!(record.image_url, "/static/img/rank5.png");
        assert_eq!(record.quote, "해탈의 경지에 오르셨군요.");

        let record = ResultRecord::from_score(Score::clamped(0));
        assert!(record.grade.starts_with("[1단계]"));
        assert_eq!(record.image_url, "/static/img/rank1.png");
    }

    #[test]
    fn test_result_record_json_shape() {
        let record = ResultRecord::from_score(Score::clamped(55));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["score"], 55);
        assert_eq!(value["image_url"], "/static/img/rank3.png");
        assert!(value["grade"].as_str().unwrap().starts_with("[3단계]"));
        assert!(value.get("quote").is_some());
        assert!(value.get("comment").is_some());
    }

    #[test]
    fn test_levels_are_sequential() {
        for (index, tier) in RESULT_TIERS.iter().enumerate() {
            assert_eq!(tier.level as usize, index + 1);
        }
    }
}
