//! Accuracy buckets and encouragement messages.

use crate::types::{FeedbackCategory, FeedbackLanguage};

const EXCELLENT_FROM: f64 = 0.9;
const GOOD_FROM: f64 = 0.7;
const FAIR_FROM: f64 = 0.5;

/// Map accuracy to a feedback category.
///
/// Lower bounds are inclusive: exactly 0.9 is Excellent, exactly 0.7 is Good.
pub fn select_category(accuracy: f64) -> FeedbackCategory {
    if accuracy >= EXCELLENT_FROM {
        FeedbackCategory::Excellent
    } else if accuracy >= GOOD_FROM {
        FeedbackCategory::Good
    } else if accuracy >= FAIR_FROM {
        FeedbackCategory::Fair
    } else {
        FeedbackCategory::NeedsImprovement
    }
}

impl FeedbackCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsImprovement => "needs_improvement",
        }
    }

    /// Default encouragement for this category.
    pub fn message(&self, language: FeedbackLanguage) -> &'static str {
        match (language, self) {
            (FeedbackLanguage::English, Self::Excellent) => "Excellent! You read it perfectly!",
            (FeedbackLanguage::English, Self::Good) => "Great job! Just a few small slips.",
            (FeedbackLanguage::English, Self::Fair) => "Good effort! Let's practice a little more.",
            (FeedbackLanguage::English, Self::NeedsImprovement) => {
                "Keep trying! Read it slowly, one word at a time."
            }
            (FeedbackLanguage::Vietnamese, Self::Excellent) => "Xuất sắc! Con đọc rất tốt!",
            (FeedbackLanguage::Vietnamese, Self::Good) => "Giỏi lắm! Chỉ sai một chút thôi.",
            (FeedbackLanguage::Vietnamese, Self::Fair) => "Cố gắng tốt! Mình luyện thêm nhé.",
            (FeedbackLanguage::Vietnamese, Self::NeedsImprovement) => {
                "Đừng nản nhé! Đọc chậm từng từ một."
            }
        }
    }
}
